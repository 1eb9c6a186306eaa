//! Basic example: form teams of four from a synthetic survey cohort.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use teamform::config::GaConfig;
use teamform::genome::Genome;
use teamform::layout::TeamLayout;
use teamform::progress::CancelToken;
use teamform::utils::RunStatistics;
use teamform::Optimizer;

/// A minimal student record: weekly availability as an hour bitmask plus a
/// self-reported skill level.
#[derive(Debug, Clone, Copy)]
struct Student {
    availability: u32,
    skill: u8,
}

/// Generate a reproducible synthetic cohort.
fn synthetic_cohort(size: usize) -> Vec<Student> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..size)
        .map(|_| Student {
            availability: rng.gen::<u32>() & 0x00FF_FFFF,
            skill: rng.gen_range(1..=5),
        })
        .collect()
}

/// Score an assignment: shared meeting hours within each team, plus a bonus
/// for mixing skill levels.
fn score_teams(students: &[Student], genome: &Genome, layout: &TeamLayout) -> f64 {
    let mut total = 0.0;

    for team in 0..layout.num_teams() {
        let members = &genome.as_slice()[layout.team_range(team)];

        // Hours when the whole team can meet.
        let shared = members
            .iter()
            .fold(u32::MAX, |acc, &s| acc & students[s].availability);
        total += shared.count_ones() as f64;

        // Skill diversity: number of distinct levels on the team.
        let mut levels = [false; 6];
        for &s in members {
            levels[students[s].skill as usize] = true;
        }
        total += levels.iter().filter(|&&present| present).count() as f64;
    }

    total / layout.num_teams() as f64
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let num_students = 32;
    let students = synthetic_cohort(num_students);
    let layout = TeamLayout::new(&vec![4; num_students / 4])?;

    let config = GaConfig::for_group_size(num_students)
        .with_population_size(2_000)
        .with_min_generations(20)
        .with_max_generations(120)
        .with_generations_of_stability(10);

    println!("Configuration:\n{}", serde_json::to_string_pretty(&config)?);

    let fitness = move |genome: &Genome, layout: &TeamLayout| score_teams(&students, genome, layout);
    let mut optimizer = Optimizer::new(num_students, layout, fitness, config)?.with_seed(7);

    let mut sink = |progress: teamform::progress::Progress| {
        if progress.generation % 10 == 0 {
            println!(
                "generation {:>3}: best {:.3} (stability {:.1})",
                progress.generation, progress.best_score, progress.stability
            );
        }
    };

    let result = optimizer.run_with(&mut sink, &CancelToken::new())?;

    println!();
    for (team, roster) in result.teams.iter().enumerate() {
        println!("Team {}: {:?}", team + 1, roster);
    }

    println!();
    println!("{}", RunStatistics::from_result(&result).format());

    Ok(())
}
