//! Integration tests for the generation controller and worker runner.

use teamform::config::GaConfig;
use teamform::error::GaError;
use teamform::genome::Genome;
use teamform::layout::TeamLayout;
use teamform::progress::{CancelToken, NullSink, Progress};
use teamform::runner;
use teamform::Optimizer;

/// A deterministic fitness with a clear gradient: teams of students with
/// adjacent indices score best (zero), scattered teams score negative.
fn clustering_fitness(genome: &Genome, layout: &TeamLayout) -> f64 {
    -(0..layout.num_teams())
        .map(|team| {
            let members = &genome.as_slice()[layout.team_range(team)];
            let min = members.iter().min().unwrap();
            let max = members.iter().max().unwrap();
            (max - min) as f64
        })
        .sum::<f64>()
}

fn small_run_config() -> GaConfig {
    GaConfig::new()
        .with_population_size(50)
        .with_tournament_size(10)
        .with_num_elites(1)
        .with_min_generations(5)
        .with_max_generations(5)
}

#[test]
fn test_fixed_five_generation_run() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let mut optimizer = Optimizer::new(12, layout, clustering_fitness, small_run_config())
        .unwrap()
        .with_seed(1);

    let mut reports: Vec<Progress> = Vec::new();
    let result = {
        let mut sink = |progress: Progress| reports.push(progress);
        optimizer
            .run_with(&mut sink, &CancelToken::new())
            .unwrap()
    };

    // Exactly five generations, reported as generation 0 through 5.
    assert_eq!(result.generations, 5);
    assert_eq!(reports.len(), 6);
    assert_eq!(reports[0].generation, 0);
    assert_eq!(reports[5].generation, 5);

    // The winner is a valid assignment of all twelve students.
    assert_eq!(result.genome.len(), 12);
    assert!(result.genome.is_valid_permutation());
    assert_eq!(result.teams.len(), 3);
    for roster in &result.teams {
        assert_eq!(roster.len(), 4);
    }

    // With one elite the best score can only improve on the initial
    // population's best.
    assert!(result.score >= reports[0].best_score);
}

#[test]
fn test_best_score_never_regresses_with_elitism() {
    let layout = TeamLayout::new(&[4, 4, 4, 4]).unwrap();
    let config = GaConfig::new()
        .with_population_size(60)
        .with_tournament_size(10)
        .with_num_elites(2)
        .with_min_generations(20)
        .with_max_generations(20);
    let mut optimizer = Optimizer::new(16, layout, clustering_fitness, config)
        .unwrap()
        .with_seed(8);

    let mut reports: Vec<Progress> = Vec::new();
    {
        let mut sink = |progress: Progress| reports.push(progress);
        optimizer
            .run_with(&mut sink, &CancelToken::new())
            .unwrap();
    }

    for pair in reports.windows(2) {
        assert!(
            pair[1].best_score >= pair[0].best_score,
            "best score regressed from {} to {} at generation {}",
            pair[0].best_score,
            pair[1].best_score,
            pair[1].generation
        );
    }
}

#[test]
fn test_mismatched_layout_fails_before_running() {
    // Sizes sum to 12 but there are only 11 students.
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let result = Optimizer::new(11, layout, clustering_fitness, small_run_config());

    assert!(matches!(result, Err(GaError::Configuration(_))));
}

#[test]
fn test_zero_students_fails() {
    let layout = TeamLayout::new(&[4]).unwrap();
    let result = Optimizer::new(0, layout, clustering_fitness, small_run_config());

    assert!(matches!(result, Err(GaError::Configuration(_))));
}

#[test]
fn test_invalid_config_values_fail() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();

    for config in [
        small_run_config().with_population_size(0),
        small_run_config().with_tournament_size(0),
        small_run_config().with_num_elites(51),
        small_run_config().with_top_pick_likelihood(0.0),
        small_run_config().with_mutation_likelihood(1.0),
        small_run_config().with_min_generations(10).with_max_generations(5),
        small_run_config().with_generations_of_stability(0),
    ] {
        let result = Optimizer::new(12, layout.clone(), clustering_fitness, config.clone());
        assert!(
            matches!(result, Err(GaError::Configuration(_))),
            "config {:?} should have been rejected",
            config
        );
    }
}

#[test]
fn test_non_finite_score_aborts_the_run() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let fitness = |_: &Genome, _: &TeamLayout| f64::NAN;
    let mut optimizer =
        Optimizer::new(12, layout, fitness, small_run_config()).unwrap();

    let result = optimizer.run();

    assert!(matches!(result, Err(GaError::Scoring { .. })));
}

#[test]
fn test_pre_cancelled_run_stops_at_first_boundary() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let mut optimizer = Optimizer::new(12, layout, clustering_fitness, small_run_config())
        .unwrap()
        .with_seed(4);

    let token = CancelToken::new();
    token.cancel();
    let result = optimizer.run_with(&mut NullSink, &token).unwrap();

    assert!(result.cancelled);
    assert_eq!(result.generations, 0);
    assert!(result.genome.is_valid_permutation());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();

    let mut first = Optimizer::new(12, layout.clone(), clustering_fitness, small_run_config())
        .unwrap()
        .with_seed(77);
    let mut second = Optimizer::new(12, layout, clustering_fitness, small_run_config())
        .unwrap()
        .with_seed(77);

    let a = first.run().unwrap();
    let b = second.run().unwrap();

    assert_eq!(a.score, b.score);
    assert_eq!(a.genome, b.genome);
    assert_eq!(a.teams, b.teams);
}

#[test]
fn test_stability_stops_a_converged_run() {
    // A constant fitness is maximally stable: the run should stop right at
    // min_generations instead of grinding to max_generations.
    let layout = TeamLayout::new(&[4, 4]).unwrap();
    let fitness = |_: &Genome, _: &TeamLayout| 42.0;
    let config = GaConfig::new()
        .with_population_size(30)
        .with_tournament_size(6)
        .with_num_elites(1)
        .with_min_generations(3)
        .with_max_generations(500)
        .with_generations_of_stability(2);
    let mut optimizer = Optimizer::new(8, layout, fitness, config).unwrap().with_seed(2);

    let result = optimizer.run().unwrap();

    assert_eq!(result.generations, 3);
    assert_eq!(result.score, 42.0);
}

#[test]
fn test_tiered_defaults_shrink_with_group_size() {
    let small = GaConfig::for_group_size(12);
    let large = GaConfig::for_group_size(400);

    assert!(small.population_size > large.population_size);
    assert!(small.top_pick_likelihood < large.top_pick_likelihood);
    assert!(small.max_kinship_generations >= large.max_kinship_generations);
}

#[test]
fn test_spawned_run_completes() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let handle = runner::spawn(12, layout, clustering_fitness, small_run_config()).unwrap();

    let result = handle.join().unwrap();

    assert_eq!(result.generations, 5);
    assert!(result.genome.is_valid_permutation());
}

#[test]
fn test_spawn_rejects_bad_configuration_up_front() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let result = runner::spawn(13, layout, clustering_fitness, small_run_config());

    assert!(matches!(result, Err(GaError::Configuration(_))));
}

#[test]
fn test_spawned_run_can_be_cancelled() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let config = GaConfig::new()
        .with_population_size(200)
        .with_tournament_size(10)
        .with_num_elites(1)
        .with_min_generations(100_000)
        .with_max_generations(100_000);

    let handle = runner::spawn(12, layout, clustering_fitness, config).unwrap();
    handle.cancel();

    let result = handle.join().unwrap();

    assert!(result.cancelled);
    assert!(result.generations < 100_000);
    assert!(result.genome.is_valid_permutation());
}

#[test]
fn test_progress_cell_holds_latest_snapshot() {
    let layout = TeamLayout::new(&[4, 4, 4]).unwrap();
    let handle = runner::spawn(12, layout, clustering_fitness, small_run_config()).unwrap();

    while !handle.is_finished() {
        std::thread::yield_now();
    }

    let progress = handle.latest_progress().expect("at least one report");
    assert_eq!(progress.generation, 5);

    handle.join().unwrap();
}
