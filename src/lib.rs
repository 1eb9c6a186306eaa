//! # teamform
//!
//! A genetic-algorithm engine that partitions students into fixed-size
//! teams, searching permutations of student indices for an assignment that
//! scores well under a caller-supplied fitness function.
//!
//! The algorithm combines tournament selection with kinship avoidance,
//! ordered crossover that cuts only at team boundaries, swap mutation,
//! elitism, and a score-stability stopping rule.

pub mod ancestry;
pub mod config;
pub mod crossover;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod layout;
pub mod mutation;
pub mod population;
pub mod progress;
pub mod runner;
pub mod selection;
pub mod utils;

use crate::ancestry::Ancestry;
use crate::config::GaConfig;
use crate::error::GaResult;
use crate::fitness::FitnessFunction;
use crate::genome::Genome;
use crate::layout::TeamLayout;
use crate::population::Population;
use crate::progress::{CancelToken, NullSink, Progress, ProgressSink};

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The best team assignment found by a finished run, with summary data
/// about how the search went.
#[derive(Debug, Clone)]
pub struct TeamSet {
    /// The winning genome
    pub genome: Genome,
    /// Its fitness score
    pub score: f64,
    /// The genome split into per-team rosters of student indices
    pub teams: Vec<Vec<usize>>,
    /// Generations completed
    pub generations: u32,
    /// Stability ratio at termination
    pub stability: f64,
    /// Mating pairs accepted without a completed kinship check
    pub degraded_matches: usize,
    /// True when the run stopped because the caller cancelled it
    pub cancelled: bool,
    /// Wall-clock duration of the run
    pub run_time: Duration,
}

/// The optimizer: owns the population buffers and drives initialization,
/// elitism, the generation loop, and termination.
pub struct Optimizer<F> {
    num_students: usize,
    layout: TeamLayout,
    fitness: F,
    config: GaConfig,
    rng: ChaCha8Rng,
}

impl<F: FitnessFunction> Optimizer<F> {
    /// Create an optimizer for `num_students` students partitioned by
    /// `layout`. The configuration is validated here, before any population
    /// is allocated.
    pub fn new(
        num_students: usize,
        layout: TeamLayout,
        fitness: F,
        config: GaConfig,
    ) -> GaResult<Self> {
        config.validate(num_students, &layout)?;

        Ok(Optimizer {
            num_students,
            layout,
            fitness,
            config,
            rng: ChaCha8Rng::from_entropy(),
        })
    }

    /// Seed the random source for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// The configuration in effect for this run.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The team layout in effect for this run.
    pub fn layout(&self) -> &TeamLayout {
        &self.layout
    }

    /// Run to termination without progress reports or cancellation.
    pub fn run(&mut self) -> GaResult<TeamSet> {
        self.run_with(&mut NullSink, &CancelToken::new())
    }

    /// Run to termination, reporting each completed generation to `sink`
    /// and honoring `cancel` at generation boundaries.
    pub fn run_with(
        &mut self,
        sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> GaResult<TeamSet> {
        let start_time = Instant::now();

        // Initial generation: random permutations with empty ancestry.
        let mut current =
            Population::random(self.num_students, self.config.population_size, &mut self.rng);
        current.evaluate(&self.fitness, &self.layout)?;
        current.sort_by_score();

        // Trailing record of best scores, one slot per generation in the
        // stability window, indexed generation mod window.
        let window = self.config.generations_of_stability as usize;
        let mut best_history = vec![0.0f64; window];
        best_history[0] = current.best().score;

        let mut best_ever = current.best().score;
        let mut stalled_generations = 0u32;
        let mut stability = 0.0f64;
        let mut generation = 0u32;
        let mut degraded_matches = 0usize;
        let mut cancelled = false;

        sink.report(Progress {
            generation,
            best_score: best_ever,
            stability,
        });

        // Second buffer for the generation under construction; the two are
        // swapped wholesale each generation.
        let mut next = current.clone();

        while !self.should_terminate(generation, stalled_generations, stability) {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            // Clone the elites forward unchanged, shifting their ancestry
            // as if they had mated with themselves.
            for elite in 0..self.config.num_elites {
                let source_id = current.slot_id_at_rank(elite);
                let source = current.slot(source_id);
                let ancestry =
                    Ancestry::from_self(source_id, &source.ancestry, self.config.max_kinship_generations);
                let slot = next.slot_mut(elite);
                slot.genome = source.genome.clone();
                slot.ancestry = ancestry;
            }

            // Fill the remaining slots by mating.
            for child in self.config.num_elites..self.config.population_size {
                let parents = selection::select_parents(&current, &self.config, &mut self.rng);
                if parents.degraded {
                    degraded_matches += 1;
                }

                let mut genome = crossover::crossover(
                    &current.slot(parents.mom).genome,
                    &current.slot(parents.dad).genome,
                    &self.layout,
                    &mut self.rng,
                );
                mutation::mutate_repeatedly(&mut genome, self.config.mutation_likelihood, &mut self.rng);

                let slot = next.slot_mut(child);
                slot.genome = genome;
                slot.ancestry = parents.ancestry;
            }

            std::mem::swap(&mut current, &mut next);
            generation += 1;

            current.evaluate(&self.fitness, &self.layout)?;
            current.sort_by_score();

            // Update the stability measure against the oldest recorded
            // best, then overwrite that slot with this generation's best.
            let best = current.best().score;
            let oldest = best_history[(generation as usize + 1) % window];
            best_history[generation as usize % window] = best;
            stability = if best == oldest {
                best / 1e-4
            } else {
                best / (best - oldest)
            };

            if best > best_ever {
                best_ever = best;
                stalled_generations = 0;
            } else {
                stalled_generations += 1;
            }

            debug!(
                "generation {}: best score {:.4}, stability {:.2}, stalled for {}",
                generation, best, stability, stalled_generations
            );
            sink.report(Progress {
                generation,
                best_score: best,
                stability,
            });
        }

        let best = current.best();
        Ok(TeamSet {
            genome: best.genome.clone(),
            score: best.score,
            teams: self.layout.teams_of(&best.genome),
            generations: generation,
            stability,
            degraded_matches,
            cancelled,
            run_time: start_time.elapsed(),
        })
    }

    /// Check the termination criteria for the next generation boundary.
    fn should_terminate(&self, generation: u32, stalled_generations: u32, stability: f64) -> bool {
        if generation >= self.config.max_generations {
            return true;
        }

        generation >= self.config.min_generations
            && (stalled_generations >= self.config.generations_of_stability
                || stability > self.config.min_score_stability)
    }
}
