//! Configuration parameters for the genetic optimizer.

use crate::error::{GaError, GaResult};
use crate::layout::TeamLayout;
use serde::{Deserialize, Serialize};

// Working parameters are tiered by the number of students being placed:
// small groups get a large, diverse genepool with a gentle rank bias, while
// large groups keep the search tractable with a smaller genepool and a
// stronger pull toward top genomes (their genomes are already distinct).
const GROUP_SIZE_TIERS: [usize; 3] = [24, 75, 150];
const POPULATION_SIZES: [usize; 4] = [30_000, 15_000, 7_500, 3_000];
const TOP_PICK_LIKELIHOODS: [f64; 4] = [0.33, 0.50, 0.66, 0.80];
const KINSHIP_GENERATIONS: [usize; 4] = [3, 3, 2, 2];

/// Settings for one optimization run. Built once, validated once, and
/// treated as immutable while the run is in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of genomes in each generation
    pub population_size: usize,
    /// Number of genomes drawn (with replacement) into each tournament
    pub tournament_size: usize,
    /// Probability of accepting the best remaining tournament genome as a parent
    pub top_pick_likelihood: f64,
    /// Number of top genomes cloned unchanged into the next generation
    pub num_elites: usize,
    /// Probability of applying (another) swap mutation to a child
    pub mutation_likelihood: f64,
    /// How many generations back the kinship check compares ancestors
    pub max_kinship_generations: usize,
    /// Attempt budget for the kinship search before settling for the best available mate
    pub max_kinship_attempts: usize,
    /// Keep optimizing for at least this many generations
    pub min_generations: u32,
    /// Hard stop after this many generations
    pub max_generations: u32,
    /// Width of the trailing window used for the stability check
    pub generations_of_stability: u32,
    /// Stability ratio above which the score is considered converged
    pub min_score_stability: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: POPULATION_SIZES[0],
            tournament_size: 60,
            top_pick_likelihood: TOP_PICK_LIKELIHOODS[0],
            num_elites: 3,
            mutation_likelihood: 0.50,
            max_kinship_generations: KINSHIP_GENERATIONS[0],
            max_kinship_attempts: 180,
            min_generations: 40,
            max_generations: 500,
            generations_of_stability: 25,
            min_score_stability: 100.0,
        }
    }
}

impl GaConfig {
    /// Create a configuration with the default working parameters.
    pub fn new() -> Self {
        GaConfig::default()
    }

    /// Pick working parameters for the given number of students, using the
    /// same size-class tiers the desktop application applies per run.
    pub fn for_group_size(num_students: usize) -> Self {
        let tier = GROUP_SIZE_TIERS
            .iter()
            .position(|&threshold| num_students <= threshold)
            .unwrap_or(GROUP_SIZE_TIERS.len());

        GaConfig {
            population_size: POPULATION_SIZES[tier],
            top_pick_likelihood: TOP_PICK_LIKELIHOODS[tier],
            max_kinship_generations: KINSHIP_GENERATIONS[tier],
            ..GaConfig::default()
        }
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the likelihood of picking the best remaining tournament genome.
    pub fn with_top_pick_likelihood(mut self, likelihood: f64) -> Self {
        self.top_pick_likelihood = likelihood;
        self
    }

    /// Set the number of elite genomes.
    pub fn with_num_elites(mut self, n: usize) -> Self {
        self.num_elites = n;
        self
    }

    /// Set the mutation likelihood.
    pub fn with_mutation_likelihood(mut self, likelihood: f64) -> Self {
        self.mutation_likelihood = likelihood;
        self
    }

    /// Set how many generations back the kinship check looks.
    pub fn with_max_kinship_generations(mut self, generations: usize) -> Self {
        self.max_kinship_generations = generations;
        self
    }

    /// Set the attempt budget for the kinship search.
    pub fn with_max_kinship_attempts(mut self, attempts: usize) -> Self {
        self.max_kinship_attempts = attempts;
        self
    }

    /// Set the minimum number of generations.
    pub fn with_min_generations(mut self, generations: u32) -> Self {
        self.min_generations = generations;
        self
    }

    /// Set the maximum number of generations.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the width of the stability window.
    pub fn with_generations_of_stability(mut self, generations: u32) -> Self {
        self.generations_of_stability = generations;
        self
    }

    /// Set the stability ratio threshold.
    pub fn with_min_score_stability(mut self, stability: f64) -> Self {
        self.min_score_stability = stability;
        self
    }

    /// Validate the configuration against the students and layout for this
    /// run. Called before any population is allocated.
    pub fn validate(&self, genome_size: usize, layout: &TeamLayout) -> GaResult<()> {
        if genome_size == 0 {
            return Err(GaError::Configuration(
                "cannot form teams from zero students".to_string(),
            ));
        }
        layout.check_genome_size(genome_size)?;
        if self.population_size == 0 {
            return Err(GaError::Configuration(
                "population size must be positive".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GaError::Configuration(
                "tournament size must be positive".to_string(),
            ));
        }
        if self.num_elites > self.population_size {
            return Err(GaError::Configuration(format!(
                "{} elites cannot fit in a population of {}",
                self.num_elites, self.population_size
            )));
        }
        if !(self.top_pick_likelihood > 0.0 && self.top_pick_likelihood <= 1.0) {
            return Err(GaError::Configuration(format!(
                "top pick likelihood must be in (0, 1], got {}",
                self.top_pick_likelihood
            )));
        }
        if !(0.0..1.0).contains(&self.mutation_likelihood) {
            return Err(GaError::Configuration(format!(
                "mutation likelihood must be in [0, 1), got {}",
                self.mutation_likelihood
            )));
        }
        if self.min_generations > self.max_generations {
            return Err(GaError::Configuration(format!(
                "min generations ({}) exceeds max generations ({})",
                self.min_generations, self.max_generations
            )));
        }
        if self.generations_of_stability == 0 {
            return Err(GaError::Configuration(
                "stability window must cover at least one generation".to_string(),
            ));
        }
        Ok(())
    }
}
