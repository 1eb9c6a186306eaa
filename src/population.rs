//! Population management for the genetic algorithm.

use crate::ancestry::Ancestry;
use crate::error::{GaError, GaResult};
use crate::fitness::FitnessFunction;
use crate::genome::Genome;
use crate::layout::TeamLayout;
use rand::Rng;

/// One population slot: a genome together with its score and ancestry.
/// The slot's index within the population is its identifier for kinship
/// tracking.
#[derive(Debug, Clone)]
pub struct Slot {
    /// The candidate assignment
    pub genome: Genome,
    /// Fitness of the genome; set once per generation by `evaluate`
    pub score: f64,
    /// Bounded-depth ancestor record
    pub ancestry: Ancestry,
}

/// A full generation of genomes, owned by value in an arena of slots, plus
/// an index vector ordered by descending score.
#[derive(Debug, Clone)]
pub struct Population {
    slots: Vec<Slot>,
    ordered: Vec<usize>,
}

impl Population {
    /// Create an initial population of uniformly random genomes with empty
    /// ancestry. Scores start at zero; call `evaluate` before selection.
    pub fn random<R: Rng>(genome_size: usize, population_size: usize, rng: &mut R) -> Self {
        let slots = (0..population_size)
            .map(|_| Slot {
                genome: Genome::random(genome_size, rng),
                score: 0.0,
                ancestry: Ancestry::empty(),
            })
            .collect();

        Population {
            slots,
            ordered: (0..population_size).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the population holds no genomes.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Access a slot by its identifier.
    pub fn slot(&self, id: usize) -> &Slot {
        &self.slots[id]
    }

    /// Mutable access to a slot by its identifier.
    pub fn slot_mut(&mut self, id: usize) -> &mut Slot {
        &mut self.slots[id]
    }

    /// Slot identifier of the genome at the given score rank (0 = best).
    pub fn slot_id_at_rank(&self, rank: usize) -> usize {
        self.ordered[rank]
    }

    /// Slot holding the genome at the given score rank (0 = best).
    pub fn by_rank(&self, rank: usize) -> &Slot {
        &self.slots[self.ordered[rank]]
    }

    /// The best-scoring slot. Requires a prior `sort_by_score`.
    pub fn best(&self) -> &Slot {
        self.by_rank(0)
    }

    /// Score every slot with the fitness function. A non-finite score
    /// aborts immediately rather than corrupting later selection rounds.
    pub fn evaluate<F: FitnessFunction>(&mut self, fitness: &F, layout: &TeamLayout) -> GaResult<()> {
        for (id, slot) in self.slots.iter_mut().enumerate() {
            let score = fitness.score(&slot.genome, layout);
            if !score.is_finite() {
                return Err(GaError::Scoring { slot: id, score });
            }
            slot.score = score;
        }
        Ok(())
    }

    /// Re-sort the rank index so that rank 0 is the highest score.
    pub fn sort_by_score(&mut self) {
        let slots = &self.slots;
        self.ordered.sort_by(|&a, &b| {
            slots[b]
                .score
                .partial_cmp(&slots[a].score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}
