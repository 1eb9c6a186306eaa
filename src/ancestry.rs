//! Ancestry records used to keep closely related genomes from mating.

use itertools::Itertools;

/// Identifier of a genome within its generation's population (its slot index).
pub type SlotId = usize;

/// Bounded-depth record of a genome's ancestors, stored as generation
/// levels: level 1 holds {mom, dad}, level 2 the four grandparents, and so
/// on. A full record for `g` generations holds `2^(g+1) - 2` IDs. Initial
/// genomes carry an empty record, so levels fill in over the first few
/// generations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestry {
    levels: Vec<Vec<SlotId>>,
}

impl Ancestry {
    /// An empty record, used for the randomly created initial population.
    pub fn empty() -> Self {
        Ancestry { levels: Vec::new() }
    }

    /// Number of ID entries a full record covering `generations` holds.
    pub fn capacity_for(generations: usize) -> usize {
        (1usize << (generations + 1)) - 2
    }

    /// Number of generation levels currently recorded.
    pub fn generations(&self) -> usize {
        self.levels.len()
    }

    /// Ancestor IDs at one generation level (1 = parents). Empty when the
    /// record does not reach that far back.
    pub fn level(&self, generation: usize) -> &[SlotId] {
        if generation == 0 || generation > self.levels.len() {
            &[]
        } else {
            &self.levels[generation - 1]
        }
    }

    /// Combine two parents' records into the child's record: level 1 is the
    /// parents' own IDs, and each deeper level is mom's previous level
    /// followed by dad's, truncated to `max_generations` levels.
    pub fn from_parents(
        mom_id: SlotId,
        dad_id: SlotId,
        mom: &Ancestry,
        dad: &Ancestry,
        max_generations: usize,
    ) -> Self {
        if max_generations == 0 {
            return Ancestry::empty();
        }

        let mut levels = Vec::with_capacity(max_generations);
        levels.push(vec![mom_id, dad_id]);

        for generation in 2..=max_generations {
            let mut level =
                Vec::with_capacity(mom.level(generation - 1).len() + dad.level(generation - 1).len());
            level.extend_from_slice(mom.level(generation - 1));
            level.extend_from_slice(dad.level(generation - 1));
            if level.is_empty() {
                break;
            }
            levels.push(level);
        }

        Ancestry { levels }
    }

    /// Shift a record one generation as if the genome had mated with itself.
    /// Used when an elite is cloned into the next generation.
    pub fn from_self(id: SlotId, own: &Ancestry, max_generations: usize) -> Self {
        Self::from_parents(id, id, own, own, max_generations)
    }

    /// True when the two records share any ancestor ID within the first
    /// `generations` levels, comparing level against level as the mating
    /// check requires.
    pub fn related_within(&self, other: &Ancestry, generations: usize) -> bool {
        (1..=generations).any(|generation| {
            self.level(generation)
                .iter()
                .cartesian_product(other.level(generation))
                .any(|(a, b)| a == b)
        })
    }
}
