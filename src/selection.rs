//! Tournament selection of parent pairs with kinship avoidance.

use crate::ancestry::Ancestry;
use crate::config::GaConfig;
use crate::error::{GaError, GaResult};
use crate::population::Population;
use log::warn;
use rand::Rng;

/// Transient view of one tournament entrant; lives only for the duration of
/// a single selection call.
#[derive(Debug, Clone, Copy)]
struct TournamentPlayer {
    slot: usize,
    score: f64,
}

/// A selected mating pair: the parents' slot identifiers and the combined
/// ancestry record their child will carry.
#[derive(Debug, Clone)]
pub struct ParentPair {
    /// Slot of the first parent
    pub mom: usize,
    /// Slot of the second parent
    pub dad: usize,
    /// Ancestry record for the child
    pub ancestry: Ancestry,
    /// True when the kinship search ran out of attempts and the pair was
    /// accepted without a full relatedness guarantee
    pub degraded: bool,
}

/// Select two parents from the population by tournament.
///
/// A tournament of `tournament_size` genomes is drawn uniformly with
/// replacement (duplicates are fine, which keeps small populations
/// well-defined). Both parents are picked by geometric rank bias: the best
/// remaining entrant is accepted with `top_pick_likelihood`, otherwise the
/// next one is tried. The second parent is then advanced past any candidate
/// that shares an ancestor with the first within `max_kinship_generations`,
/// up to `max_kinship_attempts` tries before settling for the best
/// available unrelated-or-not mate.
pub fn select_parents<R: Rng>(
    population: &Population,
    config: &GaConfig,
    rng: &mut R,
) -> ParentPair {
    let players = draw_tournament(population, config.tournament_size, rng);

    let mom_rank = biased_rank(config.top_pick_likelihood, rng) % players.len();
    let mom = players[mom_rank].slot;

    // A single-genome population is the one case where a genome may mate
    // with itself.
    if population.len() == 1 {
        return pair_from(population, config, mom, mom, false);
    }

    let (dad, degraded) = match pick_mate(population, config, &players, mom_rank, rng) {
        Ok(dad) => (dad, false),
        Err(GaError::Exhaustion { attempts }) => {
            let dad = best_available_mate(population, &players, mom);
            warn!(
                "kinship search gave up after {} attempts; accepting slot {} without a full relatedness check",
                attempts, dad
            );
            (dad, true)
        }
        Err(_) => unreachable!("kinship search only reports exhaustion"),
    };

    pair_from(population, config, mom, dad, degraded)
}

/// Draw the tournament: random score ranks, sorted so the list runs from
/// the best entrant to the worst.
fn draw_tournament<R: Rng>(
    population: &Population,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<TournamentPlayer> {
    let mut ranks: Vec<usize> = (0..tournament_size)
        .map(|_| rng.gen_range(0..population.len()))
        .collect();
    ranks.sort_unstable();

    ranks
        .into_iter()
        .map(|rank| TournamentPlayer {
            slot: population.slot_id_at_rank(rank),
            score: population.by_rank(rank).score,
        })
        .collect()
}

/// Geometric rank pick: accept the current rank with the given likelihood,
/// otherwise move down one and try again.
fn biased_rank<R: Rng>(likelihood: f64, rng: &mut R) -> usize {
    let mut rank = 0;
    while !rng.gen_bool(likelihood) {
        rank += 1;
    }
    rank
}

/// Find a mate for the genome at `mom_rank`, advancing through the
/// tournament (wrapping at the end) past related candidates. Bounded by the
/// configured attempt budget.
fn pick_mate<R: Rng>(
    population: &Population,
    config: &GaConfig,
    players: &[TournamentPlayer],
    mom_rank: usize,
    rng: &mut R,
) -> GaResult<usize> {
    let size = players.len();
    let mom = players[mom_rank].slot;
    let mom_ancestry = &population.slot(mom).ancestry;

    // Rank bias for the second parent, rejecting the first parent's rank.
    let mut rank = 0;
    if size > 1 {
        while !rng.gen_bool(config.top_pick_likelihood) || rank % size == mom_rank {
            rank += 1;
        }
    }

    let mut attempts = 0;
    loop {
        let candidate = players[rank % size].slot;
        let acceptable = candidate != mom
            && !population
                .slot(candidate)
                .ancestry
                .related_within(mom_ancestry, config.max_kinship_generations);
        if acceptable {
            return Ok(candidate);
        }
        if attempts >= config.max_kinship_attempts {
            return Err(GaError::Exhaustion { attempts });
        }
        attempts += 1;
        rank += 1;
    }
}

/// Best-effort fallback once the kinship budget is spent: the best-scoring
/// tournament entrant on a different slot, or failing that the best-scoring
/// slot anywhere in the population.
fn best_available_mate(
    population: &Population,
    players: &[TournamentPlayer],
    mom: usize,
) -> usize {
    players
        .iter()
        .find(|player| player.slot != mom)
        .map(|player| player.slot)
        .unwrap_or_else(|| {
            (0..population.len())
                .map(|rank| population.slot_id_at_rank(rank))
                .find(|&slot| slot != mom)
                .expect("population with more than one slot has an alternate mate")
        })
}

fn pair_from(
    population: &Population,
    config: &GaConfig,
    mom: usize,
    dad: usize,
    degraded: bool,
) -> ParentPair {
    let ancestry = Ancestry::from_parents(
        mom,
        dad,
        &population.slot(mom).ancestry,
        &population.slot(dad).ancestry,
        config.max_kinship_generations,
    );

    ParentPair {
        mom,
        dad,
        ancestry,
        degraded,
    }
}
