//! Unit tests for tournament selection and kinship avoidance.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use teamform::ancestry::Ancestry;
use teamform::config::GaConfig;
use teamform::population::Population;
use teamform::selection::select_parents;

/// Build a population with the given scores, ranked and ready to select
/// from. Genome contents are irrelevant to selection.
fn scored_population(scores: &[f64]) -> Population {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut population = Population::random(6, scores.len(), &mut rng);

    for (slot, &score) in scores.iter().enumerate() {
        population.slot_mut(slot).score = score;
    }
    population.sort_by_score();
    population
}

#[test]
fn test_parents_are_distinct_slots() {
    let population = scored_population(&[10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    let config = GaConfig::new()
        .with_population_size(8)
        .with_tournament_size(6)
        .with_top_pick_likelihood(0.5);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let pair = select_parents(&population, &config, &mut rng);
        assert_ne!(pair.mom, pair.dad, "parents came from the same slot");
    }
}

#[test]
fn test_single_member_population_mates_with_itself() {
    let population = scored_population(&[1.0]);
    let config = GaConfig::new()
        .with_population_size(1)
        .with_tournament_size(4);
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    let pair = select_parents(&population, &config, &mut rng);

    assert_eq!(pair.mom, 0);
    assert_eq!(pair.dad, 0);
}

#[test]
fn test_certain_top_pick_selects_best_genome() {
    let population = scored_population(&[2.0, 9.0, 4.0, 1.0]);
    // A tournament much larger than the population all but guarantees the
    // top-ranked genome is drawn; likelihood 1.0 then always accepts it.
    let config = GaConfig::new()
        .with_population_size(4)
        .with_tournament_size(64)
        .with_top_pick_likelihood(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    for _ in 0..20 {
        let pair = select_parents(&population, &config, &mut rng);
        assert_eq!(pair.mom, 1, "slot 1 holds the top score");
        assert_ne!(pair.dad, pair.mom);
    }
}

#[test]
fn test_fully_related_population_terminates_degraded() {
    let mut population = scored_population(&[8.0, 7.0, 6.0, 5.0, 4.0, 3.0]);

    // Every genome lists ancestor 999 as a parent, so every candidate pair
    // fails the kinship check.
    for slot in 0..6 {
        population.slot_mut(slot).ancestry =
            Ancestry::from_parents(999, 1000 + slot, &Ancestry::empty(), &Ancestry::empty(), 1);
    }

    let config = GaConfig::new()
        .with_population_size(6)
        .with_tournament_size(4)
        .with_max_kinship_generations(1)
        .with_max_kinship_attempts(10);
    let mut rng = ChaCha8Rng::seed_from_u64(37);

    for _ in 0..50 {
        let pair = select_parents(&population, &config, &mut rng);
        assert!(pair.degraded, "a fully related population cannot pass the check");
        assert_ne!(pair.mom, pair.dad);
    }
}

#[test]
fn test_unrelated_population_never_degrades() {
    let mut population = scored_population(&[8.0, 7.0, 6.0, 5.0, 4.0, 3.0]);

    for slot in 0..6 {
        population.slot_mut(slot).ancestry = Ancestry::from_parents(
            100 + 2 * slot,
            101 + 2 * slot,
            &Ancestry::empty(),
            &Ancestry::empty(),
            1,
        );
    }

    let config = GaConfig::new()
        .with_population_size(6)
        .with_tournament_size(4)
        .with_max_kinship_generations(1);
    let mut rng = ChaCha8Rng::seed_from_u64(41);

    for _ in 0..100 {
        let pair = select_parents(&population, &config, &mut rng);
        assert!(!pair.degraded);
        assert_ne!(pair.mom, pair.dad);

        let mom_parents = population.slot(pair.mom).ancestry.level(1).to_vec();
        let dad_parents = population.slot(pair.dad).ancestry.level(1).to_vec();
        assert!(
            mom_parents.iter().all(|id| !dad_parents.contains(id)),
            "selected parents share an ancestor"
        );
    }
}

#[test]
fn test_combined_ancestry_layout() {
    let mut population = scored_population(&[5.0, 4.0]);
    population.slot_mut(0).ancestry =
        Ancestry::from_parents(10, 11, &Ancestry::empty(), &Ancestry::empty(), 2);
    population.slot_mut(1).ancestry =
        Ancestry::from_parents(12, 13, &Ancestry::empty(), &Ancestry::empty(), 2);

    let config = GaConfig::new()
        .with_population_size(2)
        .with_tournament_size(8)
        .with_max_kinship_generations(2);
    let mut rng = ChaCha8Rng::seed_from_u64(53);

    let pair = select_parents(&population, &config, &mut rng);

    assert_eq!(pair.ancestry.level(1), &[pair.mom, pair.dad]);
    let mut expected = population.slot(pair.mom).ancestry.level(1).to_vec();
    expected.extend_from_slice(population.slot(pair.dad).ancestry.level(1));
    assert_eq!(pair.ancestry.level(2), expected.as_slice());
}
