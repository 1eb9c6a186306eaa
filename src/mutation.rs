//! Swap mutation.

use crate::genome::Genome;
use rand::Rng;

/// Swap the students at two uniformly random genome positions. The two
/// draws are independent, so occasionally they coincide and the genome is
/// left unchanged.
pub fn swap_mutation<R: Rng>(genome: &mut Genome, rng: &mut R) {
    if genome.is_empty() {
        return;
    }

    let a = rng.gen_range(0..genome.len());
    let b = rng.gen_range(0..genome.len());
    genome.swap(a, b);
}

/// Apply swap mutations as a Bernoulli chain: each successful trial at
/// `likelihood` triggers a swap and another trial, so a child receives
/// zero, one, or several swaps.
pub fn mutate_repeatedly<R: Rng>(genome: &mut Genome, likelihood: f64, rng: &mut R) {
    while rng.gen_bool(likelihood) {
        swap_mutation(genome, rng);
    }
}
