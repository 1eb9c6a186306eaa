//! Genome representation: one candidate team assignment.

use rand::seq::SliceRandom;
use rand::Rng;

/// A candidate assignment of students to teams, encoded as a permutation of
/// the student indices `0..len`. Team membership is read off the permutation
/// in contiguous runs whose lengths come from a
/// [`TeamLayout`](crate::layout::TeamLayout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    order: Vec<usize>,
}

impl Genome {
    /// Create a genome holding the identity assignment `0, 1, .., size - 1`.
    pub fn identity(size: usize) -> Self {
        Genome {
            order: (0..size).collect(),
        }
    }

    /// Create a uniformly random assignment of `size` students.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        let mut genome = Self::identity(size);
        genome.order.shuffle(rng);
        genome
    }

    /// Build a genome directly from an ordering of student indices.
    pub fn from_order(order: Vec<usize>) -> Self {
        Genome { order }
    }

    /// Number of students in the assignment.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the genome holds no students.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The full ordering as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Student index stored at `position`.
    pub fn get(&self, position: usize) -> usize {
        self.order[position]
    }

    /// Swap the students at two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
    }

    /// Check that every index in `0..len` appears exactly once.
    pub fn is_valid_permutation(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        for &student in &self.order {
            if student >= self.order.len() || seen[student] {
                return false;
            }
            seen[student] = true;
        }
        true
    }
}
