//! Team-size layout: how a genome is partitioned into teams.

use crate::error::{GaError, GaResult};
use crate::genome::Genome;
use std::ops::Range;

/// The ordered team sizes for one optimization run, with precomputed
/// boundary offsets into the genome. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLayout {
    sizes: Vec<usize>,
    // offsets[t] is the genome position where team t starts;
    // offsets[num_teams] == total_members
    offsets: Vec<usize>,
}

impl TeamLayout {
    /// Create a layout from the given team sizes.
    pub fn new(sizes: &[usize]) -> GaResult<Self> {
        if sizes.is_empty() {
            return Err(GaError::Configuration(
                "team layout must contain at least one team".to_string(),
            ));
        }
        if let Some(team) = sizes.iter().position(|&s| s == 0) {
            return Err(GaError::Configuration(format!(
                "team {} has size zero; every team needs at least one member",
                team
            )));
        }

        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        let mut position = 0;
        for &size in sizes {
            offsets.push(position);
            position += size;
        }
        offsets.push(position);

        Ok(TeamLayout {
            sizes: sizes.to_vec(),
            offsets,
        })
    }

    /// Number of teams.
    pub fn num_teams(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of students across all teams.
    pub fn total_members(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    /// Size of one team.
    pub fn team_size(&self, team: usize) -> usize {
        self.sizes[team]
    }

    /// All team sizes.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Genome position of a team boundary; `boundary` ranges over
    /// `0..=num_teams`, where `num_teams` maps to the end of the genome.
    pub fn offset(&self, boundary: usize) -> usize {
        self.offsets[boundary]
    }

    /// Genome positions occupied by one team.
    pub fn team_range(&self, team: usize) -> Range<usize> {
        self.offsets[team]..self.offsets[team + 1]
    }

    /// Check that this layout partitions a genome of `genome_size` students.
    pub fn check_genome_size(&self, genome_size: usize) -> GaResult<()> {
        if self.total_members() != genome_size {
            return Err(GaError::Configuration(format!(
                "team sizes sum to {} but there are {} students to place",
                self.total_members(),
                genome_size
            )));
        }
        Ok(())
    }

    /// Split a genome into per-team rosters of student indices.
    pub fn teams_of(&self, genome: &Genome) -> Vec<Vec<usize>> {
        (0..self.num_teams())
            .map(|team| genome.as_slice()[self.team_range(team)].to_vec())
            .collect()
    }
}
