//! Error types for the team-formation optimizer.

use thiserror::Error;

/// Errors produced while configuring or running an optimization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// The run was misconfigured; raised before any population is created.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The fitness function returned a non-finite score.
    #[error("fitness function returned a non-finite score ({score}) for population slot {slot}")]
    Scoring { slot: usize, score: f64 },

    /// The kinship-avoidance search ran out of attempts.
    #[error("kinship-avoidance search exhausted after {attempts} attempts")]
    Exhaustion { attempts: usize },
}

/// Result type alias for optimizer operations.
pub type GaResult<T> = Result<T, GaError>;
