//! Run statistics and small formatting helpers.

use crate::TeamSet;
use std::time::Duration;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Summary of a finished optimization run.
pub struct RunStatistics {
    pub generations: u32,
    pub runtime: Duration,
    pub best_score: f64,
    pub stability: f64,
    pub num_teams: usize,
    pub degraded_matches: usize,
    pub cancelled: bool,
}

impl RunStatistics {
    /// Collect statistics from a run result.
    pub fn from_result(result: &TeamSet) -> Self {
        RunStatistics {
            generations: result.generations,
            runtime: result.run_time,
            best_score: result.score,
            stability: result.stability,
            num_teams: result.teams.len(),
            degraded_matches: result.degraded_matches,
            cancelled: result.cancelled,
        }
    }

    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Run Statistics:
- Generations: {}
- Runtime: {}
- Best Score: {:.4}
- Final Stability: {:.2}
- Teams Formed: {}
- Degraded Matches: {}
- Cancelled: {}",
            self.generations,
            format_duration(self.runtime),
            self.best_score,
            self.stability,
            self.num_teams,
            self.degraded_matches,
            self.cancelled
        )
    }
}
