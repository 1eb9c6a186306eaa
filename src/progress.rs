//! Progress reporting and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Snapshot of the optimizer's state at the end of a generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Generations completed so far (0 is the initial random population)
    pub generation: u32,
    /// Best score found in the current population
    pub best_score: f64,
    /// Current stability ratio; large values mean the score has settled
    pub stability: f64,
}

/// Receives fire-and-forget progress notifications. Implementations must
/// return promptly; the generation loop never waits on a receiver.
pub trait ProgressSink {
    /// Accept one progress snapshot.
    fn report(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress),
{
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// A sink that discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _progress: Progress) {}
}

/// Shared cell holding only the most recent progress snapshot. A slow or
/// absent reader costs nothing: each report overwrites the previous one, so
/// no backlog can build up.
#[derive(Debug, Clone, Default)]
pub struct ProgressCell {
    latest: Arc<Mutex<Option<Progress>>>,
}

impl ProgressCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        ProgressCell::default()
    }

    /// Read the most recent snapshot, if any generation has completed.
    pub fn latest(&self) -> Option<Progress> {
        *self.latest.lock().expect("progress cell poisoned")
    }
}

impl ProgressSink for ProgressCell {
    fn report(&mut self, progress: Progress) {
        *self.latest.lock().expect("progress cell poisoned") = Some(progress);
    }
}

/// Cooperative cancellation flag. The optimizer reads it once per
/// generation and finishes the current generation before stopping.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request that the run stop at the next generation boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
