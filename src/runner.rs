//! Running a whole optimization on a worker thread.

use crate::config::GaConfig;
use crate::error::GaResult;
use crate::fitness::FitnessFunction;
use crate::layout::TeamLayout;
use crate::progress::{CancelToken, Progress, ProgressCell};
use crate::{Optimizer, TeamSet};
use std::thread::{self, JoinHandle};

/// Handle to an optimization running on its own thread: lets the caller
/// cancel the run, poll the latest progress, and collect the result.
pub struct OptimizationHandle {
    join: JoinHandle<GaResult<TeamSet>>,
    cancel: CancelToken,
    progress: ProgressCell,
}

impl OptimizationHandle {
    /// Ask the run to stop at its next generation boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the run's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The most recent progress snapshot, if any generation has completed.
    pub fn latest_progress(&self) -> Option<Progress> {
        self.progress.latest()
    }

    /// True once the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the run and return its result.
    pub fn join(self) -> GaResult<TeamSet> {
        self.join.join().expect("optimization thread panicked")
    }
}

/// Validate the configuration, then run the optimizer on a new worker
/// thread. Configuration errors surface here, on the caller's thread,
/// before anything is spawned.
pub fn spawn<F>(
    num_students: usize,
    layout: TeamLayout,
    fitness: F,
    config: GaConfig,
) -> GaResult<OptimizationHandle>
where
    F: FitnessFunction + Send + 'static,
{
    let mut optimizer = Optimizer::new(num_students, layout, fitness, config)?;

    let cancel = CancelToken::new();
    let progress = ProgressCell::new();
    let worker_cancel = cancel.clone();
    let mut worker_progress = progress.clone();

    let join = thread::spawn(move || optimizer.run_with(&mut worker_progress, &worker_cancel));

    Ok(OptimizationHandle {
        join,
        cancel,
        progress,
    })
}
