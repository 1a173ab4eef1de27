//! Runs a sweep on a background thread and streams progress back.
//!
//! The engine itself is synchronous. A presenter that must stay responsive
//! spawns the sweep here and drains [`SweepEvent`]s from the channel on its
//! own thread. There is no cancellation: dropping the receiver only stops
//! delivery, the sweep still runs to completion.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::{BenchError, SweepError};
use crate::sweep::{AggregateResult, MatrixDimension, SweepProgress, run_sweep_with};

/// Messages sent from the worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    DimensionStarted {
        index: usize,
        total: usize,
        dimension: MatrixDimension,
    },
    AggregateReady {
        index: usize,
        result: AggregateResult,
    },
    /// Last event. `completed` is the number of aggregates produced.
    Finished { completed: usize, failed: bool },
}

impl From<SweepProgress> for SweepEvent {
    fn from(p: SweepProgress) -> Self {
        match p {
            SweepProgress::Started {
                index,
                total,
                dimension,
            } => SweepEvent::DimensionStarted {
                index,
                total,
                dimension,
            },
            SweepProgress::Finished { index, result } => SweepEvent::AggregateReady { index, result },
        }
    }
}

/// Handle to a running background sweep.
pub struct SweepWorker {
    events: Receiver<SweepEvent>,
    handle: JoinHandle<Result<Vec<AggregateResult>, SweepError>>,
    total: usize,
}

/// Spawns `run_sweep` over `dimensions` on a new thread.
pub fn spawn_sweep(dimensions: Vec<MatrixDimension>, repetitions: usize) -> SweepWorker {
    let (tx, events) = mpsc::channel();
    let total = dimensions.len();

    let handle = thread::spawn(move || {
        let result = run_sweep_with(&dimensions, repetitions, |p| {
            let _ = tx.send(p.into());
        });
        let (completed, failed) = match &result {
            Ok(r) => (r.len(), false),
            Err(e) => (e.completed.len(), true),
        };
        let _ = tx.send(SweepEvent::Finished { completed, failed });
        result
    });

    SweepWorker {
        events,
        handle,
        total,
    }
}

impl SweepWorker {
    /// Progress stream; ends once the worker thread exits.
    pub fn events(&self) -> &Receiver<SweepEvent> {
        &self.events
    }

    /// Waits for the sweep to finish.
    ///
    /// A panicking worker is reported as [`BenchError::WorkerPanicked`].
    pub fn join(self) -> Result<Vec<AggregateResult>, SweepError> {
        let total = self.total;
        self.handle
            .join()
            .unwrap_or_else(|_| Err(SweepError::new(Vec::new(), total, BenchError::WorkerPanicked)))
    }
}
