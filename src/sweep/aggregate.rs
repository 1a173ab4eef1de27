//! Repeated trials per dimension, reduced to mean timings.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::MatrixDimension;
use super::trial::run_trial;
use crate::error::{BenchError, SweepError};

/// Mean timings for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub n: usize,
    pub multiplier: f64,
    pub target_bytes: u64,
    pub repetitions: usize,
    /// Mean IJK (bad order) seconds
    pub mean_ijk_secs: f64,
    /// Mean IKJ (good order) seconds
    pub mean_ikj_secs: f64,
    /// Multiply-adds per ordering per trial
    pub multiply_adds: u64,
}

impl AggregateResult {
    /// How many times slower IJK was than IKJ. `None` when IKJ measured 0.
    pub fn slowdown(&self) -> Option<f64> {
        (self.mean_ikj_secs > 0.0).then(|| self.mean_ijk_secs / self.mean_ikj_secs)
    }
}

/// Progress notifications from [`run_sweep_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepProgress {
    /// Trials for `dimension` are about to start.
    Started {
        index: usize,
        total: usize,
        dimension: MatrixDimension,
    },
    /// All repetitions of one dimension finished.
    Finished { index: usize, result: AggregateResult },
}

/// Runs `repetitions` trials per dimension and returns mean timings in input order.
///
/// # Errors
///
/// Stops at the first failing trial. The returned [`SweepError`] holds every
/// aggregate completed before it.
pub fn run_sweep(
    dimensions: &[MatrixDimension],
    repetitions: usize,
) -> Result<Vec<AggregateResult>, SweepError> {
    run_sweep_with(dimensions, repetitions, |_| {})
}

/// Same as [`run_sweep`], reporting progress through `on_progress`.
pub fn run_sweep_with<F>(
    dimensions: &[MatrixDimension],
    repetitions: usize,
    mut on_progress: F,
) -> Result<Vec<AggregateResult>, SweepError>
where
    F: FnMut(SweepProgress),
{
    let total = dimensions.len();
    if repetitions == 0 {
        return Err(SweepError::new(Vec::new(), total, BenchError::ZeroRepetitions));
    }

    let mut results = Vec::with_capacity(total);

    for (index, &dimension) in dimensions.iter().enumerate() {
        on_progress(SweepProgress::Started {
            index,
            total,
            dimension,
        });
        info!(
            n = dimension.n,
            multiplier = dimension.multiplier,
            target_kib = dimension.target_bytes / 1024,
            "testing matrix {}x{}",
            dimension.n,
            dimension.n
        );

        let mut total_ijk = 0.0;
        let mut total_ikj = 0.0;
        let mut multiply_adds = 0;

        for _ in 0..repetitions {
            let trial = match run_trial(dimension.n) {
                Ok(t) => t,
                Err(e) => return Err(SweepError::new(results, total, e)),
            };
            total_ijk += trial.ijk.elapsed_secs;
            total_ikj += trial.ikj.elapsed_secs;
            multiply_adds = trial.ijk.multiply_adds;
        }

        let result = AggregateResult {
            n: dimension.n,
            multiplier: dimension.multiplier,
            target_bytes: dimension.target_bytes,
            repetitions,
            mean_ijk_secs: total_ijk / repetitions as f64,
            mean_ikj_secs: total_ikj / repetitions as f64,
            multiply_adds,
        };
        on_progress(SweepProgress::Finished { index, result });
        results.push(result);
    }

    Ok(results)
}
