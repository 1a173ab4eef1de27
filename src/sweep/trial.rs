//! One timed comparison of both loop orders at a single size.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::matrix::{LoopOrder, SquareMatrix, seeded_operands};

/// One timed kernel run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialMeasurement {
    pub order: LoopOrder,
    pub elapsed_secs: f64,
    /// Multiply-adds counted by the kernel
    pub multiply_adds: u64,
    /// Sum of the product matrix
    pub checksum: f64,
}

impl TrialMeasurement {
    fn empty(order: LoopOrder) -> Self {
        Self {
            order,
            elapsed_secs: 0.0,
            multiply_adds: 0,
            checksum: 0.0,
        }
    }
}

/// Both orders measured on the same operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub n: usize,
    pub ijk: TrialMeasurement,
    pub ikj: TrialMeasurement,
}

impl TrialOutcome {
    /// `(ijk seconds, ikj seconds)`
    pub fn times(&self) -> (f64, f64) {
        (self.ijk.elapsed_secs, self.ikj.elapsed_secs)
    }
}

/// Multiplies seeded `n × n` matrices in both loop orders and times each.
///
/// A and B are shared by both runs; C is zeroed in between. `n = 0`
/// returns zero timings without allocating.
///
/// # Errors
///
/// [`BenchError::AllocationFailure`](crate::error::BenchError::AllocationFailure)
/// if the three matrices cannot be allocated.
pub fn run_trial(n: usize) -> Result<TrialOutcome> {
    if n == 0 {
        return Ok(TrialOutcome {
            n,
            ijk: TrialMeasurement::empty(LoopOrder::Ijk),
            ikj: TrialMeasurement::empty(LoopOrder::Ikj),
        });
    }

    let (a, b) = seeded_operands(n)?;
    let mut c = SquareMatrix::try_zeroed(n)?;

    let ijk = timed(LoopOrder::Ijk, &a, &b, &mut c);
    c.clear();
    let ikj = timed(LoopOrder::Ikj, &a, &b, &mut c);

    debug!(
        n,
        ijk_secs = ijk.elapsed_secs,
        ikj_secs = ikj.elapsed_secs,
        "trial complete"
    );

    Ok(TrialOutcome { n, ijk, ikj })
}

fn timed(order: LoopOrder, a: &SquareMatrix, b: &SquareMatrix, c: &mut SquareMatrix) -> TrialMeasurement {
    let n = a.n();
    let start = Instant::now();
    let multiply_adds = order.multiply(
        black_box(a.as_slice()),
        black_box(b.as_slice()),
        c.as_mut_slice(),
        n,
    );
    let elapsed_secs = start.elapsed().as_secs_f64();
    black_box(c.as_slice());

    TrialMeasurement {
        order,
        elapsed_secs,
        multiply_adds,
        checksum: c.checksum(),
    }
}
