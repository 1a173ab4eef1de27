//! Cache-relative problem sizing and the sweep driver.
//!
//! A sweep turns one cache capacity into a list of square matrix sizes
//! whose combined footprint is a fixed fraction (or multiple) of that
//! capacity, then times both loop orders at each size.

pub mod aggregate;
pub mod trial;

pub use aggregate::{AggregateResult, SweepProgress, run_sweep, run_sweep_with};
pub use trial::{TrialMeasurement, TrialOutcome, run_trial};

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Multipliers applied to the base capacity, ascending.
pub const DEFAULT_MULTIPLIERS: [f64; 10] = [0.1, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 4.0];

/// Trials per dimension.
pub const DEFAULT_REPETITIONS: usize = 5;

/// Memory taken by one element of each resident matrix.
///
/// The sizing divisor is `element_bytes * matrices`: with three `f64`
/// matrices (A, B and C) that is 24 bytes per element index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Bytes per matrix element
    pub element_bytes: usize,
    /// Matrices resident at once
    pub matrices: usize,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            element_bytes: std::mem::size_of::<f64>(),
            matrices: 3,
        }
    }
}

impl Footprint {
    /// Rejects a zero element width or matrix count.
    pub fn new(element_bytes: usize, matrices: usize) -> Result<Self> {
        if element_bytes == 0 || matrices == 0 {
            return Err(BenchError::InvalidFootprint {
                element_bytes,
                matrices,
            });
        }
        Ok(Self {
            element_bytes,
            matrices,
        })
    }

    /// Bytes consumed per `(i, j)` index across all resident matrices.
    pub fn divisor(&self) -> u64 {
        (self.element_bytes as u64).saturating_mul(self.matrices as u64)
    }

    /// Largest `n` such that `n² × divisor ≤ target_bytes`.
    pub fn dimension_for(&self, target_bytes: u64) -> usize {
        let d = self.divisor().max(1);
        // The float estimate can be off by one for large targets; settle it exactly.
        let mut n = (target_bytes as f64 / d as f64).sqrt() as u64;
        while n > 0 && fits(n, d) > target_bytes as u128 {
            n -= 1;
        }
        while fits(n + 1, d) <= target_bytes as u128 {
            n += 1;
        }
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

fn fits(n: u64, d: u64) -> u128 {
    (n as u128) * (n as u128) * (d as u128)
}

/// One point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixDimension {
    /// Multiplier applied to the base capacity
    pub multiplier: f64,
    /// `trunc(base × multiplier)`
    pub target_bytes: u64,
    /// Matrix side length
    pub n: usize,
}

impl MatrixDimension {
    /// A dimension with no sizing provenance, for running a fixed `n`.
    pub fn fixed(n: usize) -> Self {
        Self {
            multiplier: 1.0,
            target_bytes: 0,
            n,
        }
    }
}

/// Ordered multipliers applied to a base capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    multipliers: Vec<f64>,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            multipliers: DEFAULT_MULTIPLIERS.to_vec(),
        }
    }
}

impl SweepPlan {
    /// Builds a plan from custom multipliers. They must be finite, positive and ascending.
    pub fn new(multipliers: Vec<f64>) -> Result<Self> {
        let mut prev = 0.0;
        for &m in &multipliers {
            if !m.is_finite() || m <= 0.0 || m < prev {
                return Err(BenchError::InvalidMultiplier(m));
            }
            prev = m;
        }
        Ok(Self { multipliers })
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    /// Dimensions for `base_capacity_bytes` with the default three-`f64` footprint.
    pub fn plan(&self, base_capacity_bytes: u64) -> Vec<MatrixDimension> {
        self.plan_with(base_capacity_bytes, Footprint::default())
    }

    /// Dimensions for `base_capacity_bytes`, sized with `footprint`'s divisor.
    pub fn plan_with(&self, base_capacity_bytes: u64, footprint: Footprint) -> Vec<MatrixDimension> {
        self.multipliers
            .iter()
            .map(|&multiplier| {
                let target_bytes = (base_capacity_bytes as f64 * multiplier) as u64;
                MatrixDimension {
                    multiplier,
                    target_bytes,
                    n: footprint.dimension_for(target_bytes),
                }
            })
            .collect()
    }
}

/// Dimensions for the default multipliers and footprint.
///
/// A capacity of 0 yields ten `n = 0` points; no fallback is applied here.
pub fn plan_sweep(base_capacity_bytes: u64) -> Vec<MatrixDimension> {
    SweepPlan::default().plan(base_capacity_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_mib_at_unit_multiplier() {
        let dims = plan_sweep(1_048_576);
        let unit = dims.iter().find(|d| d.multiplier == 1.0).unwrap();
        assert_eq!(unit.target_bytes, 1_048_576);
        assert_eq!(unit.n, 209);
    }

    #[test]
    fn test_zero_capacity_gives_zero_dimensions() {
        let dims = plan_sweep(0);
        assert_eq!(dims.len(), 10);
        assert!(dims.iter().all(|d| d.n == 0));
    }

    #[test]
    fn test_dimension_exact_on_perfect_squares() {
        let fp = Footprint::default();
        assert_eq!(fp.dimension_for(24 * 100 * 100), 100);
        assert_eq!(fp.dimension_for(24 * 100 * 100 - 1), 99);
        assert_eq!(fp.dimension_for(23), 0);
        assert_eq!(fp.dimension_for(24), 1);
    }

    #[test]
    fn test_custom_footprint_changes_divisor() {
        let fp = Footprint::new(4, 2).unwrap();
        assert_eq!(fp.divisor(), 8);
        assert_eq!(fp.dimension_for(800), 10);
        assert!(Footprint::new(0, 3).is_err());
    }

    #[test]
    fn test_plan_rejects_bad_multipliers() {
        assert!(SweepPlan::new(vec![0.5, 0.25]).is_err());
        assert!(SweepPlan::new(vec![0.0]).is_err());
        assert!(SweepPlan::new(vec![f64::NAN]).is_err());
        assert!(SweepPlan::new(vec![0.5, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_tiny_capacity_repeats_dimensions() {
        // 25, 50 and 75 bytes all collapse to n = 1.
        let dims = plan_sweep(100);
        assert_eq!(dims[0].n, 0);
        assert_eq!(dims[1].n, 1);
        assert_eq!(dims[2].n, 1);
        assert_eq!(dims[3].n, 1);
        assert_eq!(dims[4].n, 2);
        assert!(dims.windows(2).all(|w| w[0].n <= w[1].n));
    }
}
