//! Square matrices and the two loop-order kernels the benchmark compares.
//!
//! Both kernels do the same `n³` multiply-adds and produce the same
//! product. Only the order they touch memory in differs.

pub mod naive_ijk;
pub mod naive_ikj;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Seed used for matrix content, shared by every trial.
pub const CONTENT_SEED: u64 = 12345;

/// Loop nesting order of a matrix multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopOrder {
    /// i-j-k: innermost loop strides B column-wise ("bad order").
    Ijk,
    /// i-k-j: innermost loop walks B and C row-wise ("good order").
    Ikj,
}

impl LoopOrder {
    /// Both orders, in the sequence a trial runs them.
    pub const ALL: [LoopOrder; 2] = [LoopOrder::Ijk, LoopOrder::Ikj];

    /// C += A * B for `n × n` row-major matrices. Returns the multiply-add count.
    ///
    /// # Panics
    ///
    /// Panics if any slice length is not `n * n`.
    pub fn multiply(self, a: &[f64], b: &[f64], c: &mut [f64], n: usize) -> u64 {
        assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
        assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
        assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

        match self {
            LoopOrder::Ijk => naive_ijk::matmul_ijk(a, b, c, n),
            LoopOrder::Ikj => naive_ikj::matmul_ikj(a, b, c, n),
        }
    }
}

/// A row-major `n × n` matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// Allocates a zeroed matrix, reporting allocator exhaustion as an error.
    pub fn try_zeroed(n: usize) -> Result<Self> {
        let len = n.checked_mul(n).ok_or_else(|| alloc_failure(n))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_failure(n))?;
        data.resize(len, 0.0);
        Ok(Self { n, data })
    }

    /// Allocates a matrix filled with integers in `1..=100` drawn from `rng`.
    pub fn try_random(n: usize, rng: &mut StdRng) -> Result<Self> {
        let mut m = Self::try_zeroed(n)?;
        for x in &mut m.data {
            *x = f64::from(rng.gen_range(1u8..=100));
        }
        Ok(m)
    }

    /// Side length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row-major elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Row-major elements, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Zeroes every element in place.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Sum of all elements. Cheap fingerprint for comparing two products.
    pub fn checksum(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// The A and B operands of one trial, generated from [`CONTENT_SEED`].
pub fn seeded_operands(n: usize) -> Result<(SquareMatrix, SquareMatrix)> {
    let mut rng = StdRng::seed_from_u64(CONTENT_SEED);
    let a = SquareMatrix::try_random(n, &mut rng)?;
    let b = SquareMatrix::try_random(n, &mut rng)?;
    Ok((a, b))
}

fn alloc_failure(n: usize) -> BenchError {
    BenchError::AllocationFailure {
        n,
        bytes: n
            .saturating_mul(n)
            .saturating_mul(std::mem::size_of::<f64>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2x2_both_orders() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];

        for order in LoopOrder::ALL {
            let mut c = vec![0.0; 4];
            let ops = order.multiply(&a, &b, &mut c, 2);
            assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0], "{:?}", order);
            assert_eq!(ops, 8);
        }
    }

    #[test]
    fn test_zero_dimension_allocates_nothing() {
        let m = SquareMatrix::try_zeroed(0).unwrap();
        assert!(m.as_slice().is_empty());
        assert_eq!(m.checksum(), 0.0);
    }

    #[test]
    fn test_overflowing_dimension_is_allocation_failure() {
        let err = SquareMatrix::try_zeroed(usize::MAX).unwrap_err();
        assert!(matches!(err, BenchError::AllocationFailure { n, .. } if n == usize::MAX));
    }

    #[test]
    fn test_seeded_operands_reproducible() {
        let (a1, b1) = seeded_operands(9).unwrap();
        let (a2, b2) = seeded_operands(9).unwrap();
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert!(a1.as_slice().iter().all(|&x| (1.0..=100.0).contains(&x)));
    }

    #[test]
    #[should_panic(expected = "B: expected 2x2=4 elements")]
    fn test_multiply_rejects_mismatched_lengths() {
        let a = vec![1.0; 4];
        let b = vec![1.0; 3];
        let mut c = vec![0.0; 4];
        LoopOrder::Ikj.multiply(&a, &b, &mut c, 2);
    }
}
