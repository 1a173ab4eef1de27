//! Error types for the benchmark engine and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

use crate::sweep::AggregateResult;

/// Errors raised by the library.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Matrix buffers for a dimension could not be obtained.
    #[error("cannot allocate three {n}×{n} matrices ({bytes} bytes each)")]
    AllocationFailure {
        /// Requested side length
        n: usize,
        /// Bytes per matrix, saturated on overflow
        bytes: usize,
    },

    /// A sweep was asked to run zero repetitions per dimension.
    #[error("repetitions must be at least 1")]
    ZeroRepetitions,

    /// A sweep multiplier was not a finite positive value, or broke ascending order.
    #[error("invalid sweep multiplier {0}: multipliers must be finite, positive and ascending")]
    InvalidMultiplier(f64),

    /// Element width or matrix count of zero.
    #[error("invalid footprint: {element_bytes} bytes × {matrices} matrices")]
    InvalidFootprint {
        /// Bytes per matrix element
        element_bytes: usize,
        /// Resident matrices
        matrices: usize,
    },

    /// Reading a file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A config file was not valid JSON for [`crate::config::BenchConfig`].
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parse error
        source: serde_json::Error,
    },

    /// The background sweep thread panicked.
    #[error("sweep worker panicked")]
    WorkerPanicked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

/// A sweep that stopped early. Aggregates finished before the failure are kept.
#[derive(Debug, Error)]
#[error("sweep aborted after {} of {total} dimensions: {source}", .completed.len())]
pub struct SweepError {
    /// Aggregates produced before the failure, in sweep order
    pub completed: Vec<AggregateResult>,
    /// Number of dimensions the sweep was asked to run
    pub total: usize,
    /// What stopped the sweep
    #[source]
    pub source: BenchError,
}

impl SweepError {
    pub(crate) fn new(completed: Vec<AggregateResult>, total: usize, source: BenchError) -> Self {
        Self {
            completed,
            total,
            source,
        }
    }
}
