//! Cache-aware matrix multiplication benchmarks.
//!
//! Matrix multiplication in i-j-k order walks B column-wise; in i-k-j order
//! it walks B row-wise. Same arithmetic, very different cache behaviour.
//! This crate sizes matrices relative to a detected cache level and times
//! both orders across a sweep of sizes, to show where the bad order falls
//! off the cache cliff.
//!
//! ## Usage
//!
//! ```
//! use cachebench::{plan_sweep, run_sweep};
//!
//! // 64 KiB cache: sizes from 0.1x to 4x of it.
//! let dims = plan_sweep(64 * 1024);
//! assert_eq!(dims.len(), 10);
//!
//! let results = run_sweep(&dims[..3], 1).unwrap();
//! for r in &results {
//!     assert!(r.mean_ijk_secs >= 0.0 && r.mean_ikj_secs >= 0.0);
//! }
//! ```
//!
//! To keep a UI thread free, run the sweep in the background:
//!
//! ```
//! use cachebench::worker::{spawn_sweep, SweepEvent};
//! use cachebench::plan_sweep;
//!
//! let worker = spawn_sweep(plan_sweep(16 * 1024), 1);
//! for event in worker.events() {
//!     if let SweepEvent::AggregateReady { result, .. } = event {
//!         println!("{}x{}: {:.6}s vs {:.6}s", result.n, result.n, result.mean_ijk_secs, result.mean_ikj_secs);
//!     }
//! }
//! let results = worker.join().unwrap();
//! assert_eq!(results.len(), 10);
//! ```
//!
//! ## What's inside
//!
//! - IJK and IKJ kernels with multiply-add counting
//! - Cache-relative sweep planning and mean-time aggregation
//! - Cache detection: SoC database, Linux sysfs, defaults
//! - Bubble vs. heap sort operation counting

pub mod cache;
pub mod config;
pub mod error;
pub mod matrix;
pub mod report;
pub mod sort;
pub mod sweep;
pub mod worker;

pub use error::{BenchError, Result, SweepError};
pub use matrix::LoopOrder;
pub use sweep::{AggregateResult, MatrixDimension, SweepPlan, plan_sweep, run_sweep, run_trial};
