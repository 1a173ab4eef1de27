//! Benchmark configuration, loadable from a JSON file.
//!
//! Every field is optional; missing fields take the built-in defaults.
//!
//! ```json
//! { "multipliers": [0.5, 1.0, 2.0], "repetitions": 3 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::FALLBACK_CAPACITY_BYTES;
use crate::error::{BenchError, Result};
use crate::sweep::{DEFAULT_MULTIPLIERS, DEFAULT_REPETITIONS, Footprint, SweepPlan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub multipliers: Vec<f64>,
    pub repetitions: usize,
    pub element_bytes: usize,
    pub matrices: usize,
    /// Used when neither L3 nor L2 size is known
    pub fallback_capacity_bytes: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let footprint = Footprint::default();
        Self {
            multipliers: DEFAULT_MULTIPLIERS.to_vec(),
            repetitions: DEFAULT_REPETITIONS,
            element_bytes: footprint.element_bytes,
            matrices: footprint.matrices,
            fallback_capacity_bytes: FALLBACK_CAPACITY_BYTES,
        }
    }
}

impl BenchConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| BenchError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The sweep plan for the configured multipliers.
    pub fn plan(&self) -> Result<SweepPlan> {
        SweepPlan::new(self.multipliers.clone())
    }

    /// The configured element width and matrix count.
    pub fn footprint(&self) -> Result<Footprint> {
        Footprint::new(self.element_bytes, self.matrices)
    }

    /// Validates everything a sweep needs up front.
    pub fn validate(&self) -> Result<()> {
        self.plan()?;
        self.footprint()?;
        if self.repetitions == 0 {
            return Err(BenchError::ZeroRepetitions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bench.json");
        fs::write(&path, r#"{ "repetitions": 2, "multipliers": [0.5, 1.0] }"#).unwrap();

        let cfg = BenchConfig::load(&path).unwrap();
        assert_eq!(cfg.repetitions, 2);
        assert_eq!(cfg.multipliers, vec![0.5, 1.0]);
        assert_eq!(cfg.footprint().unwrap().divisor(), 24);
        assert_eq!(cfg.fallback_capacity_bytes, 2 * 1024 * 1024);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bench.json");
        fs::write(&path, r#"{ "repeats": 2 }"#).unwrap();
        assert!(matches!(BenchConfig::load(&path), Err(BenchError::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BenchConfig::load(Path::new("/nonexistent/bench.json")).unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }

    #[test]
    fn test_validate_catches_zero_repetitions() {
        let cfg = BenchConfig {
            repetitions: 0,
            ..BenchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(BenchError::ZeroRepetitions)));
    }
}
