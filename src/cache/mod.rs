//! Cache hierarchy detection.
//!
//! Sizes come from, in order of preference:
//! 1. the SoC database, matched against hardware/board names
//! 2. Linux sysfs (`/sys/devices/system/cpu/cpu0/cache`)
//! 3. conservative defaults (32 KiB / 512 KiB / 2 MiB)

pub mod soc;
pub mod sysfs;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Capacity the presentation layer falls back to when neither L3 nor L2 is known.
pub const FALLBACK_CAPACITY_BYTES: u64 = 2 * 1024 * 1024;

/// Sizes assumed when nothing could be detected.
pub const DEFAULT_CAPACITIES: [u64; 3] = [32 * 1024, 512 * 1024, 2 * 1024 * 1024];

/// A tier of the processor's data cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheLevel {
    L1,
    L2,
    L3,
}

impl CacheLevel {
    pub const ALL: [CacheLevel; 3] = [CacheLevel::L1, CacheLevel::L2, CacheLevel::L3];

    fn index(self) -> usize {
        match self {
            CacheLevel::L1 => 0,
            CacheLevel::L2 => 1,
            CacheLevel::L3 => 2,
        }
    }
}

impl fmt::Display for CacheLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CacheLevel::L1 => "L1",
            CacheLevel::L2 => "L2",
            CacheLevel::L3 => "L3",
        })
    }
}

/// One cache level's size. `bytes == 0` means not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCapacity {
    pub level: CacheLevel,
    pub bytes: u64,
}

/// Where a [`CacheHierarchy`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CacheSource {
    Database { soc: String },
    Sysfs,
    Default,
}

/// Detected `[L1, L2, L3]` sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHierarchy {
    sizes: [u64; 3],
    pub source: CacheSource,
}

impl CacheHierarchy {
    pub fn new(sizes: [u64; 3], source: CacheSource) -> Self {
        Self { sizes, source }
    }

    pub fn capacity(&self, level: CacheLevel) -> CacheCapacity {
        CacheCapacity {
            level,
            bytes: self.sizes[level.index()],
        }
    }

    pub fn capacities(&self) -> impl Iterator<Item = CacheCapacity> + '_ {
        CacheLevel::ALL.into_iter().map(|level| self.capacity(level))
    }

    /// L3 if known, else L2 if known, else `fallback`.
    pub fn benchmark_target(&self, fallback: u64) -> u64 {
        [CacheLevel::L3, CacheLevel::L2]
            .into_iter()
            .map(|level| self.capacity(level).bytes)
            .find(|&bytes| bytes > 0)
            .unwrap_or(fallback)
    }

    /// Size of `level`, or `fallback` if it was not detected. `None` picks via [`Self::benchmark_target`].
    pub fn target_for(&self, level: Option<CacheLevel>, fallback: u64) -> u64 {
        let Some(level) = level else {
            return self.benchmark_target(fallback);
        };
        match self.capacity(level).bytes {
            0 => {
                warn!(%level, fallback, "cache level not detected, using fallback capacity");
                fallback
            }
            bytes => bytes,
        }
    }
}

/// Detects the cache hierarchy for the given hardware/board names.
pub fn detect(hardware: &str, board: &str, sysfs_root: &Path) -> CacheHierarchy {
    if let Some(spec) = soc::lookup(hardware, board) {
        info!(soc = spec.name, "cache sizes from SoC database");
        return CacheHierarchy::new(
            spec.capacities(),
            CacheSource::Database {
                soc: spec.name.to_string(),
            },
        );
    }

    if let Some(sizes) = sysfs::read_cache_sizes(sysfs_root) {
        info!(root = %sysfs_root.display(), "cache sizes from sysfs");
        return CacheHierarchy::new(sizes, CacheSource::Sysfs);
    }

    warn!(hardware, board, "no cache information found, using defaults");
    CacheHierarchy::new(DEFAULT_CAPACITIES, CacheSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_prefers_l3_then_l2() {
        let h = CacheHierarchy::new([1, 2, 3], CacheSource::Sysfs);
        assert_eq!(h.benchmark_target(FALLBACK_CAPACITY_BYTES), 3);

        let h = CacheHierarchy::new([1, 2, 0], CacheSource::Sysfs);
        assert_eq!(h.benchmark_target(FALLBACK_CAPACITY_BYTES), 2);

        let h = CacheHierarchy::new([1, 0, 0], CacheSource::Sysfs);
        assert_eq!(h.benchmark_target(FALLBACK_CAPACITY_BYTES), FALLBACK_CAPACITY_BYTES);
    }

    #[test]
    fn test_target_for_explicit_level() {
        let h = CacheHierarchy::new([48 * 1024, 0, 8 * 1024 * 1024], CacheSource::Sysfs);
        assert_eq!(h.target_for(Some(CacheLevel::L1), 99), 48 * 1024);
        assert_eq!(h.target_for(Some(CacheLevel::L3), 99), 8 * 1024 * 1024);
        // L2 reads 0, so the fallback is used even though L3 is known
        assert_eq!(h.target_for(Some(CacheLevel::L2), 99), 99);
        assert_eq!(h.target_for(None, 99), 8 * 1024 * 1024);
    }

    #[test]
    fn test_detect_database_beats_sysfs() {
        let tmp = tempfile::tempdir().unwrap();
        let h = detect("", "kalama", tmp.path());
        assert_eq!(
            h.source,
            CacheSource::Database {
                soc: "Snapdragon 8 Gen 2".into()
            }
        );
        assert_eq!(h.capacity(CacheLevel::L2).bytes, 1024 * 1024);
        assert_eq!(h.capacity(CacheLevel::L3).bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn test_detect_defaults_when_nothing_found() {
        let tmp = tempfile::tempdir().unwrap();
        let h = detect("unknown", "unknown", tmp.path());
        assert_eq!(h.source, CacheSource::Default);
        let sizes: Vec<u64> = h.capacities().map(|c| c.bytes).collect();
        assert_eq!(sizes, DEFAULT_CAPACITIES);
    }
}
