//! Text rendering of benchmark results.

use std::fmt::Write;

use crate::cache::{CacheHierarchy, CacheSource};
use crate::sort::SortComparison;
use crate::sweep::AggregateResult;

fn human_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    match bytes {
        0 => "not detected".to_string(),
        b if b >= MIB && b % MIB == 0 => format!("{} MB", b / MIB),
        b if b >= KIB => format!("{} KB", b / KIB),
        b => format!("{b} B"),
    }
}

/// Detected sizes per level and where they came from.
pub fn cache_table(h: &CacheHierarchy) -> String {
    let mut out = String::new();
    let source = match &h.source {
        CacheSource::Database { soc } => format!("database match: {soc}"),
        CacheSource::Sysfs => "sysfs".to_string(),
        CacheSource::Default => "defaults (nothing detected)".to_string(),
    };
    let _ = writeln!(out, "=== CACHE INFO ({source}) ===");
    for c in h.capacities() {
        let _ = writeln!(out, "{}: {}", c.level, human_bytes(c.bytes));
    }
    out
}

/// Table of mean timings per matrix size, with the IJK/IKJ slowdown.
pub fn sweep_table(base_capacity: u64, results: &[AggregateResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(78));
    let _ = writeln!(out, "MEMORY BENCHMARK  (base capacity {})", human_bytes(base_capacity));
    let _ = writeln!(out, "{}", "=".repeat(78));
    let _ = writeln!(
        out,
        "{:>6} {:>14} {:>12} {:>14} {:>14} {:>10}",
        "Mult", "Matrix", "Usage", "IJK (bad)", "IKJ (good)", "Slowdown"
    );
    let _ = writeln!(out, "{}", "-".repeat(78));

    for r in results {
        let slowdown = r
            .slowdown()
            .map_or_else(|| "-".to_string(), |s| format!("{s:.1}×"));
        let _ = writeln!(
            out,
            "{:>6.2} {:>14} {:>9} KB {:>12.4} s {:>12.4} s {:>10}",
            r.multiplier,
            format!("{} x {}", r.n, r.n),
            r.target_bytes / 1024,
            r.mean_ijk_secs,
            r.mean_ikj_secs,
            slowdown
        );
    }

    let _ = writeln!(out, "{}", "=".repeat(78));
    out
}

/// Sweep results as pretty JSON, or as [`sweep_table`] text.
pub fn sweep_output(base_capacity: u64, results: &[AggregateResult], json: bool) -> serde_json::Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(results)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(sweep_table(base_capacity, results))
    }
}

/// One row per input size: time and operations of both sorts.
pub fn sort_table(results: &[SortComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8} {:>12} {:>16} {:>12} {:>16}",
        "Size", "Bubble", "Bubble ops", "Heap", "Heap ops"
    );
    let _ = writeln!(out, "{}", "-".repeat(68));
    for cmp in results {
        let _ = writeln!(
            out,
            "{:>8} {:>9} ms {:>16} {:>9} ms {:>16}",
            cmp.len,
            cmp.bubble.elapsed.as_millis(),
            cmp.bubble.operations(),
            cmp.heap.elapsed.as_millis(),
            cmp.heap.operations()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(0), "not detected");
        assert_eq!(human_bytes(512), "512 B");
        assert_eq!(human_bytes(48 * 1024), "48 KB");
        assert_eq!(human_bytes(8 * 1024 * 1024), "8 MB");
        assert_eq!(human_bytes(1280 * 1024), "1280 KB");
    }

    #[test]
    fn test_sweep_table_rows() {
        let results = [AggregateResult {
            n: 209,
            multiplier: 1.0,
            target_bytes: 1_048_576,
            repetitions: 5,
            mean_ijk_secs: 0.02,
            mean_ikj_secs: 0.01,
            multiply_adds: 9_129_329,
        }];
        let table = sweep_table(1_048_576, &results);
        assert!(table.contains("209 x 209"));
        assert!(table.contains("2.0×"));
        assert!(table.contains("1 MB"));
    }

    #[test]
    fn test_sweep_output_json_is_parseable() {
        let results = crate::run_sweep(&[crate::MatrixDimension::fixed(3)], 1).unwrap();
        let out = sweep_output(1024, &results, true).unwrap();
        let parsed: Vec<AggregateResult> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].n, 3);

        let empty = sweep_output(1024, &[], true).unwrap();
        assert_eq!(empty.trim(), "[]");
        assert!(sweep_output(1024, &results, false).unwrap().contains("3 x 3"));
    }

    #[test]
    fn test_sort_table_one_row_per_size() {
        let results = crate::sort::compare_sorts_sweep(&[10, 20], crate::sort::DEFAULT_SEED);
        let table = sort_table(&results);
        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().nth(2).unwrap().trim_start().starts_with("10 "));
        assert!(table.lines().nth(3).unwrap().trim_start().starts_with("20 "));
    }
}
