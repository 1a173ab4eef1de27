//! Linux cache sizes read from sysfs and `/proc/cpuinfo`.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::soc::parse_size_token;

/// Default sysfs CPU root.
pub const SYSFS_CPU_ROOT: &str = "/sys/devices/system/cpu";

/// Default cpuinfo path.
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Reads `cpu0/cache/index{0..3}` under `root` and returns `[L1, L2, L3]` bytes.
///
/// Instruction caches are skipped. Returns `None` when no data or unified
/// cache was found.
pub fn read_cache_sizes(root: &Path) -> Option<[u64; 3]> {
    let mut sizes = [0u64; 3];
    let mut found = false;

    for index in 0..4 {
        let dir = root.join("cpu0").join("cache").join(format!("index{index}"));
        let Some(size) = read_line(&dir.join("size")) else {
            continue;
        };
        let level = read_line(&dir.join("level")).and_then(|l| l.parse::<usize>().ok());
        let kind = read_line(&dir.join("type")).unwrap_or_default();

        if kind == "Instruction" {
            continue;
        }
        if let Some(level @ 1..=3) = level {
            let bytes = parse_size_token(&size);
            debug!(index, level, kind = %kind, bytes, "sysfs cache entry");
            sizes[level - 1] = sizes[level - 1].max(bytes);
            found |= bytes > 0;
        }
    }

    found.then_some(sizes)
}

/// The `Hardware` field of a cpuinfo file, if present.
pub fn cpuinfo_hardware(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    text.lines()
        .filter(|line| line.starts_with("Hardware"))
        .find_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_line(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let line = text.lines().next()?.trim();
    (!line.is_empty()).then(|| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_index(root: &Path, index: usize, level: &str, kind: &str, size: &str) {
        let dir = root.join(format!("cpu0/cache/index{index}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("level"), format!("{level}\n")).unwrap();
        fs::write(dir.join("type"), format!("{kind}\n")).unwrap();
        fs::write(dir.join("size"), format!("{size}\n")).unwrap();
    }

    #[test]
    fn test_read_typical_x86_layout() {
        let tmp = tempfile::tempdir().unwrap();
        write_index(tmp.path(), 0, "1", "Data", "48K");
        write_index(tmp.path(), 1, "1", "Instruction", "32K");
        write_index(tmp.path(), 2, "2", "Unified", "1280K");
        write_index(tmp.path(), 3, "3", "Unified", "24576K");

        let sizes = read_cache_sizes(tmp.path()).unwrap();
        assert_eq!(sizes, [48 * 1024, 1280 * 1024, 24576 * 1024]);
    }

    #[test]
    fn test_read_missing_tree() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_cache_sizes(tmp.path()), None);
    }

    #[test]
    fn test_read_without_l3() {
        let tmp = tempfile::tempdir().unwrap();
        write_index(tmp.path(), 0, "1", "Data", "64K");
        write_index(tmp.path(), 1, "2", "Unified", "512K");
        assert_eq!(read_cache_sizes(tmp.path()), Some([64 * 1024, 512 * 1024, 0]));
    }

    #[test]
    fn test_cpuinfo_hardware() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cpuinfo");
        fs::write(
            &path,
            "processor\t: 0\nBogoMIPS\t: 38.40\n\nHardware\t: Qualcomm Technologies, Inc SM8550\n",
        )
        .unwrap();
        assert_eq!(
            cpuinfo_hardware(&path).as_deref(),
            Some("Qualcomm Technologies, Inc SM8550")
        );

        fs::write(&path, "model name\t: Intel(R) Core(TM)\n").unwrap();
        assert_eq!(cpuinfo_hardware(&path), None);
    }
}
