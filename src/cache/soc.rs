//! Known mobile SoC cache layouts and the parser for their size strings.

use super::CacheLevel;

/// Cache description for one SoC, as published by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocSpec {
    pub name: &'static str,
    pub l1: &'static str,
    pub l2: &'static str,
    pub l3: &'static str,
}

const fn soc(name: &'static str, l1: &'static str, l2: &'static str, l3: &'static str) -> SocSpec {
    SocSpec { name, l1, l2, l3 }
}

/// Keyed by board/hardware code name, sorted by key. Lookup returns the first hit.
pub static SOC_DATABASE: &[(&str, SocSpec)] = &[
    ("cheetah", soc("Google Tensor G2", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("exynos2100", soc("Exynos 2100", "64KB", "512KB", "4MB Shared")),
    ("exynos2200", soc("Exynos 2200", "64KB", "512KB", "4MB Shared")),
    ("exynos2400", soc("Exynos 2400", "64KB", "1MB", "8MB Shared")),
    ("gs101", soc("Google Tensor (G1)", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("gs201", soc("Google Tensor G2", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("kalama", soc("Snapdragon 8 Gen 2", "64KB", "1MB(P)/512KB(G)", "8MB Shared")),
    ("kona", soc("Snapdragon 865/870", "64KB", "512KB", "4MB Shared")),
    ("lahaina", soc("Snapdragon 888", "64KB", "512KB", "4MB Shared")),
    ("mt6893", soc("Dimensity 1200", "64KB", "512KB", "2MB")),
    ("mt6983", soc("Dimensity 9000", "64KB", "512KB", "8MB")),
    ("mt6985", soc("Dimensity 9200", "64KB", "512KB", "8MB")),
    ("mt6989", soc("Dimensity 9300", "64KB", "512KB", "10MB+ SLC")),
    ("oriole", soc("Google Tensor (G1)", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("panther", soc("Google Tensor G2", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("pineapple", soc("Snapdragon 8 Gen 3", "96KB(I)/48KB(D)", "2MB(P)/512KB(E)", "12MB Shared")),
    ("raven", soc("Google Tensor (G1)", "64KB", "256KB/512KB", "4MB(SLC)+8MB(L3)")),
    ("s5e9925", soc("Exynos 2200", "64KB", "512KB", "4MB Shared")),
    ("s5e9945", soc("Exynos 2400", "64KB", "1MB", "8MB Shared")),
    ("sdm845", soc("Snapdragon 845", "64KB", "256KB", "2MB Shared")),
    ("sm7325", soc("Snapdragon 778G", "64KB", "256KB", "2MB")),
    ("sm8150", soc("Snapdragon 855", "64KB", "256KB", "2MB Shared")),
    ("sm8250", soc("Snapdragon 865/870", "64KB", "512KB", "4MB Shared")),
    ("sm8350", soc("Snapdragon 888", "64KB", "512KB", "4MB Shared")),
    ("sm8450", soc("Snapdragon 8 Gen 1", "64KB", "512KB", "6MB Shared")),
    ("sm8550", soc("Snapdragon 8 Gen 2", "64KB", "1MB(P)/512KB(G)", "8MB Shared")),
    ("sm8650", soc("Snapdragon 8 Gen 3", "96KB(I)/48KB(D)", "2MB(P)/512KB(E)", "12MB Shared")),
    ("taro", soc("Snapdragon 8 Gen 1", "64KB", "512KB", "6MB Shared")),
    ("zuma", soc("Google Tensor G3", "64KB", "512KB", "4MB(SLC)+8MB(L3)")),
];

/// Finds the first SoC whose key occurs in the (case-insensitive) hardware or board name.
pub fn lookup(hardware: &str, board: &str) -> Option<&'static SocSpec> {
    let hardware = hardware.to_lowercase();
    let board = board.to_lowercase();
    SOC_DATABASE
        .iter()
        .find(|(key, _)| board.contains(key) || hardware.contains(key))
        .map(|(_, spec)| spec)
}

impl SocSpec {
    /// `[L1, L2, L3]` in bytes.
    pub fn capacities(&self) -> [u64; 3] {
        [
            parse_level(self.l1, CacheLevel::L1),
            parse_level(self.l2, CacheLevel::L2),
            parse_level(self.l3, CacheLevel::L3),
        ]
    }
}

/// Parses one size token such as `"48KB(D)"`, `"8MB(L3)"` or `"1024K"`.
///
/// Leading non-digits are skipped. The remainder selects the unit: `M` for
/// MiB, else `K` for KiB, else bytes. A token with no digits is 0.
pub fn parse_size_token(token: &str) -> u64 {
    let Some(start) = token.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let rest = &token[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let Ok(value) = rest[..end].parse::<u64>() else {
        return 0;
    };
    let suffix = &rest[end..];
    if suffix.contains('M') {
        value.saturating_mul(1024 * 1024)
    } else if suffix.contains('K') {
        value.saturating_mul(1024)
    } else {
        value
    }
}

/// Picks the capacity that matters for `level` out of a vendor size string.
///
/// * L1: the data cache (`D`), ignoring instruction caches (`I`).
/// * L2: the performance-core cluster (`(P)`), else the largest.
/// * L3: the entry marked `L3` (not the SLC), else the largest.
pub fn parse_level(raw: &str, level: CacheLevel) -> u64 {
    let mut best = 0;
    let mut found_l3 = false;

    for segment in raw.split(|c: char| c.is_whitespace() || c == '/' || c == '+') {
        let value = parse_size_token(segment);
        if value == 0 {
            continue;
        }
        let suffix = &segment[segment.find(|c: char| c.is_ascii_digit()).unwrap_or(0)..];

        match level {
            CacheLevel::L1 => {
                if suffix.contains('D') {
                    return value;
                }
                if suffix.contains('I') {
                    continue;
                }
                best = value;
            }
            CacheLevel::L2 => {
                if segment.contains("(P)") {
                    return value;
                }
                best = best.max(value);
            }
            CacheLevel::L3 => {
                if segment.contains("L3") {
                    best = value;
                    found_l3 = true;
                } else if !found_l3 {
                    best = best.max(value);
                }
            }
        }
    }
    best
}
