//! Bubble sort vs. heap sort with operation counting.
//!
//! A CPU-bound companion to the memory benchmark: both algorithms sort the
//! same seeded data while counting comparisons and element assignments
//! (a swap counts as three assignments).

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Seed for the input data.
pub const DEFAULT_SEED: u64 = 12345;

/// Input sizes of the default sort sweep, ascending.
pub const DEFAULT_SORT_SIZES: [usize; 12] = [
    1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000, 15000, 20000,
];

/// Counted work and elapsed time of one sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMetrics {
    pub comparisons: u64,
    pub assignments: u64,
    #[serde(with = "millis")]
    pub elapsed: Duration,
}

impl SortMetrics {
    /// Comparisons plus assignments.
    pub fn operations(&self) -> u64 {
        self.comparisons + self.assignments
    }

    fn swap(&mut self, data: &mut [i32], i: usize, j: usize) {
        data.swap(i, j);
        self.assignments += 3;
    }
}

/// Both algorithms run on one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortComparison {
    pub len: usize,
    pub bubble: SortMetrics,
    pub heap: SortMetrics,
}

/// `len` integers in `1..=1_000_000` from a seeded generator.
pub fn seeded_data(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(1..=1_000_000)).collect()
}

/// Bubble sort with early exit once a pass makes no swaps.
pub fn bubble_sort(data: &mut [i32]) -> SortMetrics {
    let mut m = SortMetrics::default();
    let n = data.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            m.comparisons += 1;
            if data[j] > data[j + 1] {
                m.swap(data, j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    m
}

/// In-place heap sort: build a max-heap, then repeatedly move the root to the end.
pub fn heap_sort(data: &mut [i32]) -> SortMetrics {
    let mut m = SortMetrics::default();
    let n = data.len();
    for i in (0..n / 2).rev() {
        sift_down(data, n, i, &mut m);
    }
    for end in (1..n).rev() {
        m.swap(data, 0, end);
        sift_down(data, end, 0, &mut m);
    }
    m
}

fn sift_down(data: &mut [i32], len: usize, mut root: usize, m: &mut SortMetrics) {
    loop {
        let mut largest = root;
        for child in [2 * root + 1, 2 * root + 2] {
            if child < len {
                m.comparisons += 1;
                if data[child] > data[largest] {
                    largest = child;
                }
            }
        }
        if largest == root {
            return;
        }
        m.swap(data, root, largest);
        root = largest;
    }
}

/// Sorts one copy of the seeded data with each algorithm, timing both.
pub fn compare_sorts(len: usize, seed: u64) -> SortComparison {
    let original = seeded_data(len, seed);

    let mut data = original.clone();
    let start = Instant::now();
    let mut bubble = bubble_sort(&mut data);
    bubble.elapsed = start.elapsed();

    let mut data = original;
    let start = Instant::now();
    let mut heap = heap_sort(&mut data);
    heap.elapsed = start.elapsed();

    info!(
        len,
        bubble_ops = bubble.operations(),
        heap_ops = heap.operations(),
        "sort comparison complete"
    );

    SortComparison { len, bubble, heap }
}

/// Runs [`compare_sorts`] for every size in `sizes`, keeping their order.
pub fn compare_sorts_sweep(sizes: &[usize], seed: u64) -> Vec<SortComparison> {
    compare_sorts_sweep_with(sizes, seed, |_, _, _| {})
}

/// Same as [`compare_sorts_sweep`], calling `on_start(index, total, len)` before each size.
pub fn compare_sorts_sweep_with<F>(sizes: &[usize], seed: u64, mut on_start: F) -> Vec<SortComparison>
where
    F: FnMut(usize, usize, usize),
{
    sizes
        .iter()
        .enumerate()
        .map(|(index, &len)| {
            on_start(index, sizes.len(), len);
            compare_sorts(len, seed)
        })
        .collect()
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(ms.max(0.0) / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_sorted_input_single_pass() {
        let mut data = vec![1, 2, 3, 4, 5];
        let m = bubble_sort(&mut data);
        assert_eq!(m.comparisons, 4);
        assert_eq!(m.assignments, 0);
    }

    #[test]
    fn test_bubble_reverse_counts() {
        let mut data = vec![3, 2, 1];
        let m = bubble_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3]);
        // pass 1: 2 comparisons, 2 swaps; pass 2: 1 comparison, 1 swap
        assert_eq!(m.comparisons, 3);
        assert_eq!(m.assignments, 9);
    }

    #[test]
    fn test_heap_sort_small() {
        let mut data = vec![3, 1, 2];
        let m = heap_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3]);
        // build: 2 cmp, no swap; first extract: swap + 1 cmp; second extract: swap
        assert_eq!(m.comparisons, 3);
        assert_eq!(m.assignments, 6);
    }

    #[test]
    fn test_empty_and_single() {
        for len in [0, 1] {
            let mut data = seeded_data(len, DEFAULT_SEED);
            assert_eq!(bubble_sort(&mut data).operations(), 0);
            assert_eq!(heap_sort(&mut data).operations(), 0);
        }
    }

    #[test]
    fn test_compare_sorts_reproducible_counts() {
        let a = compare_sorts(300, DEFAULT_SEED);
        let b = compare_sorts(300, DEFAULT_SEED);
        assert_eq!(a.bubble.operations(), b.bubble.operations());
        assert_eq!(a.heap.operations(), b.heap.operations());
        assert!(a.heap.operations() < a.bubble.operations());
    }

    #[test]
    fn test_sort_sweep_keeps_size_order() {
        let sizes = [200, 50, 120];
        let mut started = Vec::new();
        let first = compare_sorts_sweep_with(&sizes, DEFAULT_SEED, |i, total, len| {
            started.push((i, total, len))
        });
        assert_eq!(started, vec![(0, 3, 200), (1, 3, 50), (2, 3, 120)]);
        assert_eq!(first.iter().map(|c| c.len).collect::<Vec<_>>(), vec![200, 50, 120]);

        let second = compare_sorts_sweep(&sizes, DEFAULT_SEED);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.bubble.operations(), b.bubble.operations());
            assert_eq!(a.heap.operations(), b.heap.operations());
        }
    }

    #[test]
    fn test_default_sort_sizes_ascending() {
        assert_eq!(DEFAULT_SORT_SIZES.len(), 12);
        assert!(DEFAULT_SORT_SIZES.windows(2).all(|w| w[0] < w[1]));
    }
}
