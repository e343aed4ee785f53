//! Length-distribution and base-composition statistics.

use std::ops::{Add, AddAssign};

use crate::utils::numeric::{count_to_f64, length_to_f64};

/// Nx statistic: the length at which the cumulative sum of lengths, taken in
/// descending order, first reaches `fraction` of the total.
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn calculate_n(lengths: &[u64], fraction: f64) -> u64 {
    if lengths.is_empty() {
        return 0;
    }

    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let threshold = length_to_f64(sorted.iter().sum()) * fraction;
    let mut running: u64 = 0;

    for &length in &sorted {
        running += length;
        if length_to_f64(running) >= threshold {
            return length;
        }
    }

    // Only reachable for fractions above 1.0
    sorted[sorted.len() - 1]
}

#[must_use]
pub fn calculate_n50(lengths: &[u64]) -> u64 {
    calculate_n(lengths, 0.5)
}

#[must_use]
pub fn calculate_n90(lengths: &[u64]) -> u64 {
    calculate_n(lengths, 0.9)
}

/// Counts of strong (G/C) and weak (A/T) bases. Ambiguity codes are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub gc: usize,
    pub at: usize,
}

impl BaseCounts {
    #[must_use]
    pub fn from_sequence(sequence: &str) -> Self {
        let mut counts = Self::default();
        for base in sequence.bytes() {
            match base.to_ascii_uppercase() {
                b'G' | b'C' => counts.gc += 1,
                b'A' | b'T' => counts.at += 1,
                _ => {}
            }
        }
        counts
    }

    /// GC fraction, or `None` when no standard bases were seen
    #[must_use]
    pub fn gc_fraction(&self) -> Option<f64> {
        let total = self.gc + self.at;
        if total == 0 {
            None
        } else {
            Some(count_to_f64(self.gc) / count_to_f64(total))
        }
    }
}

impl Add for BaseCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            gc: self.gc + other.gc,
            at: self.at + other.at,
        }
    }
}

impl AddAssign for BaseCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// GC content of a sequence as a fraction in `[0, 1]`.
///
/// Case-insensitive; only A, C, G and T contribute. Returns `None` if the
/// sequence holds no standard bases.
///
/// ```
/// use chromdetect::core::sequence_stats::calculate_gc;
///
/// assert_eq!(calculate_gc("GCGC"), Some(1.0));
/// assert_eq!(calculate_gc("atgc"), Some(0.5));
/// assert_eq!(calculate_gc("NNNN"), None);
/// ```
#[must_use]
pub fn calculate_gc(sequence: &str) -> Option<f64> {
    BaseCounts::from_sequence(sequence).gc_fraction()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n50_simple() {
        // total 280, half 140: 100 + 70 = 170 crosses at 70
        assert_eq!(calculate_n50(&[100, 70, 50, 30, 20, 10]), 70);
    }

    #[test]
    fn test_n50_degenerate() {
        assert_eq!(calculate_n(&[], 0.5), 0);
        assert_eq!(calculate_n(&[], 0.9), 0);
        assert_eq!(calculate_n(&[1000], 0.5), 1000);
        assert_eq!(calculate_n(&[1000], 0.9), 1000);
        assert_eq!(calculate_n(&[100, 100, 100, 100], 0.5), 100);
    }

    #[test]
    fn test_n90_simple() {
        // total 280, 90% = 252: 100+70+50+30 = 250, +20 = 270 crosses at 20
        assert_eq!(calculate_n90(&[10, 20, 30, 50, 70, 100]), 20);
    }

    #[test]
    fn test_n50_not_below_n90() {
        let samples: [&[u64]; 4] = [
            &[5, 1, 1, 1, 1, 1],
            &[1_000_000, 250, 250, 3],
            &[7, 7, 7],
            &[42, 1],
        ];
        for lengths in samples {
            let n50 = calculate_n50(lengths);
            let n90 = calculate_n90(lengths);
            let min = *lengths.iter().min().unwrap();
            let max = *lengths.iter().max().unwrap();
            assert!(n50 >= n90, "{lengths:?}");
            assert!((min..=max).contains(&n50));
            assert!((min..=max).contains(&n90));
        }
    }

    #[test]
    fn test_gc_basic() {
        assert_eq!(calculate_gc("GCGC"), Some(1.0));
        assert_eq!(calculate_gc("ATAT"), Some(0.0));
        assert_eq!(calculate_gc("ATGC"), Some(0.5));
        assert_eq!(calculate_gc(""), None);
    }

    #[test]
    fn test_gc_ignores_ambiguity_codes() {
        assert_eq!(calculate_gc("GCNNNN"), Some(1.0));
        assert_eq!(calculate_gc("GCRYNNNN"), Some(1.0));
        assert_eq!(calculate_gc("NNRYKM"), None);
    }

    #[test]
    fn test_gc_case_invariant() {
        for seq in ["gcGC", "atgcnnAT", "GCGCGCATAT", "acgtRYacgt"] {
            assert_eq!(calculate_gc(seq), calculate_gc(&seq.to_uppercase()));
        }
    }

    #[test]
    fn test_gc_realistic() {
        let gc = calculate_gc("GCGCGCATAT").unwrap();
        assert!((gc - 0.6).abs() < 1e-9);
        let gc = calculate_gc("GCATAT").unwrap();
        assert!((gc - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_counts_add() {
        let mut counts = BaseCounts::from_sequence("GGAA");
        counts += BaseCounts::from_sequence("CCNN");
        assert_eq!(counts, BaseCounts { gc: 4, at: 2 });
        assert_eq!(
            BaseCounts::from_sequence("AT") + BaseCounts::from_sequence("G"),
            BaseCounts { gc: 1, at: 2 }
        );
    }
}
