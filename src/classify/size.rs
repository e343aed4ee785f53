use crate::core::types::{Classification, ClassificationVote};
use crate::utils::numeric::length_to_f64;

/// Scaffolds below this length are treated as fragments by size
pub const SMALL_SCAFFOLD_LIMIT: u64 = 1_000_000;

/// Classify a scaffold by its length relative to the assembly.
///
/// | Condition                     | Class      | Confidence                          |
/// |-------------------------------|------------|-------------------------------------|
/// | `length >= min_chromosome_size` | chromosome | `min(0.95, 0.7 + 0.3 * len/largest)` |
/// | `length >= n50 / 2`           | chromosome | `min(0.8, 0.5 + 0.3 * len/n50)`     |
/// | `length < 1 Mb`               | unplaced   | 0.6                                 |
/// | otherwise                     | other      | 0.4                                 |
///
/// The size vote never carries a chromosome ID and is never `unlocalized`.
#[must_use]
pub fn classify_by_size(
    length: u64,
    n50: u64,
    largest: u64,
    min_chromosome_size: u64,
) -> ClassificationVote {
    let len = length_to_f64(length);

    if length >= min_chromosome_size {
        let confidence = if largest > 0 {
            (0.7 + 0.3 * len / length_to_f64(largest)).min(0.95)
        } else {
            0.7
        };
        return ClassificationVote::new(Classification::Chromosome, confidence, "size_large");
    }

    if len >= 0.5 * length_to_f64(n50) {
        let confidence = if n50 > 0 {
            (0.5 + 0.3 * len / length_to_f64(n50)).min(0.8)
        } else {
            0.5
        };
        return ClassificationVote::new(Classification::Chromosome, confidence, "size_n50");
    }

    if length < SMALL_SCAFFOLD_LIMIT {
        return ClassificationVote::new(Classification::Unplaced, 0.6, "size_small");
    }

    ClassificationVote::new(Classification::Other, 0.4, "size_medium")
}
