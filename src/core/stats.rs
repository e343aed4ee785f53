use serde::{Deserialize, Serialize};

/// Assembly-wide summary statistics, derived from the final scaffold classifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Total number of scaffolds in the assembly
    pub total_scaffolds: usize,

    /// Total assembly length in base pairs
    pub total_length: u64,

    /// N50 over all scaffold lengths
    pub n50: u64,

    /// N90 over all scaffold lengths
    pub n90: u64,

    /// Length of the largest scaffold
    pub largest_scaffold: u64,

    pub chromosome_count: usize,
    pub chromosome_length: u64,

    /// N50 of chromosome-level scaffolds only (0 if there are none)
    pub chromosome_n50: u64,

    pub unlocalized_count: usize,
    pub unlocalized_length: u64,

    pub unplaced_count: usize,
    pub unplaced_length: u64,

    pub other_count: usize,
    pub other_length: u64,

    /// GC fraction over the samples of the first 100 scaffolds, rounded to 4 decimals
    pub gc_content: Option<f64>,
}

impl AssemblyStats {
    /// Fraction of the assembly length held in chromosome-level scaffolds
    #[must_use]
    pub fn chromosome_fraction(&self) -> f64 {
        if self.total_length == 0 {
            0.0
        } else {
            crate::utils::numeric::length_to_f64(self.chromosome_length)
                / crate::utils::numeric::length_to_f64(self.total_length)
        }
    }
}
