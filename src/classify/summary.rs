use crate::core::sequence_stats::{calculate_n50, calculate_n90, BaseCounts};
use crate::core::stats::AssemblyStats;
use crate::core::types::{Classification, ScaffoldResult, SequenceRecord};
use crate::utils::numeric::round_to;

/// Number of leading input records whose samples feed the assembly GC estimate
pub const GC_SAMPLE_RECORDS: usize = 100;

/// Fold final classifications into assembly-wide statistics.
///
/// Always recomputed from scratch over the complete result set. The GC
/// estimate uses the samples of the first [`GC_SAMPLE_RECORDS`] input records,
/// in input order.
#[must_use]
pub fn build_assembly_stats(records: &[SequenceRecord], results: &[ScaffoldResult]) -> AssemblyStats {
    let lengths: Vec<u64> = results.iter().map(|r| r.length).collect();

    let bucket = |class: Classification| -> (usize, u64) {
        results
            .iter()
            .filter(|r| r.classification == class)
            .fold((0, 0), |(count, total), r| (count + 1, total + r.length))
    };

    let chromosome_lengths: Vec<u64> = results
        .iter()
        .filter(|r| r.is_chromosome())
        .map(|r| r.length)
        .collect();

    let (chromosome_count, chromosome_length) = bucket(Classification::Chromosome);
    let (unlocalized_count, unlocalized_length) = bucket(Classification::Unlocalized);
    let (unplaced_count, unplaced_length) = bucket(Classification::Unplaced);
    let (other_count, other_length) = bucket(Classification::Other);

    let gc_content = records
        .iter()
        .take(GC_SAMPLE_RECORDS)
        .map(|r| BaseCounts::from_sequence(&r.sequence_sample))
        .fold(BaseCounts::default(), |acc, counts| acc + counts)
        .gc_fraction()
        .map(|gc| round_to(gc, 4));

    AssemblyStats {
        total_scaffolds: results.len(),
        total_length: lengths.iter().sum(),
        n50: calculate_n50(&lengths),
        n90: calculate_n90(&lengths),
        largest_scaffold: lengths.iter().copied().max().unwrap_or(0),
        chromosome_count,
        chromosome_length,
        chromosome_n50: calculate_n50(&chromosome_lengths),
        unlocalized_count,
        unlocalized_length,
        unplaced_count,
        unplaced_length,
        other_count,
        other_length,
        gc_content,
    }
}
