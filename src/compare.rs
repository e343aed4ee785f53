//! Side-by-side comparison of two classified assemblies.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::core::stats::AssemblyStats;
use crate::core::types::{Classification, ScaffoldResult};

/// A scaffold present in both assemblies with a different classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationChange {
    pub name: String,
    pub classification1: Classification,
    pub classification2: Classification,
}

/// Headline numbers of a comparison. Differences are assembly 2 minus assembly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub total_shared_chromosomes: usize,
    pub unique_to_1: usize,
    pub unique_to_2: usize,
    pub classification_changes_count: usize,
    pub n50_difference: i64,
    pub chromosome_count_difference: i64,
    pub total_length_difference: i64,
}

/// Result of comparing two assemblies
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyComparison {
    pub assembly1_name: String,
    pub assembly2_name: String,
    pub stats1: AssemblyStats,
    pub stats2: AssemblyStats,

    /// Chromosome-classified names found in both assemblies
    pub shared_chromosomes: Vec<String>,
    pub unique_to_1: Vec<String>,
    pub unique_to_2: Vec<String>,

    /// Length change of shared chromosomes (non-zero only)
    pub size_differences: BTreeMap<String, i64>,

    pub classification_changes: Vec<ClassificationChange>,
}

/// `b - a` as a signed value, saturating lengths beyond `i64::MAX`
pub(crate) fn signed_difference(a: u64, b: u64) -> i64 {
    i64::try_from(b).unwrap_or(i64::MAX) - i64::try_from(a).unwrap_or(i64::MAX)
}

fn count_difference(a: usize, b: usize) -> i64 {
    signed_difference(a as u64, b as u64)
}

impl AssemblyComparison {
    #[must_use]
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            total_shared_chromosomes: self.shared_chromosomes.len(),
            unique_to_1: self.unique_to_1.len(),
            unique_to_2: self.unique_to_2.len(),
            classification_changes_count: self.classification_changes.len(),
            n50_difference: signed_difference(self.stats1.n50, self.stats2.n50),
            chromosome_count_difference: count_difference(
                self.stats1.chromosome_count,
                self.stats2.chromosome_count,
            ),
            total_length_difference: signed_difference(
                self.stats1.total_length,
                self.stats2.total_length,
            ),
        }
    }
}

/// Compare two classified assemblies by scaffold name
#[must_use]
pub fn compare_assemblies(
    results1: &[ScaffoldResult],
    stats1: &AssemblyStats,
    results2: &[ScaffoldResult],
    stats2: &AssemblyStats,
    assembly1_name: &str,
    assembly2_name: &str,
) -> AssemblyComparison {
    let chromosomes = |results: &[ScaffoldResult]| -> BTreeMap<String, u64> {
        results
            .iter()
            .filter(|r| r.is_chromosome())
            .map(|r| (r.name.clone(), r.length))
            .collect()
    };
    let chr1 = chromosomes(results1);
    let chr2 = chromosomes(results2);

    let shared_chromosomes: Vec<String> = chr1
        .keys()
        .filter(|name| chr2.contains_key(*name))
        .cloned()
        .collect();
    let unique_to_1 = chr1.keys().filter(|n| !chr2.contains_key(*n)).cloned().collect();
    let unique_to_2 = chr2.keys().filter(|n| !chr1.contains_key(*n)).cloned().collect();

    let size_differences = shared_chromosomes
        .iter()
        .map(|name| (name.clone(), signed_difference(chr1[name], chr2[name])))
        .filter(|&(_, diff)| diff != 0)
        .collect();

    let by_name2: HashMap<&str, Classification> = results2
        .iter()
        .map(|r| (r.name.as_str(), r.classification))
        .collect();
    let classification_changes = results1
        .iter()
        .map(|r| (r.name.as_str(), r.classification))
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .filter_map(|(name, class1)| {
            let class2 = *by_name2.get(name)?;
            (class1 != class2).then(|| ClassificationChange {
                name: name.to_string(),
                classification1: class1,
                classification2: class2,
            })
        })
        .collect();

    AssemblyComparison {
        assembly1_name: assembly1_name.to_string(),
        assembly2_name: assembly2_name.to_string(),
        stats1: stats1.clone(),
        stats2: stats2.clone(),
        shared_chromosomes,
        unique_to_1,
        unique_to_2,
        size_differences,
        classification_changes,
    }
}
