use std::cmp::Ordering;

use tracing::debug;

use crate::core::types::{Classification, ScaffoldResult};
use crate::utils::numeric::round_to;

/// Method suffix for chromosome calls demoted to unplaced
pub const DEMOTED_SUFFIX: &str = "_demoted_karyotype";
/// Method suffix for unplaced scaffolds promoted to chromosome
pub const PROMOTED_SUFFIX: &str = "_promoted_karyotype";

/// Adjust a classified set towards an expected chromosome count.
///
/// With too many chromosome calls the lowest-confidence ones are demoted to
/// `unplaced` at half confidence. With too few, the longest `unplaced`
/// scaffolds (ties broken by higher confidence) are promoted at
/// `min(0.6, confidence + 0.2)`. `unlocalized` and `other` results are never
/// touched, and the returned list keeps the input order.
///
/// Adjusted confidences are rounded to 3 decimals again, so a 0.675 call is
/// demoted to 0.338 rather than 0.3375.
#[must_use]
pub fn reconcile_karyotype(results: Vec<ScaffoldResult>, expected: usize) -> Vec<ScaffoldResult> {
    let current = results.iter().filter(|r| r.is_chromosome()).count();

    match current.cmp(&expected) {
        Ordering::Equal => results,
        Ordering::Greater => {
            let targets = demotion_targets(&results, current - expected);
            debug!(current, expected, demoted = targets.len(), "Karyotype demotion");
            apply(results, &targets, demote)
        }
        Ordering::Less => {
            let targets = promotion_targets(&results, expected - current);
            debug!(current, expected, promoted = targets.len(), "Karyotype promotion");
            apply(results, &targets, promote)
        }
    }
}

/// Indices of the `count` lowest-confidence chromosome calls (stable on ties)
fn demotion_targets(results: &[ScaffoldResult], count: usize) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..results.len())
        .filter(|&i| results[i].is_chromosome())
        .collect();
    candidates.sort_by(|&a, &b| results[a].confidence.total_cmp(&results[b].confidence));
    candidates.truncate(count);
    candidates
}

/// Indices of the `count` longest unplaced scaffolds, higher confidence first on ties
fn promotion_targets(results: &[ScaffoldResult], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by(|&a, &b| {
        results[b]
            .length
            .cmp(&results[a].length)
            .then_with(|| results[b].confidence.total_cmp(&results[a].confidence))
    });

    order
        .into_iter()
        .filter(|&i| results[i].classification == Classification::Unplaced)
        .take(count)
        .collect()
}

fn apply(
    results: Vec<ScaffoldResult>,
    targets: &[usize],
    adjust: fn(ScaffoldResult) -> ScaffoldResult,
) -> Vec<ScaffoldResult> {
    let mut selected = vec![false; results.len()];
    for &i in targets {
        selected[i] = true;
    }

    results
        .into_iter()
        .zip(selected)
        .map(|(result, hit)| if hit { adjust(result) } else { result })
        .collect()
}

fn demote(result: ScaffoldResult) -> ScaffoldResult {
    ScaffoldResult {
        classification: Classification::Unplaced,
        confidence: round_to(result.confidence * 0.5, 3),
        detection_method: format!("{}{DEMOTED_SUFFIX}", result.detection_method),
        ..result
    }
}

fn promote(result: ScaffoldResult) -> ScaffoldResult {
    ScaffoldResult {
        classification: Classification::Chromosome,
        confidence: round_to((result.confidence + 0.2).min(0.6), 3),
        detection_method: format!("{}{PROMOTED_SUFFIX}", result.detection_method),
        ..result
    }
}
