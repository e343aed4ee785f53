use crate::core::types::{Classification, ClassificationVote};

/// Name votes at or above this confidence are taken as-is
pub const NAME_TRUST_THRESHOLD: f64 = 0.8;
/// Size votes at or above this confidence can establish a chromosome
pub const SIZE_TRUST_THRESHOLD: f64 = 0.7;

/// Combine the name and size votes for one scaffold.
///
/// The first matching rule wins:
///
/// 1. Trusted name vote (confidence >= 0.8) is used unchanged.
/// 2. Trusted size vote for `chromosome`: if the name also says chromosome the
///    two agree and the confidence is `min(0.95, mean + 0.1)` with method
///    `name+size`; otherwise the size vote stands alone at `confidence * 0.9`.
/// 3. A weaker chromosome name vote is used unchanged.
/// 4. A size vote of `unplaced` is used unchanged.
/// 5. Otherwise the name class (or `unplaced` when the name gave `other`) at
///    `max(name, size) * 0.8`.
///
/// The chromosome ID always comes from the name vote.
#[must_use]
pub fn fuse_votes(name_vote: ClassificationVote, size_vote: ClassificationVote) -> ClassificationVote {
    if name_vote.confidence >= NAME_TRUST_THRESHOLD {
        return name_vote;
    }

    if size_vote.confidence >= SIZE_TRUST_THRESHOLD && size_vote.is_chromosome() {
        return if name_vote.is_chromosome() {
            let confidence = ((name_vote.confidence + size_vote.confidence) / 2.0 + 0.1).min(0.95);
            ClassificationVote::new(
                Classification::Chromosome,
                confidence,
                format!("{}+{}", name_vote.method, size_vote.method),
            )
            .with_chromosome_id(name_vote.chromosome_id)
        } else {
            ClassificationVote::new(
                Classification::Chromosome,
                size_vote.confidence * 0.9,
                size_vote.method,
            )
            .with_chromosome_id(name_vote.chromosome_id)
        };
    }

    if name_vote.is_chromosome() {
        return name_vote;
    }

    if size_vote.classification == Classification::Unplaced {
        return size_vote.with_chromosome_id(name_vote.chromosome_id);
    }

    let classification = match name_vote.classification {
        Classification::Other => Classification::Unplaced,
        other => other,
    };
    let confidence = name_vote.confidence.max(size_vote.confidence) * 0.8;

    ClassificationVote::new(classification, confidence, name_vote.method)
        .with_chromosome_id(name_vote.chromosome_id)
}
