use thiserror::Error;
use tracing::debug;

use crate::classify::assignment::{AssignmentMap, ASSIGNMENT_CONFIDENCE, ASSIGNMENT_METHOD};
use crate::classify::fusion::fuse_votes;
use crate::classify::karyotype::reconcile_karyotype;
use crate::classify::name::classify_by_name;
use crate::classify::size::classify_by_size;
use crate::classify::summary::build_assembly_stats;
use crate::core::sequence_stats::{calculate_gc, calculate_n50};
use crate::core::stats::AssemblyStats;
use crate::core::types::{ClassificationVote, ScaffoldResult, SequenceRecord};
use crate::patterns::PatternSet;
use crate::utils::numeric::round_to;

/// Default minimum length for a size-based chromosome call (10 Mb)
pub const DEFAULT_MIN_CHROMOSOME_SIZE: u64 = 10_000_000;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("No scaffolds found in assembly")]
    EmptyInput,
}

/// Configuration for the classification engine
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Minimum length in bp for a scaffold to count as chromosome-sized
    pub min_chromosome_size: u64,
    /// Known chromosome count (karyotype) to reconcile against
    pub expected_chromosomes: Option<usize>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            min_chromosome_size: DEFAULT_MIN_CHROMOSOME_SIZE,
            expected_chromosomes: None,
        }
    }
}

/// Per-scaffold classifications plus assembly statistics
#[derive(Debug, Clone)]
pub struct ClassificationOutput {
    /// One result per input record, in input order
    pub scaffolds: Vec<ScaffoldResult>,
    pub stats: AssemblyStats,
}

/// The classification engine
pub struct ClassificationEngine<'a> {
    patterns: &'a PatternSet,
    config: ClassifyConfig,
    assignments: Option<&'a AssignmentMap>,
}

impl<'a> ClassificationEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self {
            patterns,
            config: ClassifyConfig::default(),
            assignments: None,
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(patterns: &'a PatternSet, config: ClassifyConfig) -> Self {
        Self {
            patterns,
            config,
            assignments: None,
        }
    }

    /// Use an authoritative name mapping. Scaffolds found in it bypass the
    /// name and size votes.
    #[must_use]
    pub fn with_assignments(mut self, assignments: &'a AssignmentMap) -> Self {
        self.assignments = Some(assignments);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    /// Chromosome count to reconcile against: the configured value, else the
    /// hint carried by the assignment map
    #[must_use]
    pub fn expected_chromosomes(&self) -> Option<usize> {
        self.config
            .expected_chromosomes
            .or_else(|| self.assignments.and_then(AssignmentMap::expected_chromosomes))
    }

    /// Classify every record and summarize the assembly.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::EmptyInput` if `records` is empty.
    pub fn classify(&self, records: &[SequenceRecord]) -> Result<ClassificationOutput, ClassifyError> {
        if records.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        let lengths: Vec<u64> = records.iter().map(|r| r.length).collect();
        let n50 = calculate_n50(&lengths);
        let largest = lengths.iter().copied().max().unwrap_or(0);

        let mut overridden = 0usize;
        let mut scaffolds = Vec::with_capacity(records.len());

        for record in records {
            let vote = match self.assignments.and_then(|map| map.get(&record.name)) {
                Some(assignment) => {
                    overridden += 1;
                    ClassificationVote::new(
                        assignment.classification,
                        ASSIGNMENT_CONFIDENCE,
                        ASSIGNMENT_METHOD,
                    )
                    .with_chromosome_id(assignment.chromosome_id.clone())
                }
                None => self.vote(record, n50, largest),
            };

            scaffolds.push(ScaffoldResult {
                name: record.name.clone(),
                length: record.length,
                classification: vote.classification,
                confidence: round_to(vote.confidence, 3),
                detection_method: vote.method,
                chromosome_id: vote.chromosome_id,
                gc_content: calculate_gc(&record.sequence_sample).map(|gc| round_to(gc, 4)),
            });
        }

        if self.assignments.is_some() {
            debug!(overridden, total = records.len(), "Applied assembly report assignments");
        }

        if let Some(expected) = self.expected_chromosomes() {
            scaffolds = reconcile_karyotype(scaffolds, expected);
        }

        let stats = build_assembly_stats(records, &scaffolds);
        debug!(
            scaffolds = stats.total_scaffolds,
            chromosomes = stats.chromosome_count,
            n50 = stats.n50,
            "Classification complete"
        );

        Ok(ClassificationOutput { scaffolds, stats })
    }

    /// Fused name and size vote for one record
    fn vote(&self, record: &SequenceRecord, n50: u64, largest: u64) -> ClassificationVote {
        let name_vote = classify_by_name(&record.name, self.patterns);
        let size_vote = classify_by_size(
            record.length,
            n50,
            largest,
            self.config.min_chromosome_size,
        );
        fuse_votes(name_vote, size_vote)
    }
}

/// Classify records with the built-in pattern registry.
///
/// # Errors
///
/// Returns `ClassifyError::EmptyInput` if `records` is empty.
pub fn classify_scaffolds(
    records: &[SequenceRecord],
    config: &ClassifyConfig,
) -> Result<ClassificationOutput, ClassifyError> {
    ClassificationEngine::with_config(PatternSet::builtin(), config.clone()).classify(records)
}
