use std::collections::HashMap;

use crate::core::types::Classification;

/// Confidence given to an authoritative assignment
pub const ASSIGNMENT_CONFIDENCE: f64 = 0.99;
/// Method name reported for an authoritative assignment
pub const ASSIGNMENT_METHOD: &str = "ncbi_report";

/// An authoritative classification for one scaffold name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub classification: Classification,
    pub chromosome_id: Option<String>,
}

impl Assignment {
    pub fn new(classification: Classification, chromosome_id: Option<String>) -> Self {
        Self {
            classification,
            chromosome_id,
        }
    }
}

/// Name to assignment lookup, typically built from an NCBI assembly report.
///
/// Scaffolds absent from the map are classified from their name and size as usual.
#[derive(Debug, Clone, Default)]
pub struct AssignmentMap {
    entries: HashMap<String, Assignment>,
    expected_chromosomes: Option<usize>,
}

impl AssignmentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chromosome count implied by the source. Zero is treated as unknown.
    #[must_use]
    pub fn with_expected_chromosomes(mut self, expected: Option<usize>) -> Self {
        self.expected_chromosomes = expected.filter(|&n| n > 0);
        self
    }

    /// Insert an assignment, replacing any earlier one for the same name
    pub fn insert(&mut self, name: impl Into<String>, assignment: Assignment) {
        self.entries.insert(name.into(), assignment);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Assignment> {
        self.entries.get(name)
    }

    /// Chromosome count hint, used only when the caller did not give one
    #[must_use]
    pub fn expected_chromosomes(&self) -> Option<usize> {
        self.expected_chromosomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
