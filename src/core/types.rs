use serde::{Deserialize, Serialize};

/// Classification assigned to a scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Chromosome-level scaffold
    Chromosome,
    /// Chromosome-associated but not placed (e.g. `chr1_random`)
    Unlocalized,
    /// Fragment or contig with no chromosome assignment
    Unplaced,
    /// No usable signal
    Other,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Self::Chromosome,
        Self::Unlocalized,
        Self::Unplaced,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chromosome => "chromosome",
            Self::Unlocalized => "unlocalized",
            Self::Unplaced => "unplaced",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed FASTA sequence handed to the classification engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// First word of the FASTA definition line
    pub name: String,

    /// Full sequence length in base pairs
    pub length: u64,

    /// Leading bases of the sequence (or the whole sequence) used for GC estimation
    #[serde(default)]
    pub sequence_sample: String,
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, length: u64, sequence_sample: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length,
            sequence_sample: sequence_sample.into(),
        }
    }

    /// A record with a length but no sequence sample
    pub fn without_sample(name: impl Into<String>, length: u64) -> Self {
        Self::new(name, length, String::new())
    }
}

/// A single classifier's opinion about one scaffold
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationVote {
    pub classification: Classification,
    pub confidence: f64,
    pub method: String,
    pub chromosome_id: Option<String>,
}

impl ClassificationVote {
    pub fn new(classification: Classification, confidence: f64, method: impl Into<String>) -> Self {
        Self {
            classification,
            confidence,
            method: method.into(),
            chromosome_id: None,
        }
    }

    #[must_use]
    pub fn with_chromosome_id(mut self, chromosome_id: Option<String>) -> Self {
        self.chromosome_id = chromosome_id;
        self
    }

    #[must_use]
    pub fn is_chromosome(&self) -> bool {
        self.classification == Classification::Chromosome
    }
}

/// Final classification of one scaffold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldResult {
    /// Scaffold name from the FASTA header
    pub name: String,

    /// Scaffold length in base pairs
    pub length: u64,

    pub classification: Classification,

    /// Confidence from 0.0 to 1.0, rounded to 3 decimals
    pub confidence: f64,

    /// How the classification was determined (e.g. `name_chr_explicit`, `size_large`)
    pub detection_method: String,

    /// Inferred chromosome ID (e.g. "1", "X", "MT")
    pub chromosome_id: Option<String>,

    /// GC fraction of the sequence sample, rounded to 4 decimals
    pub gc_content: Option<f64>,
}

impl ScaffoldResult {
    #[must_use]
    pub fn is_chromosome(&self) -> bool {
        self.classification == Classification::Chromosome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_display_matches_serde() {
        for class in Classification::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{class}\""));
        }
    }

    #[test]
    fn test_scaffold_result_serializes_optional_fields() {
        let result = ScaffoldResult {
            name: "chr1".to_string(),
            length: 100_000_000,
            classification: Classification::Chromosome,
            confidence: 0.9,
            detection_method: "name_chr_explicit".to_string(),
            chromosome_id: Some("1".to_string()),
            gc_content: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["name"], "chr1");
        assert_eq!(value["classification"], "chromosome");
        assert_eq!(value["chromosome_id"], "1");
        assert!(value["gc_content"].is_null());
    }
}
