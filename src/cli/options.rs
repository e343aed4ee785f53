//! Classification flags shared by the `classify`, `batch` and `compare` commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::classify::{
    AssignmentMap, ClassificationEngine, ClassificationOutput, ClassifyConfig, ClassifyError,
    DEFAULT_MIN_CHROMOSOME_SIZE,
};
use crate::core::types::{ScaffoldResult, SequenceRecord};
use crate::parsing::ncbi_report::parse_assembly_report_file;
use crate::patterns::{load_pattern_file, merge_patterns, PatternSet};

#[derive(Args, Clone, Debug)]
pub struct ClassifyOptions {
    /// Expected chromosome count (karyotype) for karyotype-informed detection
    #[arg(short = 'k', long)]
    pub karyotype: Option<usize>,

    /// Minimum size (bp) to consider chromosome-level
    #[arg(short = 's', long, default_value_t = DEFAULT_MIN_CHROMOSOME_SIZE)]
    pub min_size: u64,

    /// Custom patterns file (JSON or YAML) for scaffold name matching
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Check custom patterns after the built-in ones instead of before
    #[arg(long, requires = "patterns")]
    pub append_patterns: bool,

    /// NCBI assembly report for authoritative scaffold classification
    #[arg(long, value_name = "FILE")]
    pub assembly_report: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct FilterOptions {
    /// Only output chromosome-level scaffolds
    #[arg(short = 'c', long)]
    pub chromosomes_only: bool,

    /// Minimum confidence (0.0-1.0) to include a scaffold
    #[arg(long, default_value_t = 0.0, value_parser = parse_confidence, value_name = "FLOAT")]
    pub min_confidence: f64,

    /// Minimum scaffold length (bp) to include in output
    #[arg(long, default_value_t = 0, value_name = "BP")]
    pub min_length: u64,
}

fn parse_confidence(value: &str) -> Result<f64, String> {
    let confidence: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(format!("confidence must be between 0.0 and 1.0, got {confidence}"))
    }
}

impl FilterOptions {
    /// True if any filter would drop scaffolds
    pub fn is_active(&self) -> bool {
        self.chromosomes_only || self.min_confidence > 0.0 || self.min_length > 0
    }

    /// Keep the scaffolds passing every filter, in order
    pub fn apply(&self, scaffolds: Vec<ScaffoldResult>) -> Vec<ScaffoldResult> {
        scaffolds
            .into_iter()
            .filter(|r| !self.chromosomes_only || r.is_chromosome())
            .filter(|r| r.confidence >= self.min_confidence)
            .filter(|r| r.length >= self.min_length)
            .collect()
    }
}

/// Everything loaded from the classification flags, ready to classify records
pub struct Classifier {
    patterns: PatternSet,
    assignments: Option<AssignmentMap>,
    config: ClassifyConfig,
}

impl ClassifyOptions {
    /// Load pattern and assembly report files named by the flags
    ///
    /// # Errors
    ///
    /// Returns an error if a patterns file or assembly report cannot be read or parsed.
    pub fn load(&self, verbose: bool) -> anyhow::Result<Classifier> {
        let patterns = match &self.patterns {
            Some(path) => {
                let custom = load_pattern_file(path)
                    .with_context(|| format!("Invalid patterns file: {}", path.display()))?;
                if verbose {
                    eprintln!(
                        "Loaded {} custom chromosome patterns, {} unlocalized patterns, {} fragment patterns",
                        custom.chromosome_patterns.len(),
                        custom.unlocalized_patterns.len(),
                        custom.fragment_patterns.len()
                    );
                }
                merge_patterns(&custom, !self.append_patterns)?
            }
            None => PatternSet::builtin().clone(),
        };

        let assignments = match &self.assembly_report {
            Some(path) => {
                let report = parse_assembly_report_file(path)
                    .with_context(|| format!("Invalid assembly report: {}", path.display()))?;
                if verbose {
                    eprintln!(
                        "Loaded assembly report: {}",
                        report.assembly_name.as_deref().unwrap_or("unknown")
                    );
                    eprintln!(
                        "  {} sequences, {} chromosomes",
                        report.entries.len(),
                        report.expected_chromosome_count()
                    );
                }
                Some(report.to_assignment_map())
            }
            None => None,
        };

        Ok(Classifier {
            patterns,
            assignments,
            config: ClassifyConfig {
                min_chromosome_size: self.min_size,
                expected_chromosomes: self.karyotype,
            },
        })
    }
}

impl Classifier {
    /// Run the classification engine over parsed records
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::EmptyInput` if `records` is empty.
    pub fn classify(&self, records: &[SequenceRecord]) -> Result<ClassificationOutput, ClassifyError> {
        let mut engine = ClassificationEngine::with_config(&self.patterns, self.config.clone());
        if let Some(assignments) = &self.assignments {
            engine = engine.with_assignments(assignments);
        }
        engine.classify(records)
    }
}
