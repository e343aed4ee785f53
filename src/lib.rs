//! # chromdetect
//!
//! A library for detecting chromosome-level scaffolds in genome assemblies.
//!
//! Assemblies come in many naming conventions: `chr1`, `Super_scaffold_4`, `LG_7`,
//! `NC_000001.11`, `HiC_scaffold_12`, or no meaningful names at all. `chromdetect`
//! classifies every scaffold as chromosome, unlocalized, unplaced or other by
//! combining name patterns with size heuristics, and can reconcile the result
//! with an expected karyotype or defer to an NCBI assembly report.
//!
//! ## Features
//!
//! - **Name patterns**: built-in registry of common naming schemes, extensible
//!   with custom pattern files
//! - **Size heuristics**: length relative to the assembly N50 and largest scaffold
//! - **Karyotype reconciliation**: demotes or promotes borderline scaffolds to
//!   match an expected chromosome count
//! - **Assembly reports**: authoritative roles from NCBI `assembly_report.txt`
//! - **Assembly comparison** and **telomere detection** at scaffold ends
//!
//! ## Example
//!
//! ```rust
//! use chromdetect::{classify_scaffolds, Classification, ClassifyConfig, SequenceRecord};
//!
//! let records = vec![
//!     SequenceRecord::without_sample("chr1", 150_000_000),
//!     SequenceRecord::without_sample("chr2", 120_000_000),
//!     SequenceRecord::without_sample("ctg001", 50_000),
//! ];
//!
//! let output = classify_scaffolds(&records, &ClassifyConfig::default()).unwrap();
//! assert_eq!(output.scaffolds[0].classification, Classification::Chromosome);
//! assert_eq!(output.scaffolds[2].classification, Classification::Unplaced);
//! assert_eq!(output.stats.chromosome_count, 2);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Scaffold records, classifications and assembly statistics
//! - [`patterns`]: Built-in and custom scaffold name patterns
//! - [`classify`]: Name and size classifiers, vote fusion, karyotype reconciliation
//! - [`parsing`]: FASTA and NCBI assembly report parsers
//! - [`compare`]: Comparison of two classified assemblies
//! - [`telomere`]: Telomeric repeat detection
//! - [`cli`]: Command-line interface implementation

pub mod classify;
pub mod cli;
pub mod compare;
pub mod core;
pub mod parsing;
pub mod patterns;
pub mod telomere;
pub mod utils;

// Re-export commonly used types for convenience
pub use classify::{classify_scaffolds, ClassificationEngine, ClassificationOutput, ClassifyConfig};
pub use core::stats::AssemblyStats;
pub use core::types::*;
pub use patterns::{merge_patterns, PatternSet};
