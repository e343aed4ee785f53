//! Scaffold classification engine.
//!
//! Each scaffold gets two independent votes:
//!
//! - [`classify_by_name`]: tiered pattern matching (unlocalized, fragment, chromosome)
//! - [`classify_by_size`]: length relative to the assembly N50 and largest scaffold
//!
//! [`fuse_votes`] combines them under a fixed precedence policy, unless an
//! authoritative [`AssignmentMap`] (e.g. from an NCBI assembly report) already
//! knows the scaffold. With a known karyotype, [`reconcile_karyotype`] then
//! promotes or demotes borderline calls to hit the expected chromosome count,
//! and [`build_assembly_stats`] summarizes the final set.
//!
//! ## Example
//!
//! ```rust
//! use chromdetect::classify::{classify_scaffolds, ClassifyConfig};
//! use chromdetect::{Classification, SequenceRecord};
//!
//! let records = vec![
//!     SequenceRecord::new("chr1", 100_000_000, "ATGC"),
//!     SequenceRecord::new("ctg1", 500_000, "ATGC"),
//! ];
//!
//! let output = classify_scaffolds(&records, &ClassifyConfig::default()).unwrap();
//! assert_eq!(output.scaffolds[0].classification, Classification::Chromosome);
//! assert_eq!(output.scaffolds[1].classification, Classification::Unplaced);
//! assert_eq!(output.stats.chromosome_count, 1);
//! ```

pub mod assignment;
pub mod engine;
pub mod fusion;
pub mod karyotype;
pub mod name;
pub mod size;
pub mod summary;

pub use assignment::{Assignment, AssignmentMap};
pub use engine::{
    classify_scaffolds, ClassificationEngine, ClassificationOutput, ClassifyConfig, ClassifyError,
    DEFAULT_MIN_CHROMOSOME_SIZE,
};
pub use fusion::fuse_votes;
pub use karyotype::reconcile_karyotype;
pub use name::classify_by_name;
pub use size::classify_by_size;
pub use summary::build_assembly_stats;
