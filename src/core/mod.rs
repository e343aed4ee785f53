//! Core data types and statistics for scaffold classification.
//!
//! - [`SequenceRecord`]: a parsed FASTA sequence (name, length, sequence sample)
//! - [`Classification`]: the closed set of scaffold classes
//! - [`ClassificationVote`]: one classifier's opinion about a scaffold
//! - [`ScaffoldResult`]: the final per-scaffold output record
//! - [`AssemblyStats`]: assembly-wide summary statistics
//!
//! ## Scaffold Classes
//!
//! | Class | Meaning | Example names |
//! |-------|---------|---------------|
//! | chromosome  | chromosome-level scaffold | chr1, Super_scaffold_4, LG_7 |
//! | unlocalized | belongs to a chromosome, position unknown | chr1_random, chrUn_xxx |
//! | unplaced    | fragment or contig | ctg123, contig_001 |
//! | other       | no usable signal | scaffold_xyz |
//!
//! [`SequenceRecord`]: types::SequenceRecord
//! [`Classification`]: types::Classification
//! [`ClassificationVote`]: types::ClassificationVote
//! [`ScaffoldResult`]: types::ScaffoldResult
//! [`AssemblyStats`]: stats::AssemblyStats

pub mod sequence_stats;
pub mod stats;
pub mod types;
