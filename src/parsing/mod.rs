//! Input parsers.
//!
//! - **FASTA** (plain, gzip, bgzip or stdin): scaffold names, lengths and
//!   sequence samples for the classification engine
//! - **NCBI assembly reports**: authoritative scaffold roles and chromosome
//!   assignments
//!
//! ## Example
//!
//! ```rust,no_run
//! use chromdetect::parsing::fasta::{parse_fasta_file, DEFAULT_SAMPLE_LIMIT};
//! use chromdetect::parsing::ncbi_report::parse_assembly_report_file;
//! use std::path::Path;
//!
//! let records = parse_fasta_file(Path::new("assembly.fa.gz"), Some(DEFAULT_SAMPLE_LIMIT)).unwrap();
//! let report = parse_assembly_report_file(Path::new("assembly_report.txt")).unwrap();
//! let assignments = report.to_assignment_map();
//! ```

use thiserror::Error;

pub mod fasta;
pub mod ncbi_report;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}
