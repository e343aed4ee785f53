//! Command-line interface for chromdetect.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **classify**: Classify the scaffolds of one assembly
//! - **batch**: Classify every FASTA file in a directory
//! - **compare**: Compare the classifications of two assemblies
//! - **telomeres**: Scan scaffold ends for telomeric repeats
//! - **patterns**: List or export the built-in naming patterns
//!
//! ## Usage
//!
//! ```text
//! # Human-readable summary
//! chromdetect classify assembly.fasta.gz
//!
//! # Karyotype-informed detection, JSON to a file
//! chromdetect --format json classify assembly.fasta -k 24 -o results.json
//!
//! # Read from stdin, keep only chromosomes as BED
//! zcat assembly.fa.gz | chromdetect --format bed classify - --chromosomes-only
//!
//! # Authoritative roles from an NCBI assembly report
//! chromdetect classify GCF_000001405.40.fna --assembly-report report.txt
//!
//! # Batch mode
//! chromdetect --format tsv batch assemblies/ -o results/
//! ```

use clap::{Parser, Subcommand};

pub mod batch;
pub mod classify;
pub mod compare;
pub mod options;
pub mod output;
pub mod patterns;
pub mod telomeres;

#[derive(Parser)]
#[command(name = "chromdetect")]
#[command(version)]
#[command(about = "Detect chromosome-level scaffolds in genome assemblies")]
#[command(
    long_about = "chromdetect classifies the scaffolds of a genome assembly as chromosome, unlocalized, unplaced or other.\n\nIt combines:\n- Name patterns (chr1, Super_scaffold_1, LG_1, NC_*/CM* accessions, HiC_scaffold_1, ...)\n- Size heuristics relative to the assembly N50 and largest scaffold\n- Optional karyotype-informed adjustment to an expected chromosome count\n- Optional authoritative roles from an NCBI assembly report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "summary")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the scaffolds of an assembly
    Classify(classify::ClassifyArgs),

    /// Classify every FASTA file in a directory
    Batch(batch::BatchArgs),

    /// Compare two assemblies side by side
    Compare(compare::CompareArgs),

    /// Detect telomeric repeats at scaffold ends
    Telomeres(telomeres::TelomereArgs),

    /// Show the built-in naming patterns
    Patterns(patterns::PatternsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Summary,
    Json,
    Tsv,
    Bed,
    Gff,
}
