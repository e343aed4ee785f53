use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::options::{ClassifyOptions, FilterOptions};
use crate::cli::output::{render_results, thousands};
use crate::cli::OutputFormat;
use crate::core::types::{ScaffoldResult, SequenceRecord};
use crate::parsing::fasta::{parse_fasta_file, write_fasta, DEFAULT_SAMPLE_LIMIT};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Input FASTA file (can be gzipped), or '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub classify: ClassifyOptions,

    #[command(flatten)]
    pub filters: FilterOptions,

    /// Write chromosome sequences to a FASTA file
    #[arg(long, value_name = "FILE")]
    pub extract_chromosomes: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let verbose = verbose && !args.quiet;
    let classifier = args.classify.load(verbose)?;

    if verbose {
        eprintln!("chromdetect {}", env!("CARGO_PKG_VERSION"));
        eprintln!("Output format: {format:?}");
        eprintln!("Min chromosome size: {} bp", thousands(args.classify.min_size));
        if let Some(k) = args.classify.karyotype {
            eprintln!("Expected karyotype: {k}");
        }
    }

    let records = read_assembly(&args.input, args.extract_chromosomes.is_some(), args.quiet)?;

    if verbose {
        let total: u64 = records.iter().map(|r| r.length).sum();
        let largest = records.iter().map(|r| r.length).max().unwrap_or(0);
        let smallest = records.iter().map(|r| r.length).min().unwrap_or(0);
        eprintln!("Total assembly length: {} bp", thousands(total));
        eprintln!("Largest scaffold: {} bp", thousands(largest));
        eprintln!("Smallest scaffold: {} bp", thousands(smallest));
    }

    let output = classifier.classify(&records)?;
    let stats = output.stats;

    if verbose {
        eprintln!("Classification complete:");
        eprintln!("  Chromosomes: {}", stats.chromosome_count);
        eprintln!("  Unlocalized: {}", stats.unlocalized_count);
        eprintln!("  Unplaced: {}", stats.unplaced_count);
        eprintln!("  N50: {} bp", thousands(stats.n50));
    }

    if let Some(path) = &args.extract_chromosomes {
        let extracted = extract_chromosomes(path, &records, &output.scaffolds)?;
        if extracted == 0 {
            eprintln!("Warning: No chromosome sequences to extract");
        } else if !args.quiet {
            eprintln!("Extracted {extracted} chromosome sequences to {}", path.display());
        }
    }

    let total = output.scaffolds.len();
    let scaffolds = args.filters.apply(output.scaffolds);
    if verbose && args.filters.is_active() && scaffolds.len() != total {
        eprintln!("Filtered to {} scaffolds (from {total} total)", scaffolds.len());
    }

    let rendered = render_results(format, &scaffolds, &stats)?;
    emit(&rendered, args.output.as_deref(), args.quiet)
}

/// Parse an assembly, with progress messages unless quiet
pub(crate) fn read_assembly(
    path: &Path,
    full_sequences: bool,
    quiet: bool,
) -> anyhow::Result<Vec<SequenceRecord>> {
    let source = if path == Path::new("-") {
        "stdin".to_string()
    } else {
        path.display().to_string()
    };
    if !quiet {
        eprintln!("Parsing {source}...");
    }

    let sample_limit = if full_sequences {
        None
    } else {
        Some(DEFAULT_SAMPLE_LIMIT)
    };
    let records = parse_fasta_file(path, sample_limit)
        .with_context(|| format!("Failed to read FASTA from {source}"))?;

    if !quiet {
        eprintln!("Found {} scaffolds", records.len());
    }
    Ok(records)
}

/// Write chromosome-classified sequences, sorted by name. Returns the number written.
pub(crate) fn extract_chromosomes(
    path: &Path,
    records: &[SequenceRecord],
    scaffolds: &[ScaffoldResult],
) -> anyhow::Result<usize> {
    let mut chromosomes: Vec<(&str, &str)> = records
        .iter()
        .zip(scaffolds)
        .filter(|(_, result)| result.is_chromosome())
        .map(|(record, _)| (record.name.as_str(), record.sequence_sample.as_str()))
        .collect();
    chromosomes.sort_by(|a, b| a.0.cmp(b.0));

    if chromosomes.is_empty() {
        return Ok(0);
    }

    write_fasta(path, chromosomes)
        .with_context(|| format!("Failed to write chromosome FASTA: {}", path.display()))
}

/// Print to stdout or write to a file
pub(crate) fn emit(rendered: &str, output: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            if !quiet {
                eprintln!("Results written to {}", path.display());
            }
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
