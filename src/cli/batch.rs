use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use crate::cli::classify::{extract_chromosomes, read_assembly};
use crate::cli::options::{Classifier, ClassifyOptions, FilterOptions};
use crate::cli::output::{assembly_name, extension, render_results, thousands};
use crate::cli::OutputFormat;
use crate::core::stats::AssemblyStats;
use crate::parsing::fasta::is_fasta_file;

/// Name of the per-run summary table written to the output directory
pub const BATCH_SUMMARY_FILE: &str = "batch_summary.tsv";

#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing FASTA files
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Output directory (default: <DIR>/chromdetect_results)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub classify: ClassifyOptions,

    #[command(flatten)]
    pub filters: FilterOptions,

    /// Also write chromosome sequences to <stem>_chromosomes.fasta per input
    #[arg(long)]
    pub extract_chromosomes: bool,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Outcome of one file in a batch
enum BatchOutcome {
    Done(AssemblyStats),
    Failed(String),
}

pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let verbose = verbose && !args.quiet;

    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }

    let files = find_fasta_files(&args.dir)?;
    if files.is_empty() {
        bail!("No FASTA files found in {}", args.dir.display());
    }

    let classifier = args.classify.load(verbose)?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| args.dir.join("chromdetect_results"));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    if !args.quiet {
        eprintln!("Found {} FASTA files in {}", files.len(), args.dir.display());
        eprintln!("Results will be written to {}", output_dir.display());
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let file_name = display_name(path);
        if !args.quiet {
            eprintln!("[{}/{}] Processing {file_name}...", i + 1, files.len());
        }

        let outcome = match process_file(&args, &classifier, format, path, &output_dir) {
            Ok(stats) => {
                if verbose {
                    eprintln!(
                        "  -> {} chromosomes, N50={} bp",
                        stats.chromosome_count,
                        thousands(stats.n50)
                    );
                }
                BatchOutcome::Done(stats)
            }
            Err(e) => {
                eprintln!("  Error processing {file_name}: {e:#}");
                BatchOutcome::Failed(format!("{e:#}"))
            }
        };
        outcomes.push((file_name, outcome));
    }

    let summary_path = output_dir.join(BATCH_SUMMARY_FILE);
    std::fs::write(&summary_path, render_batch_summary(&outcomes))
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    if !args.quiet {
        let successful = outcomes
            .iter()
            .filter(|(_, o)| matches!(o, BatchOutcome::Done(_)))
            .count();
        eprintln!("\nBatch complete: {successful}/{} files processed", files.len());
        eprintln!("Summary written to {}", summary_path.display());
    }

    Ok(())
}

/// FASTA files directly inside `dir`, sorted by path
fn find_fasta_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && is_fasta_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn process_file(
    args: &BatchArgs,
    classifier: &Classifier,
    format: OutputFormat,
    path: &Path,
    output_dir: &Path,
) -> anyhow::Result<AssemblyStats> {
    let records = read_assembly(path, args.extract_chromosomes, true)?;
    let output = classifier.classify(&records)?;
    let stem = assembly_name(path);

    if args.extract_chromosomes {
        let fasta_path = output_dir.join(format!("{stem}_chromosomes.fasta"));
        extract_chromosomes(&fasta_path, &records, &output.scaffolds)?;
    }

    let scaffolds = args.filters.apply(output.scaffolds);
    let rendered = render_results(format, &scaffolds, &output.stats)?;
    let out_path = output_dir.join(format!("{stem}.{}", extension(format)));
    std::fs::write(&out_path, rendered)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    Ok(output.stats)
}

fn render_batch_summary(outcomes: &[(String, BatchOutcome)]) -> String {
    let mut out = String::from("file\tscaffolds\tchromosomes\ttotal_length\tn50\terror\n");
    for (file, outcome) in outcomes {
        let _ = match outcome {
            BatchOutcome::Done(stats) => writeln!(
                out,
                "{file}\t{}\t{}\t{}\t{}\t",
                stats.total_scaffolds, stats.chromosome_count, stats.total_length, stats.n50
            ),
            BatchOutcome::Failed(error) => {
                writeln!(out, "{file}\t\t\t\t\t{}", error.replace(['\t', '\n'], " "))
            }
        };
    }
    out
}
