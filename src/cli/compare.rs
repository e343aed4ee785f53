use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use serde_json::json;

use crate::cli::classify::{emit, read_assembly};
use crate::cli::options::ClassifyOptions;
use crate::cli::output::{assembly_name, thousands, thousands_signed};
use crate::cli::OutputFormat;
use crate::compare::{compare_assemblies, signed_difference, AssemblyComparison};
use crate::core::stats::AssemblyStats;
use crate::utils::numeric::length_to_f64;

/// Shared and unique chromosome names listed before truncating
const MAX_LISTED_NAMES: usize = 10;

/// Size differences and classification changes listed before truncating
const MAX_LISTED_CHANGES: usize = 20;

#[derive(Args)]
pub struct CompareArgs {
    /// First assembly FASTA (can be gzipped)
    #[arg(required = true)]
    pub fasta1: PathBuf,

    /// Second assembly FASTA (can be gzipped)
    #[arg(required = true)]
    pub fasta2: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub classify: ClassifyOptions,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if matches!(format, OutputFormat::Bed | OutputFormat::Gff) {
        bail!("compare supports summary, json and tsv output, not {format:?}");
    }

    let verbose = verbose && !args.quiet;
    let classifier = args.classify.load(verbose)?;

    let records1 = read_assembly(&args.fasta1, false, args.quiet)?;
    let output1 = classifier.classify(&records1)?;

    let records2 = read_assembly(&args.fasta2, false, args.quiet)?;
    let output2 = classifier.classify(&records2)?;

    let comparison = compare_assemblies(
        &output1.scaffolds,
        &output1.stats,
        &output2.scaffolds,
        &output2.stats,
        &assembly_name(&args.fasta1),
        &assembly_name(&args.fasta2),
    );

    if verbose {
        let summary = comparison.summary();
        eprintln!(
            "Shared chromosomes: {}, classification changes: {}",
            summary.total_shared_chromosomes, summary.classification_changes_count
        );
    }

    let rendered = match format {
        OutputFormat::Json => render_json(&comparison)?,
        OutputFormat::Tsv => render_tsv(&comparison),
        _ => render_summary(&comparison),
    };
    emit(&rendered, args.output.as_deref(), args.quiet)
}

fn render_json(comparison: &AssemblyComparison) -> anyhow::Result<String> {
    let value = json!({
        "comparison": comparison,
        "summary": comparison.summary(),
    });
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Metric rows shared by the text and TSV views: (label, value1, value2)
fn metric_rows(s1: &AssemblyStats, s2: &AssemblyStats) -> Vec<(&'static str, u64, u64)> {
    vec![
        ("total_scaffolds", s1.total_scaffolds as u64, s2.total_scaffolds as u64),
        ("total_length", s1.total_length, s2.total_length),
        ("n50", s1.n50, s2.n50),
        ("n90", s1.n90, s2.n90),
        ("largest_scaffold", s1.largest_scaffold, s2.largest_scaffold),
        ("chromosome_count", s1.chromosome_count as u64, s2.chromosome_count as u64),
        ("chromosome_length", s1.chromosome_length, s2.chromosome_length),
        ("chromosome_n50", s1.chromosome_n50, s2.chromosome_n50),
        ("unlocalized_count", s1.unlocalized_count as u64, s2.unlocalized_count as u64),
        ("unplaced_count", s1.unplaced_count as u64, s2.unplaced_count as u64),
    ]
}

fn render_tsv(comparison: &AssemblyComparison) -> String {
    let mut out = format!(
        "metric\t{}\t{}\tdifference\n",
        comparison.assembly1_name, comparison.assembly2_name
    );
    for (metric, a, b) in metric_rows(&comparison.stats1, &comparison.stats2) {
        let _ = writeln!(out, "{metric}\t{a}\t{b}\t{}", signed_difference(a, b));
    }

    let summary = comparison.summary();
    let _ = writeln!(out, "shared_chromosomes\t\t\t{}", summary.total_shared_chromosomes);
    let _ = writeln!(out, "unique_to_1\t\t\t{}", summary.unique_to_1);
    let _ = writeln!(out, "unique_to_2\t\t\t{}", summary.unique_to_2);
    let _ = writeln!(out, "classification_changes\t\t\t{}", summary.classification_changes_count);
    out
}

fn list_names(out: &mut String, names: &[String]) {
    let shown: Vec<&str> = names.iter().take(MAX_LISTED_NAMES).map(String::as_str).collect();
    let _ = write!(out, "{}", shown.join(", "));
    if names.len() > MAX_LISTED_NAMES {
        let _ = write!(out, " ... (+{} more)", names.len() - MAX_LISTED_NAMES);
    }
    out.push('\n');
}

fn render_summary(comparison: &AssemblyComparison) -> String {
    let rule = "=".repeat(70);
    let thin = "-".repeat(70);
    let name1 = &comparison.assembly1_name;
    let name2 = &comparison.assembly2_name;
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\nASSEMBLY COMPARISON\n{rule}");
    let _ = writeln!(out, "Assembly 1: {name1}");
    let _ = writeln!(out, "Assembly 2: {name2}\n");

    let _ = writeln!(out, "{thin}\nAssembly Statistics\n{thin}");
    let _ = writeln!(out, "{:<22} {:>16} {:>16} {:>16}", "Metric", "Assembly 1", "Assembly 2", "Difference");
    for (metric, a, b) in metric_rows(&comparison.stats1, &comparison.stats2) {
        let _ = writeln!(
            out,
            "{metric:<22} {:>16} {:>16} {:>16}",
            thousands(a),
            thousands(b),
            thousands_signed(signed_difference(a, b))
        );
    }

    let _ = writeln!(out, "\n{thin}\nChromosome Comparison\n{thin}");
    let _ = writeln!(out, "Shared chromosomes:  {}", comparison.shared_chromosomes.len());
    let _ = writeln!(out, "Unique to {name1}: {}", comparison.unique_to_1.len());
    if !comparison.unique_to_1.is_empty() {
        out.push_str("  ");
        list_names(&mut out, &comparison.unique_to_1);
    }
    let _ = writeln!(out, "Unique to {name2}: {}", comparison.unique_to_2.len());
    if !comparison.unique_to_2.is_empty() {
        out.push_str("  ");
        list_names(&mut out, &comparison.unique_to_2);
    }

    if !comparison.size_differences.is_empty() {
        let _ = writeln!(out, "\n{thin}\nSize Differences (shared chromosomes)\n{thin}");
        for (name, diff) in comparison.size_differences.iter().take(MAX_LISTED_CHANGES) {
            let _ = writeln!(out, "  {name:<30} {:>16} bp", thousands_signed(*diff));
        }
        if comparison.size_differences.len() > MAX_LISTED_CHANGES {
            let _ = writeln!(
                out,
                "  ... and {} more",
                comparison.size_differences.len() - MAX_LISTED_CHANGES
            );
        }
    }

    if !comparison.classification_changes.is_empty() {
        let _ = writeln!(out, "\n{thin}\nClassification Changes\n{thin}");
        for change in comparison.classification_changes.iter().take(MAX_LISTED_CHANGES) {
            let _ = writeln!(
                out,
                "  {:<30} {} -> {}",
                change.name, change.classification1, change.classification2
            );
        }
        if comparison.classification_changes.len() > MAX_LISTED_CHANGES {
            let _ = writeln!(
                out,
                "  ... and {} more",
                comparison.classification_changes.len() - MAX_LISTED_CHANGES
            );
        }
    }

    let n50_1 = comparison.stats1.n50;
    let n50_2 = comparison.stats2.n50;
    out.push('\n');
    if n50_1 == n50_2 {
        let _ = writeln!(out, "Both assemblies have the same N50");
    } else {
        let (better, ratio) = if n50_2 > n50_1 {
            (name2, length_to_f64(n50_2) / length_to_f64(n50_1.max(1)))
        } else {
            (name1, length_to_f64(n50_1) / length_to_f64(n50_2.max(1)))
        };
        let _ = writeln!(out, "{better} has the higher N50 ({ratio:.2}x)");
    }

    out
}
