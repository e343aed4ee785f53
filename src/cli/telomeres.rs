use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use serde::Serialize;
use serde_json::json;

use crate::cli::classify::{emit, read_assembly};
use crate::cli::output::thousands;
use crate::cli::OutputFormat;
use crate::core::types::SequenceRecord;
use crate::telomere::{
    detect_telomere, TelomereResult, TelomereSummary, DEFAULT_MIN_REPEATS, DEFAULT_SEARCH_WINDOW,
};

#[derive(Args)]
pub struct TelomereArgs {
    /// Input FASTA file (can be gzipped), or '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Bases searched at each scaffold end
    #[arg(long, default_value_t = DEFAULT_SEARCH_WINDOW)]
    pub window: usize,

    /// Minimum consecutive motif copies to call a telomere
    #[arg(long, default_value_t = DEFAULT_MIN_REPEATS)]
    pub min_repeats: usize,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Telomere evidence tagged with its scaffold
#[derive(Debug, Serialize)]
struct ScaffoldTelomere<'a> {
    name: &'a str,
    length: u64,
    #[serde(flatten)]
    result: TelomereResult,
    has_telomere: bool,
    is_complete: bool,
}

pub fn run(args: TelomereArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if matches!(format, OutputFormat::Bed | OutputFormat::Gff) {
        bail!("telomeres supports summary, json and tsv output, not {format:?}");
    }
    if args.min_repeats == 0 {
        bail!("--min-repeats must be at least 1");
    }

    let records = read_assembly(&args.input, true, args.quiet)?;
    let scaffolds = scan(&records, args.window, args.min_repeats);
    let summary = TelomereSummary::from_results(scaffolds.iter().map(|s| &s.result));

    if verbose && !args.quiet {
        eprintln!(
            "Telomeres found on {} of {} scaffolds ({} complete)",
            summary.with_telomere, summary.total_scaffolds, summary.complete_t2t
        );
    }

    let rendered = match format {
        OutputFormat::Json => render_json(&scaffolds, &summary)?,
        OutputFormat::Tsv => render_tsv(&scaffolds),
        _ => render_text(&scaffolds, &summary),
    };
    emit(&rendered, args.output.as_deref(), args.quiet)
}

fn scan(records: &[SequenceRecord], window: usize, min_repeats: usize) -> Vec<ScaffoldTelomere<'_>> {
    records
        .iter()
        .map(|record| {
            let result = detect_telomere(&record.sequence_sample, window, min_repeats);
            ScaffoldTelomere {
                name: &record.name,
                length: record.length,
                has_telomere: result.has_telomere(),
                is_complete: result.is_complete(),
                result,
            }
        })
        .collect()
}

fn render_json(scaffolds: &[ScaffoldTelomere<'_>], summary: &TelomereSummary) -> anyhow::Result<String> {
    let value = json!({
        "summary": summary,
        "scaffolds": scaffolds,
    });
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_tsv(scaffolds: &[ScaffoldTelomere<'_>]) -> String {
    let mut out = String::from(
        "name\tlength\thas_5prime\thas_3prime\tmotif_5prime\tmotif_3prime\trepeats_5prime\trepeats_3prime\torganism_type\tis_complete\n",
    );
    for s in scaffolds {
        let r = &s.result;
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            s.name,
            s.length,
            r.has_5prime,
            r.has_3prime,
            r.motif_5prime.unwrap_or(""),
            r.motif_3prime.unwrap_or(""),
            r.repeats_5prime,
            r.repeats_3prime,
            r.organism_type.unwrap_or(""),
            s.is_complete,
        );
    }
    out
}

fn mark(found: bool) -> &'static str {
    if found {
        "yes"
    } else {
        "-"
    }
}

fn render_text(scaffolds: &[ScaffoldTelomere<'_>], summary: &TelomereSummary) -> String {
    let rule = "=".repeat(70);
    let thin = "-".repeat(70);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\nTELOMERE DETECTION\n{rule}");
    let _ = writeln!(out, "Scaffolds scanned:   {}", summary.total_scaffolds);
    let _ = writeln!(
        out,
        "With telomere:       {} ({:.1}%)",
        summary.with_telomere, summary.percent_with_telomere
    );
    let _ = writeln!(out, "  5' end:            {}", summary.with_5prime);
    let _ = writeln!(out, "  3' end:            {}", summary.with_3prime);
    let _ = writeln!(
        out,
        "Complete (T2T):      {} ({:.1}%)",
        summary.complete_t2t, summary.percent_complete
    );

    let _ = writeln!(out, "\n{thin}");
    let _ = writeln!(
        out,
        "  {:<30} {:>14}  {:>4} {:>4}  {}",
        "Scaffold", "Length (bp)", "5'", "3'", "Organism"
    );
    let _ = writeln!(out, "{thin}");
    for s in scaffolds.iter().filter(|s| s.has_telomere) {
        let _ = writeln!(
            out,
            "  {:<30} {:>14}  {:>4} {:>4}  {}",
            s.name,
            thousands(s.length),
            mark(s.result.has_5prime),
            mark(s.result.has_3prime),
            s.result.organism_type.unwrap_or("unknown"),
        );
    }
    out
}
