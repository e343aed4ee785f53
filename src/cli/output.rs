//! Renderers for classification results.
//!
//! Each renderer returns the full document as a `String`, so the caller can
//! print it or write it to a file.

use std::fmt::Write as _;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::core::stats::AssemblyStats;
use crate::core::types::ScaffoldResult;
use crate::utils::numeric::length_to_f64;

/// Number of scaffolds listed in the summary view
pub const SUMMARY_TOP_SCAFFOLDS: usize = 20;

/// Source column written to GFF3 output
const GFF_SOURCE: &str = "chromdetect";

/// Group digits in threes: `1234567` -> `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed variant of [`thousands`]
pub fn thousands_signed(value: i64) -> String {
    if value < 0 {
        format!("-{}", thousands(value.unsigned_abs()))
    } else {
        thousands(value.unsigned_abs())
    }
}

/// File extension used for a format when writing result files
pub fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Summary => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Tsv => "tsv",
        OutputFormat::Bed => "bed",
        OutputFormat::Gff => "gff",
    }
}

/// Display name of an assembly file: the file name without FASTA and
/// compression extensions
pub fn assembly_name(path: &Path) -> String {
    if path == Path::new("-") {
        return "Assembly".to_string();
    }

    let mut name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    for suffix in [".gz", ".bgz"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }
    for suffix in [".fasta", ".fna", ".fa"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
            break;
        }
    }
    name
}

/// Render classification results in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_results(
    format: OutputFormat,
    scaffolds: &[ScaffoldResult],
    stats: &AssemblyStats,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Summary => render_summary(scaffolds, stats),
        OutputFormat::Json => render_json(scaffolds, stats)?,
        OutputFormat::Tsv => render_tsv(scaffolds),
        OutputFormat::Bed => render_bed(scaffolds),
        OutputFormat::Gff => render_gff(scaffolds),
    })
}

pub fn render_json(scaffolds: &[ScaffoldResult], stats: &AssemblyStats) -> anyhow::Result<String> {
    let output = serde_json::json!({
        "summary": stats,
        "scaffolds": scaffolds,
    });
    let mut rendered = serde_json::to_string_pretty(&output)?;
    rendered.push('\n');
    Ok(rendered)
}

pub fn render_tsv(scaffolds: &[ScaffoldResult]) -> String {
    let mut out =
        String::from("name\tlength\tclassification\tconfidence\tmethod\tchromosome_id\tgc_content\n");
    for r in scaffolds {
        let gc = r.gc_content.map(|gc| format!("{gc:.4}")).unwrap_or_default();
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.name,
            r.length,
            r.classification,
            r.confidence,
            r.detection_method,
            r.chromosome_id.as_deref().unwrap_or(""),
            gc,
        );
    }
    out
}

/// BED6: one interval per scaffold, score is confidence scaled to 0-1000
pub fn render_bed(scaffolds: &[ScaffoldResult]) -> String {
    let mut out = String::new();
    for r in scaffolds {
        let _ = writeln!(
            out,
            "{}\t0\t{}\t{}\t{}\t.",
            r.name,
            r.length,
            r.classification,
            bed_score(r.confidence),
        );
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bed_score(confidence: f64) -> u16 {
    (confidence.clamp(0.0, 1.0) * 1000.0).round() as u16
}

/// Percent-encode characters reserved in GFF3 attribute values
fn escape_gff(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ';' | '=' | '&' | ',' | '%' | '\t' | '\n' | '\r' => {
                let _ = write!(out, "%{:02X}", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out
}

/// GFF3: one `region` feature per scaffold
pub fn render_gff(scaffolds: &[ScaffoldResult]) -> String {
    let mut out = String::from("##gff-version 3\n");
    for r in scaffolds {
        let mut attributes = format!(
            "ID={};classification={};confidence={};method={}",
            escape_gff(&r.name),
            r.classification,
            r.confidence,
            escape_gff(&r.detection_method),
        );
        if let Some(id) = &r.chromosome_id {
            let _ = write!(attributes, ";chromosome_id={}", escape_gff(id));
        }
        if let Some(gc) = r.gc_content {
            let _ = write!(attributes, ";gc_content={gc:.4}");
        }

        let _ = writeln!(
            out,
            "{}\t{GFF_SOURCE}\tregion\t1\t{}\t{}\t.\t.\t{attributes}",
            r.name, r.length, r.confidence,
        );
    }
    out
}

/// Human-readable report: assembly statistics plus the largest scaffolds
pub fn render_summary(scaffolds: &[ScaffoldResult], stats: &AssemblyStats) -> String {
    let rule = "=".repeat(60);
    let thin = "-".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\nCHROMDETECT ASSEMBLY ANALYSIS\n{rule}\n");
    let _ = writeln!(out, "Total scaffolds:     {}", thousands(stats.total_scaffolds as u64));
    let _ = writeln!(
        out,
        "Total length:        {} bp ({:.2} Gb)",
        thousands(stats.total_length),
        length_to_f64(stats.total_length) / 1e9
    );
    let _ = writeln!(
        out,
        "N50:                 {} bp ({:.1} Mb)",
        thousands(stats.n50),
        length_to_f64(stats.n50) / 1e6
    );
    let _ = writeln!(out, "N90:                 {} bp", thousands(stats.n90));
    let _ = writeln!(out, "Largest scaffold:    {} bp", thousands(stats.largest_scaffold));

    let _ = writeln!(out, "\nScaffold Classification:");
    let _ = writeln!(
        out,
        "  Chromosomes:       {} ({:.2} Gb, {:.1}% of assembly)",
        thousands(stats.chromosome_count as u64),
        length_to_f64(stats.chromosome_length) / 1e9,
        stats.chromosome_fraction() * 100.0
    );
    let _ = writeln!(out, "  Unlocalized:       {}", thousands(stats.unlocalized_count as u64));
    let _ = writeln!(out, "  Unplaced:          {}", thousands(stats.unplaced_count as u64));
    if stats.other_count > 0 {
        let _ = writeln!(out, "  Other:             {}", thousands(stats.other_count as u64));
    }

    let _ = writeln!(
        out,
        "\nChromosome N50:      {} bp ({:.1} Mb)",
        thousands(stats.chromosome_n50),
        length_to_f64(stats.chromosome_n50) / 1e6
    );
    if let Some(gc) = stats.gc_content {
        let _ = writeln!(out, "GC content:          {:.1}%", gc * 100.0);
    }

    let _ = writeln!(out, "\n{thin}\nTop {SUMMARY_TOP_SCAFFOLDS} Scaffolds:\n{thin}");

    let mut top: Vec<&ScaffoldResult> = scaffolds.iter().collect();
    top.sort_by(|a, b| b.length.cmp(&a.length));
    for r in top.into_iter().take(SUMMARY_TOP_SCAFFOLDS) {
        let id = r
            .chromosome_id
            .as_ref()
            .map(|id| format!(" ({id})"))
            .unwrap_or_default();
        let gc = r
            .gc_content
            .map(|gc| format!(" GC:{:.1}%", gc * 100.0))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<30} {:>12} bp  {:<12} {:.2}{id}{gc}",
            r.name,
            thousands(r.length),
            r.classification.as_str(),
            r.confidence,
        );
    }

    out
}
