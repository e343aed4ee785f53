use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use crate::cli::classify::emit;
use crate::cli::OutputFormat;
use crate::patterns::{load_pattern_file, merge_patterns, PatternDefinitions, PatternSet};

#[derive(Args)]
pub struct PatternsArgs {
    /// Show the built-in patterns merged with a custom patterns file
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Place the custom patterns after the built-in ones
    #[arg(long, requires = "patterns")]
    pub append_patterns: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: PatternsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if matches!(format, OutputFormat::Bed | OutputFormat::Gff) {
        bail!("patterns supports summary, json and tsv output, not {format:?}");
    }

    let definitions = match &args.patterns {
        Some(path) => {
            let custom = load_pattern_file(path)
                .with_context(|| format!("Invalid patterns file: {}", path.display()))?;
            merge_patterns(&custom, !args.append_patterns)?.to_definitions()
        }
        None => PatternSet::builtin().to_definitions(),
    };

    if verbose {
        eprintln!(
            "{} chromosome, {} unlocalized, {} fragment patterns",
            definitions.chromosome_patterns.len(),
            definitions.unlocalized_patterns.len(),
            definitions.fragment_patterns.len()
        );
    }

    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&definitions)?;
            json.push('\n');
            json
        }
        OutputFormat::Tsv => render_tsv(&definitions),
        _ => render_text(&definitions),
    };
    emit(&rendered, args.output.as_deref(), true)
}

fn render_text(definitions: &PatternDefinitions) -> String {
    let mut out = String::from("Chromosome patterns (matched against the whole name):\n");
    for rule in &definitions.chromosome_patterns {
        let _ = writeln!(out, "  {:<25} {}", rule.name, rule.pattern);
    }

    out.push_str("\nUnlocalized patterns (matched anywhere in the name):\n");
    for pattern in &definitions.unlocalized_patterns {
        let _ = writeln!(out, "  {pattern}");
    }

    out.push_str("\nFragment patterns (matched anywhere in the name):\n");
    for pattern in &definitions.fragment_patterns {
        let _ = writeln!(out, "  {pattern}");
    }
    out
}

fn render_tsv(definitions: &PatternDefinitions) -> String {
    let mut out = String::from("kind\tname\tpattern\n");
    for rule in &definitions.chromosome_patterns {
        let _ = writeln!(out, "chromosome\t{}\t{}", rule.name, rule.pattern);
    }
    for pattern in &definitions.unlocalized_patterns {
        let _ = writeln!(out, "unlocalized\t\t{pattern}");
    }
    for pattern in &definitions.fragment_patterns {
        let _ = writeln!(out, "fragment\t\t{pattern}");
    }
    out
}
