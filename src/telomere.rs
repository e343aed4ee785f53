//! Telomeric repeat detection at scaffold ends.
//!
//! A scaffold carrying telomere repeats at both ends is very likely a complete
//! (telomere-to-telomere) chromosome. The 5' end is searched for the reverse
//! complement of each motif (`CCCTAA` for vertebrates) and the 3' end for the
//! forward motif (`TTAGGG`).

use std::sync::OnceLock;

use regex::bytes::{Regex, RegexBuilder};
use serde::Serialize;

use crate::utils::numeric::{count_to_f64, round_to};

/// Default number of bases searched at each scaffold end
pub const DEFAULT_SEARCH_WINDOW: usize = 10_000;
/// Default minimum run of consecutive motif copies
pub const DEFAULT_MIN_REPEATS: usize = 3;

/// A telomere repeat unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelomereMotif {
    pub forward: &'static str,
    pub reverse: &'static str,
    pub organism: &'static str,
}

const fn motif(
    forward: &'static str,
    reverse: &'static str,
    organism: &'static str,
) -> TelomereMotif {
    TelomereMotif {
        forward,
        reverse,
        organism,
    }
}

/// Known motifs, checked in this order
pub const TELOMERE_MOTIFS: [TelomereMotif; 8] = [
    motif("TTAGGG", "CCCTAA", "vertebrate"),
    motif("TTTAGGG", "CCCTAAA", "plant_arabidopsis"),
    motif("TTAGG", "CCTAA", "insect_bombyx"),
    motif("TTAGGC", "GCCTAA", "nematode"),
    motif("TTGGGG", "CCCCAA", "ciliate_tetrahymena"),
    motif("TTTTGGGG", "CCCCAAAA", "ciliate_oxytricha"),
    motif("TTTTAGGG", "CCCTAAAA", "plasmodium"),
    motif("TTTTAGGG", "CCCTAAAA", "green_algae"),
];

/// Telomere evidence for one scaffold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TelomereResult {
    pub has_5prime: bool,
    pub has_3prime: bool,
    pub motif_5prime: Option<&'static str>,
    pub motif_3prime: Option<&'static str>,
    pub repeats_5prime: usize,
    pub repeats_3prime: usize,
    pub organism_type: Option<&'static str>,
}

impl TelomereResult {
    /// Telomere found at either end
    #[must_use]
    pub fn has_telomere(&self) -> bool {
        self.has_5prime || self.has_3prime
    }

    /// Telomeres found at both ends
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.has_5prime && self.has_3prime
    }
}

static BUILTIN_SCANNER: OnceLock<MotifScanner> = OnceLock::new();

/// Case-insensitive `(unit)+` search
fn repeat_regex(unit: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("(?:{})+", regex::escape(unit)))
        .case_insensitive(true)
        .build()
}

/// Longest run of consecutive, non-overlapping copies of a `unit_len` motif
fn longest_run(regex: &Regex, haystack: &[u8], unit_len: usize) -> usize {
    regex
        .find_iter(haystack)
        .map(|m| m.len() / unit_len)
        .max()
        .unwrap_or(0)
}

struct CompiledMotif {
    motif: TelomereMotif,
    forward: Regex,
    reverse: Regex,
}

/// A motif table compiled for repeated scans
pub struct MotifScanner {
    motifs: Vec<CompiledMotif>,
}

impl MotifScanner {
    /// Compile a motif table. Motifs keep their order, which decides ties.
    ///
    /// # Errors
    ///
    /// Returns a `regex::Error` if a motif search cannot be built.
    pub fn new(motifs: &[TelomereMotif]) -> Result<Self, regex::Error> {
        let motifs = motifs
            .iter()
            .filter(|m| !m.forward.is_empty() && !m.reverse.is_empty())
            .map(|&motif| {
                Ok(CompiledMotif {
                    motif,
                    forward: repeat_regex(motif.forward)?,
                    reverse: repeat_regex(motif.reverse)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { motifs })
    }

    /// Scanner over [`TELOMERE_MOTIFS`]
    ///
    /// # Panics
    ///
    /// Panics if an escaped built-in motif fails to compile, which the test suite rules out.
    pub fn builtin() -> &'static MotifScanner {
        BUILTIN_SCANNER.get_or_init(|| {
            Self::new(&TELOMERE_MOTIFS).expect("built-in telomere motifs must compile")
        })
    }

    /// Search both ends of a sequence. See [`detect_telomere`].
    #[must_use]
    pub fn detect(&self, sequence: &str, window: usize, min_repeats: usize) -> TelomereResult {
        let bases = sequence.as_bytes();
        let mut result = TelomereResult::default();
        if bases.is_empty() {
            return result;
        }

        let window = window.min(bases.len() / 2);
        let five_prime = &bases[..window];
        let three_prime = &bases[bases.len() - window..];

        for compiled in &self.motifs {
            let m = compiled.motif;
            let repeats_5 = longest_run(&compiled.reverse, five_prime, m.reverse.len());
            let repeats_3 = longest_run(&compiled.forward, three_prime, m.forward.len());

            if repeats_5 >= min_repeats && repeats_5 > result.repeats_5prime {
                result.has_5prime = true;
                result.motif_5prime = Some(m.reverse);
                result.repeats_5prime = repeats_5;
                result.organism_type = Some(m.organism);
            }

            if repeats_3 >= min_repeats && repeats_3 > result.repeats_3prime {
                result.has_3prime = true;
                result.motif_3prime = Some(m.forward);
                result.repeats_3prime = repeats_3;
                if result.organism_type.is_none() {
                    result.organism_type = Some(m.organism);
                }
            }
        }

        result
    }
}

/// Search both ends of a sequence for telomere repeats.
///
/// The search window is capped at half the sequence length. A motif claims an
/// end when it reaches `min_repeats` and beats every earlier motif there. The
/// organism type comes from the best 5' motif, or else the first 3' hit.
#[must_use]
pub fn detect_telomere(sequence: &str, window: usize, min_repeats: usize) -> TelomereResult {
    MotifScanner::builtin().detect(sequence, window, min_repeats)
}

/// Counts and percentages over a set of telomere results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelomereSummary {
    pub total_scaffolds: usize,
    pub with_telomere: usize,
    pub with_5prime: usize,
    pub with_3prime: usize,
    pub complete_t2t: usize,
    pub percent_with_telomere: f64,
    pub percent_complete: f64,
}

impl TelomereSummary {
    pub fn from_results<'r>(results: impl IntoIterator<Item = &'r TelomereResult>) -> Self {
        let mut summary = Self::default();
        for r in results {
            summary.total_scaffolds += 1;
            summary.with_telomere += usize::from(r.has_telomere());
            summary.with_5prime += usize::from(r.has_5prime);
            summary.with_3prime += usize::from(r.has_3prime);
            summary.complete_t2t += usize::from(r.is_complete());
        }

        if summary.total_scaffolds > 0 {
            let total = count_to_f64(summary.total_scaffolds);
            summary.percent_with_telomere =
                round_to(100.0 * count_to_f64(summary.with_telomere) / total, 1);
            summary.percent_complete =
                round_to(100.0 * count_to_f64(summary.complete_t2t) / total, 1);
        }
        summary
    }
}
