//! Parser for NCBI assembly report files.
//!
//! Assembly reports are tab-separated with `#` comment lines. Metadata lines
//! (`# Assembly name:`, `# Organism name:`, `# Taxid:`) precede a header line
//! naming the columns. The columns used here are:
//!
//! - Sequence-Name: scaffold name as it appears in the FASTA
//! - Sequence-Role: `assembled-molecule`, `unlocalized-scaffold`, `unplaced-scaffold`, ...
//! - Assigned-Molecule: chromosome the sequence belongs to (`1`, `X`, `MT`, `na`)
//! - Assigned-Molecule-Location/Type: `Chromosome`, `Mitochondrion`, ...
//! - GenBank-Accn / RefSeq-Accn: accessions, also accepted as scaffold names
//! - Sequence-Length: length in base pairs
//!
//! The value `na` is treated as absent everywhere.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::warn;

use crate::classify::assignment::{Assignment, AssignmentMap};
use crate::core::types::Classification;
use crate::parsing::ParseError;

/// Data lines with fewer fields than this are skipped
const MIN_FIELDS: usize = 5;

pub const ROLE_ASSEMBLED_MOLECULE: &str = "assembled-molecule";
pub const ROLE_UNLOCALIZED: &str = "unlocalized-scaffold";
pub const ROLE_UNPLACED: &str = "unplaced-scaffold";

/// A single sequence from an assembly report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReportEntry {
    pub sequence_name: String,
    pub sequence_role: String,
    pub assigned_molecule: Option<String>,
    pub assigned_molecule_type: Option<String>,
    pub genbank_accession: Option<String>,
    pub refseq_accession: Option<String>,
    pub length: Option<u64>,
}

impl AssemblyReportEntry {
    /// Sequence name followed by any accessions
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.sequence_name.as_str())
            .chain(self.genbank_accession.as_deref())
            .chain(self.refseq_accession.as_deref())
    }
}

/// A parsed NCBI assembly report
#[derive(Debug, Clone, Default)]
pub struct AssemblyReport {
    pub assembly_name: Option<String>,
    pub organism: Option<String>,
    pub taxid: Option<String>,
    pub entries: Vec<AssemblyReportEntry>,
}

impl AssemblyReport {
    /// Scaffold name (and accessions) to assigned molecule. Later entries win.
    #[must_use]
    pub fn chromosome_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for entry in &self.entries {
            if let Some(molecule) = &entry.assigned_molecule {
                for name in entry.names() {
                    map.insert(name.to_string(), molecule.clone());
                }
            }
        }
        map
    }

    fn names_with_role(&self, role: &str) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|e| e.sequence_role == role)
            .flat_map(AssemblyReportEntry::names)
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn chromosome_scaffolds(&self) -> HashSet<String> {
        self.names_with_role(ROLE_ASSEMBLED_MOLECULE)
    }

    #[must_use]
    pub fn unlocalized_scaffolds(&self) -> HashSet<String> {
        self.names_with_role(ROLE_UNLOCALIZED)
    }

    #[must_use]
    pub fn unplaced_scaffolds(&self) -> HashSet<String> {
        self.names_with_role(ROLE_UNPLACED)
    }

    /// Distinct chromosomes among assembled molecules (organelles excluded)
    #[must_use]
    pub fn expected_chromosome_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sequence_role == ROLE_ASSEMBLED_MOLECULE)
            .filter(|e| {
                e.assigned_molecule_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("chromosome"))
            })
            .filter_map(|e| e.assigned_molecule.as_deref())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Authoritative assignments for the classification engine.
    ///
    /// A name is looked up as chromosome, then unlocalized, then unplaced.
    /// Unplaced scaffolds carry no chromosome ID.
    #[must_use]
    pub fn to_assignment_map(&self) -> AssignmentMap {
        let chromosome_map = self.chromosome_map();
        let chromosomes = self.chromosome_scaffolds();
        let unlocalized = self.unlocalized_scaffolds();

        let mut map = AssignmentMap::new()
            .with_expected_chromosomes(Some(self.expected_chromosome_count()));

        for name in self.unplaced_scaffolds() {
            if !chromosomes.contains(&name) && !unlocalized.contains(&name) {
                map.insert(name, Assignment::new(Classification::Unplaced, None));
            }
        }
        for name in unlocalized {
            if !chromosomes.contains(&name) {
                let id = chromosome_map.get(&name).cloned();
                map.insert(name, Assignment::new(Classification::Unlocalized, id));
            }
        }
        for name in chromosomes {
            let id = chromosome_map.get(&name).cloned();
            map.insert(name, Assignment::new(Classification::Chromosome, id));
        }

        map
    }
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("na") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse an NCBI assembly report from text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if no sequence entries are found.
pub fn parse_assembly_report_text(text: &str) -> Result<AssemblyReport, ParseError> {
    let mut report = AssemblyReport::default();
    // Lowercase column name -> index
    let mut columns: HashMap<String, usize> = HashMap::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        if let Some(content) = line.strip_prefix('#') {
            let content = content.trim();
            if content.contains('\t') && content.to_lowercase().contains("sequence") {
                columns = content
                    .split('\t')
                    .enumerate()
                    .map(|(i, col)| (col.trim().to_lowercase(), i))
                    .collect();
            } else if let Some((key, value)) = content.split_once(':') {
                let value = Some(value.trim().to_string());
                match key.trim().to_lowercase().as_str() {
                    "assembly name" => report.assembly_name = value,
                    "organism name" => report.organism = value,
                    "taxid" => report.taxid = value,
                    _ => {}
                }
            }
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            warn!(
                line = line_no + 1,
                fields = fields.len(),
                "Skipping malformed assembly report line"
            );
            continue;
        }

        let field = |name: &str| {
            columns
                .get(name)
                .and_then(|&i| fields.get(i))
                .map_or("", |s| s.trim())
        };

        let sequence_name = field("sequence-name");
        if sequence_name.is_empty() {
            continue;
        }

        let assigned_molecule_type = present(field("assigned-molecule-location/type"))
            .or_else(|| present(field("assigned-molecule-type")));

        report.entries.push(AssemblyReportEntry {
            sequence_name: sequence_name.to_string(),
            sequence_role: field("sequence-role").to_string(),
            assigned_molecule: present(field("assigned-molecule")),
            assigned_molecule_type,
            genbank_accession: present(field("genbank-accn")),
            refseq_accession: present(field("refseq-accn")),
            length: present(field("sequence-length")).and_then(|s| s.parse().ok()),
        });
    }

    if report.entries.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequence entries found in assembly report".to_string(),
        ));
    }

    Ok(report)
}

/// Parse an NCBI assembly report file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_assembly_report_text`].
pub fn parse_assembly_report_file(path: &Path) -> Result<AssemblyReport, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_assembly_report_text(&text)
}
