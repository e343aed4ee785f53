//! Pattern file loading.
//!
//! Custom rules are supplied as a JSON or YAML document:
//!
//! ```json
//! {
//!   "chromosome_patterns": [{"pattern": "^MyChr_(\\d+)$", "name": "my_chr"}],
//!   "unlocalized_patterns": ["_unassigned"],
//!   "fragment_patterns": ["_piece\\d+"]
//! }
//! ```
//!
//! or the same shape in YAML:
//!
//! ```yaml
//! chromosome_patterns:
//!   - pattern: '^MyChr_(\d+)$'
//!     name: my_chr
//! unlocalized_patterns: [_unassigned]
//! ```
//!
//! Every list is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PatternError;

/// A chromosome rule as written in a pattern file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromosomeRule {
    pub pattern: String,
    /// Method name reported as `name_<name>`
    pub name: String,
}

impl ChromosomeRule {
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
        }
    }
}

/// Uncompiled pattern lists, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinitions {
    #[serde(default)]
    pub chromosome_patterns: Vec<ChromosomeRule>,
    #[serde(default)]
    pub unlocalized_patterns: Vec<String>,
    #[serde(default)]
    pub fragment_patterns: Vec<String>,
}

impl PatternDefinitions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosome_patterns.is_empty()
            && self.unlocalized_patterns.is_empty()
            && self.fragment_patterns.is_empty()
    }
}

// Lenient shape so a missing field is reported with its entry index
#[derive(Deserialize)]
struct RawDefinitions {
    #[serde(default)]
    chromosome_patterns: Vec<RawRule>,
    #[serde(default)]
    unlocalized_patterns: Vec<String>,
    #[serde(default)]
    fragment_patterns: Vec<String>,
}

#[derive(Deserialize)]
struct RawRule {
    pattern: Option<String>,
    name: Option<String>,
}

/// Parse pattern definitions from JSON text.
///
/// # Errors
///
/// Returns `PatternError::InvalidJson` for malformed JSON or wrongly typed lists,
/// `PatternError::NotAnObject` if the root is not an object, and
/// `PatternError::MissingField` for a chromosome rule without `pattern` or `name`.
pub fn parse_pattern_json(text: &str) -> Result<PatternDefinitions, PatternError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(PatternError::NotAnObject);
    }

    from_raw(serde_json::from_value(value)?)
}

/// Parse pattern definitions from YAML text.
///
/// # Errors
///
/// Returns `PatternError::InvalidYaml` for malformed YAML or wrongly typed lists,
/// `PatternError::NotAnObject` if the root is not a mapping, and
/// `PatternError::MissingField` as for JSON.
pub fn parse_pattern_yaml(text: &str) -> Result<PatternDefinitions, PatternError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if !value.is_mapping() {
        return Err(PatternError::NotAnObject);
    }

    from_raw(serde_yaml::from_value(value)?)
}

fn from_raw(raw: RawDefinitions) -> Result<PatternDefinitions, PatternError> {
    let chromosome_patterns = raw
        .chromosome_patterns
        .into_iter()
        .enumerate()
        .map(|(index, rule)| match (rule.pattern, rule.name) {
            (Some(pattern), Some(name)) => Ok(ChromosomeRule { pattern, name }),
            _ => Err(PatternError::MissingField { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatternDefinitions {
        chromosome_patterns,
        unlocalized_patterns: raw.unlocalized_patterns,
        fragment_patterns: raw.fragment_patterns,
    })
}

/// Load pattern definitions from a file.
///
/// `.json` files are parsed as JSON and `.yaml`/`.yml` files as YAML. Any other
/// file is tried as JSON first and parsed as YAML if that fails.
///
/// # Errors
///
/// Returns `PatternError::Io` if the file cannot be read, and any error from
/// [`parse_pattern_json`] or [`parse_pattern_yaml`].
pub fn load_pattern_file(path: &Path) -> Result<PatternDefinitions, PatternError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let text = std::fs::read_to_string(path)?;

    match ext.as_deref() {
        Some("json") => parse_pattern_json(&text),
        Some("yaml" | "yml") => parse_pattern_yaml(&text),
        _ => match parse_pattern_json(&text) {
            Err(PatternError::InvalidJson(_)) => parse_pattern_yaml(&text),
            parsed => parsed,
        },
    }
}
