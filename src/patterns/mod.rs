//! Scaffold name patterns.
//!
//! Three ordered rule lists drive the name classifier:
//!
//! - **chromosome** rules match the whole name (case-insensitive) and may capture
//!   the chromosome ID in group 1 (`chr1` → `1`, `Super_scaffold_X` → `X`)
//! - **unlocalized** rules match anywhere in the name (`chr1_random`, `chrUn_...`)
//! - **fragment** rules match anywhere in the name (`ctg12`, `contig_001`, `_pilon`)
//!
//! The first matching rule in list order wins, so order is significant.
//!
//! The built-in registry lives in `patterns/builtin.json`, is embedded at compile
//! time and compiled once on first use. Custom rules are combined with it through
//! [`merge_patterns`], which never touches the built-in set.
//!
//! ## Example
//!
//! ```rust
//! use chromdetect::patterns::{merge_patterns, ChromosomeRule, PatternDefinitions, PatternSet};
//!
//! let custom = PatternDefinitions {
//!     chromosome_patterns: vec![ChromosomeRule::new(r"^MyScaffold_(\d+)$", "my_scaffold")],
//!     ..PatternDefinitions::default()
//! };
//!
//! let merged = merge_patterns(&custom, true).unwrap();
//! assert_eq!(merged.chromosome[0].method(), "my_scaffold");
//! assert_eq!(merged.chromosome.len(), PatternSet::builtin().chromosome.len() + 1);
//! ```

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

pub mod loader;

pub use loader::{
    load_pattern_file, parse_pattern_json, parse_pattern_yaml, ChromosomeRule, PatternDefinitions,
};

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Failed to read patterns file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid YAML format: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("chromosome_patterns entry {index} must have both 'pattern' and 'name' fields")]
    MissingField { index: usize },

    #[error("Patterns file must contain an object at root level")]
    NotAnObject,
}

/// Built-in registry, embedded at compile time (validated by build.rs)
const BUILTIN_PATTERNS: &str = include_str!("../../patterns/builtin.json");

static BUILTIN: OnceLock<PatternSet> = OnceLock::new();

fn compile(source: &str, pattern: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile a search-anywhere rule (unlocalized and fragment lists)
fn compile_search(pattern: &str) -> Result<Regex, PatternError> {
    compile(pattern, pattern)
}

/// A chromosome naming rule: a full-string regex plus the method name it reports
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: String,
    regex: Regex,
    method: String,
}

impl NamePattern {
    /// Compile a chromosome rule. The pattern is anchored at both ends, so
    /// `chr(\d+)` behaves like `^chr(\d+)$`.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidRegex` if the pattern does not compile.
    pub fn new(pattern: &str, method: impl Into<String>) -> Result<Self, PatternError> {
        let regex = compile(&format!("^(?:{pattern})$"), pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            method: method.into(),
        })
    }

    /// The pattern as written by its author
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Match the whole name. On success returns the chromosome ID captured by
    /// group 1, if the rule has one and it participated in the match.
    #[must_use]
    pub fn match_name(&self, name: &str) -> Option<Option<String>> {
        self.regex
            .captures(name)
            .map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
    }
}

/// The three ordered rule lists used by the name classifier
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    pub chromosome: Vec<NamePattern>,
    pub unlocalized: Vec<Regex>,
    pub fragment: Vec<Regex>,
}

impl PatternSet {
    /// The process-wide built-in registry
    ///
    /// # Panics
    ///
    /// Panics if the embedded registry fails to compile, which the test suite rules out.
    pub fn builtin() -> &'static PatternSet {
        BUILTIN.get_or_init(|| {
            parse_pattern_json(BUILTIN_PATTERNS)
                .and_then(|definitions| Self::from_definitions(&definitions))
                .expect("embedded pattern registry must compile")
        })
    }

    /// Compile a set of pattern definitions on their own (without the built-ins)
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidRegex` for the first rule that fails to compile.
    pub fn from_definitions(definitions: &PatternDefinitions) -> Result<Self, PatternError> {
        let chromosome = definitions
            .chromosome_patterns
            .iter()
            .map(|rule| NamePattern::new(&rule.pattern, rule.name.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let unlocalized = definitions
            .unlocalized_patterns
            .iter()
            .map(|p| compile_search(p))
            .collect::<Result<Vec<_>, _>>()?;
        let fragment = definitions
            .fragment_patterns
            .iter()
            .map(|p| compile_search(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            chromosome,
            unlocalized,
            fragment,
        })
    }

    /// Back to the file representation (e.g. to export the built-in registry)
    #[must_use]
    pub fn to_definitions(&self) -> PatternDefinitions {
        PatternDefinitions {
            chromosome_patterns: self
                .chromosome
                .iter()
                .map(|p| ChromosomeRule::new(p.pattern(), p.method()))
                .collect(),
            unlocalized_patterns: self.unlocalized.iter().map(|r| r.as_str().to_string()).collect(),
            fragment_patterns: self.fragment.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }

    /// First unlocalized rule found anywhere in the name
    #[must_use]
    pub fn find_unlocalized(&self, name: &str) -> Option<&Regex> {
        self.unlocalized.iter().find(|re| re.is_match(name))
    }

    /// First fragment rule found anywhere in the name
    #[must_use]
    pub fn find_fragment(&self, name: &str) -> Option<&Regex> {
        self.fragment.iter().find(|re| re.is_match(name))
    }

    /// First chromosome rule matching the whole name, with the captured chromosome ID
    #[must_use]
    pub fn find_chromosome(&self, name: &str) -> Option<(&NamePattern, Option<String>)> {
        self.chromosome
            .iter()
            .find_map(|rule| rule.match_name(name).map(|id| (rule, id)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosome.len() + self.unlocalized.len() + self.fragment.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Combine custom rules with the built-in registry.
///
/// With `prepend` the custom rules are checked first in every list (custom + built-in);
/// otherwise they are appended (built-in + custom). The built-in set is not modified.
///
/// # Errors
///
/// Returns `PatternError::InvalidRegex` if any custom rule fails to compile.
pub fn merge_patterns(
    custom: &PatternDefinitions,
    prepend: bool,
) -> Result<PatternSet, PatternError> {
    let custom = PatternSet::from_definitions(custom)?;
    let builtin = PatternSet::builtin();

    let join = |first: &[Regex], second: &[Regex]| -> Vec<Regex> {
        first.iter().chain(second).cloned().collect()
    };

    let merged = if prepend {
        PatternSet {
            chromosome: custom.chromosome.iter().chain(&builtin.chromosome).cloned().collect(),
            unlocalized: join(&custom.unlocalized, &builtin.unlocalized),
            fragment: join(&custom.fragment, &builtin.fragment),
        }
    } else {
        PatternSet {
            chromosome: builtin.chromosome.iter().chain(&custom.chromosome).cloned().collect(),
            unlocalized: join(&builtin.unlocalized, &custom.unlocalized),
            fragment: join(&builtin.fragment, &custom.fragment),
        }
    };

    Ok(merged)
}
