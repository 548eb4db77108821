//! Parse output: typed collections plus the raw snapshot they index into

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::entities::{Alias, EnvVar, PathEntry, ShellFunction};

/// Everything one load produced.
///
/// Line numbers inside the entities are only valid against `raw_lines` of
/// this same value. After a write the whole thing is stale and must be
/// rebuilt by parsing again.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    pub aliases: Vec<Alias>,
    pub functions: Vec<ShellFunction>,
    pub path_entries: Vec<PathEntry>,
    pub env_vars: Vec<EnvVar>,
    /// Verbatim lines of every visited file, keyed by tilde-contracted path
    pub raw_lines: BTreeMap<String, Vec<String>>,
    /// SHA-256 of each visited file's content at load time
    pub fingerprints: BTreeMap<String, String>,
    /// Resolved location of each file key
    pub locations: BTreeMap<String, PathBuf>,
    /// File keys in the order they were visited
    pub files: Vec<String>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn lines_of(&self, file: &str) -> Option<&[String]> {
        self.raw_lines.get(file).map(|v| v.as_slice())
    }

    /// Absolute path for a file key, falling back to tilde expansion.
    pub fn location_of(&self, file: &str) -> PathBuf {
        self.locations
            .get(file)
            .cloned()
            .unwrap_or_else(|| crate::utils::path::expand_tilde(file))
    }

    pub fn entity_count(&self) -> usize {
        self.aliases.len() + self.functions.len() + self.path_entries.len() + self.env_vars.len()
    }
}

/// Non-fatal diagnostic produced while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub file: String,
    pub line_number: usize,
    pub message: String,
}

impl ParseWarning {
    pub fn new(file: impl Into<String>, line_number: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line_number,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line_number, self.message)
    }
}
