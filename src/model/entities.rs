//! Typed entities recovered from shell rc files
//!
//! Every entity carries its provenance: the file it came from and the
//! 1-based line (or inclusive line range) it occupies in the snapshot it
//! was parsed from. Entities created in memory have no [`Origin`] and can
//! only ever be appended.

use serde::{Deserialize, Serialize};

use super::category::{classify_alias, AliasCategory};

/// Where a parsed entity lives: file key plus an inclusive 1-based line range.
///
/// `(file, line)` is also the entity's identity when a save diffs the
/// current state against the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Origin {
    pub file: String,
    pub line: usize,
    pub end_line: usize,
}

impl Origin {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            end_line: line,
        }
    }

    pub fn with_end_line(mut self, end_line: usize) -> Self {
        self.end_line = end_line;
        self
    }

    /// 0-based index of the first line.
    pub fn start_index(&self) -> usize {
        self.line.saturating_sub(1)
    }

    /// 0-based index of the last line.
    pub fn end_index(&self) -> usize {
        self.end_line.saturating_sub(1)
    }

    pub fn is_single_line(&self) -> bool {
        self.line == self.end_line
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single_line() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}:{}-{}", self.file, self.line, self.end_line)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub expansion: String,
    /// `false` for a commented-out `# alias ...` line
    pub enabled: bool,
    pub category: AliasCategory,
    /// File the alias belongs to; new aliases with `None` go to the primary file
    pub source_file: Option<String>,
    pub origin: Option<Origin>,
}

impl Alias {
    pub fn new(name: impl Into<String>, expansion: impl Into<String>) -> Self {
        let name = name.into();
        let expansion = expansion.into();
        Self {
            category: classify_alias(&name, &expansion),
            name,
            expansion,
            enabled: true,
            source_file: None,
            origin: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.source_file = Some(origin.file.clone());
        self.origin = Some(origin);
        self
    }

    /// Change the expansion and re-derive the category.
    pub fn set_expansion(&mut self, expansion: impl Into<String>) {
        self.expansion = expansion.into();
        self.category = classify_alias(&self.name, &self.expansion);
    }
}

/// A shell function, `name() { ... }` or `function name { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellFunction {
    pub name: String,
    /// Dedented interior lines joined with `\n`
    pub body: String,
    /// Text of the `#` comment immediately above the definition, if any
    pub description: String,
    pub source_file: Option<String>,
    pub origin: Option<Origin>,
}

impl ShellFunction {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            description: String::new(),
            source_file: None,
            origin: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.source_file = Some(origin.file.clone());
        self.origin = Some(origin);
        self
    }
}

/// One directory of a `PATH` assignment.
///
/// `$PATH`/`${PATH}` never appear as entries; the PATH line generator adds
/// the `:$PATH` suffix back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub path: String,
    /// Position within its own PATH statement, starting at 0
    pub order: usize,
    pub source_file: Option<String>,
    pub origin: Option<Origin>,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, order: usize) -> Self {
        Self {
            path: path.into(),
            order,
            source_file: None,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.source_file = Some(origin.file.clone());
        self.origin = Some(origin);
        self
    }
}

/// An exported (or plainly assigned) environment variable other than `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    /// Raw, unquoted value; may itself be a `$(...)` expression
    pub value: String,
    /// Value is read from the macOS keychain at shell startup
    pub keychain: bool,
    pub source_file: Option<String>,
    pub origin: Option<Origin>,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: key.into(),
            keychain: crate::parser::line::is_keychain_derived(&value),
            value,
            source_file: None,
            origin: None,
        }
    }

    /// A variable whose value is looked up from the keychain item `service`.
    pub fn keychain(key: impl Into<String>, service: &str) -> Self {
        Self::new(key, crate::writer::generate::keychain_lookup(service))
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.source_file = Some(origin.file.clone());
        self.origin = Some(origin);
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.keychain = crate::parser::line::is_keychain_derived(&self.value);
    }

    /// Keychain service name (`-s`) when the value is a keychain lookup.
    pub fn keychain_service(&self) -> Option<String> {
        if !self.keychain {
            return None;
        }
        crate::parser::line::keychain_service(&self.value)
    }
}
