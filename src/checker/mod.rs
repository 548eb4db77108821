//! Checker module for diagnosing a parsed configuration

mod duplicate;
mod warnings;

pub use duplicate::DuplicateChecker;
pub use warnings::ParseWarningChecker;

use crate::model::{Origin, ParsedConfig};

/// Check result
#[derive(Debug)]
pub struct CheckResult {
    pub issues: Vec<CheckIssue>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity, Severity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity, Severity::Warning))
    }

    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for CheckResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single check issue
#[derive(Debug)]
pub struct CheckIssue {
    pub severity: Severity,
    pub message: String,
    /// `file:line` the issue points at
    pub location: Option<String>,
    pub entry_name: Option<String>,
}

impl CheckIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location: None,
            entry_name: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location: None,
            entry_name: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_origin(self, origin: Option<&Origin>) -> Self {
        match origin {
            Some(origin) => self.with_location(origin.to_string()),
            None => self,
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>) -> Self {
        self.entry_name = Some(name.into());
        self
    }
}

/// Trait for checkers
pub trait Checker {
    fn check(&self, config: &ParsedConfig) -> CheckResult;
}

/// Run all checks on a parse result
pub fn check_all(config: &ParsedConfig) -> CheckResult {
    let checkers: [&dyn Checker; 2] = [&DuplicateChecker, &ParseWarningChecker];

    let mut result = CheckResult::new();
    for checker in checkers {
        result.issues.extend(checker.check(config).issues);
    }
    result
}
