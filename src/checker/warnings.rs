//! Parse warnings surfaced as check issues

use super::{CheckIssue, CheckResult, Checker};
use crate::model::ParsedConfig;

/// Reports what the parser had to guess at (e.g. unterminated functions).
pub struct ParseWarningChecker;

impl Checker for ParseWarningChecker {
    fn check(&self, config: &ParsedConfig) -> CheckResult {
        let mut result = CheckResult::new();
        for warning in &config.warnings {
            result.add_issue(
                CheckIssue::warning(warning.message.clone())
                    .with_location(format!("{}:{}", warning.file, warning.line_number)),
            );
        }
        result
    }
}
