//! Duplicate definition checker

use super::{CheckIssue, CheckResult, Checker};
use crate::model::{Origin, ParsedConfig};
use std::collections::BTreeMap;

/// Checks for names defined more than once across all loaded files.
///
/// The shell keeps the last definition, so earlier ones are dead. Disabled
/// aliases are ignored since they define nothing.
pub struct DuplicateChecker;

impl DuplicateChecker {
    fn report<'a>(
        result: &mut CheckResult,
        kind: &str,
        items: impl Iterator<Item = (&'a str, Option<&'a Origin>)>,
    ) {
        let mut seen: BTreeMap<&str, Vec<Option<&Origin>>> = BTreeMap::new();
        for (name, origin) in items {
            seen.entry(name).or_default().push(origin);
        }

        for (name, occurrences) in seen {
            if occurrences.len() < 2 {
                continue;
            }
            let places: Vec<String> = occurrences
                .iter()
                .flatten()
                .map(|o| o.to_string())
                .collect();

            let issue = CheckIssue::warning(format!(
                "Duplicate {} '{}' defined at: {}",
                kind,
                name,
                places.join(", ")
            ))
            .with_origin(occurrences.last().copied().flatten())
            .with_entry(name);

            result.add_issue(issue);
        }
    }
}

impl Checker for DuplicateChecker {
    fn check(&self, config: &ParsedConfig) -> CheckResult {
        let mut result = CheckResult::new();

        Self::report(
            &mut result,
            "alias",
            config
                .aliases
                .iter()
                .filter(|a| a.enabled)
                .map(|a| (a.name.as_str(), a.origin.as_ref())),
        );
        Self::report(
            &mut result,
            "function",
            config
                .functions
                .iter()
                .map(|f| (f.name.as_str(), f.origin.as_ref())),
        );
        Self::report(
            &mut result,
            "environment variable",
            config
                .env_vars
                .iter()
                .map(|v| (v.key.as_str(), v.origin.as_ref())),
        );
        Self::report(
            &mut result,
            "PATH directory",
            config
                .path_entries
                .iter()
                .map(|p| (p.path.as_str(), p.origin.as_ref())),
        );

        result
    }
}
