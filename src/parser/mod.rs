//! # Parser Module
//!
//! Turns an ordered list of shell startup files into a [`ParsedConfig`].
//!
//! ## Architecture Overview
//!
//! ```text
//! parser/
//! ├── mod.rs          - This file: multi-file scan + source following
//! ├── line.rs         - Stateless single-line recognisers
//! ├── function.rs     - FunctionBuilder (brace counting)
//! ├── patterns.rs     - Regex patterns (ALIAS_*, FUNC_*, PATH_*, ...)
//! └── common.rs       - Quote-aware comment/brace helpers
//! ```
//!
//! ## Quick Reference
//!
//! | Line shape | Produces | Multi-line |
//! |------------|----------|------------|
//! | `alias n='v'` / `# alias n='v'` | [`Alias`] | ❌ |
//! | `name() {` / `function name {` | [`ShellFunction`] | ✅ Brace counting |
//! | `export PATH="a:b:$PATH"` | one [`PathEntry`] per segment | ❌ |
//! | `export KEY=value` | [`EnvVar`] | ❌ |
//! | `source file` / `. file` | entities of the sourced file | ❌ |
//!
//! Everything else stays in `raw_lines` untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dotrc::parser;
//!
//! let parsed = parser::parse(&["~/.zshrc", "~/.zprofile"])?;
//! for alias in &parsed.aliases {
//!     println!("{} = {}", alias.name, alias.expansion);
//! }
//! ```
//!
//! ## Failure Semantics
//!
//! - a missing file in the default set is skipped
//! - a sourced file that is missing or unreadable is skipped (logged at `warn`)
//! - an I/O error on an existing top-level file is returned
//! - every file is scanned at most once, so `source` cycles terminate

pub(crate) mod common;
pub mod function;
pub mod line;
pub mod patterns;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Alias, EnvVar, Origin, ParseWarning, ParsedConfig, PathEntry};
use crate::utils::fs::{fingerprint, read_file};
use crate::utils::path::{canonical_key, contract_tilde, expand_tilde, resolve_source_target};
use crate::utils::strings::split_lines_preserve_trailing;

use function::FunctionBuilder;
use line::{classify_line, comment_text, LineKind};

/// Parse a list of files in order, following `source` directives.
///
/// Files that do not exist are skipped.
pub fn parse<S: AsRef<str>>(files: &[S]) -> Result<ParsedConfig> {
    let mut parsed = ParsedConfig::new();
    let mut visited = HashSet::new();

    for file in files {
        let path = expand_tilde(file.as_ref());
        if !path.exists() {
            debug!(file = file.as_ref(), "skipping missing config file");
            continue;
        }
        scan_file(&path, &mut visited, &mut parsed)?;
    }

    Ok(parsed)
}

/// Parse exactly one file (plus whatever it sources). A missing file is an error.
pub fn parse_single_file(path: &str) -> Result<ParsedConfig> {
    let resolved = expand_tilde(path);
    let mut parsed = ParsedConfig::new();
    let mut visited = HashSet::new();
    scan_file(&resolved, &mut visited, &mut parsed)?;
    Ok(parsed)
}

/// Parse in-memory text under the given file key.
///
/// `source` directives are not followed since there is no file to resolve
/// them against.
pub fn parse_str(file: &str, content: &str) -> ParsedConfig {
    let mut parsed = ParsedConfig::new();
    let lines = to_lines(content);
    scan_lines(file, &lines, &mut parsed, |_, _| {});
    record_file(&mut parsed, file, PathBuf::from(file), content, lines);
    parsed
}

fn scan_file(path: &Path, visited: &mut HashSet<PathBuf>, out: &mut ParsedConfig) -> Result<()> {
    if !visited.insert(canonical_key(path)) {
        debug!(file = %path.display(), "already visited, not parsing again");
        return Ok(());
    }

    let content = read_file(path)?;
    let key = contract_tilde(path);
    let lines = to_lines(&content);
    debug!(file = %key, lines = lines.len(), "parsing");

    // Registered before recursing so the file list reflects visit order
    record_file(out, &key, path.to_path_buf(), &content, lines.clone());

    let mut sources = Vec::new();
    scan_lines(&key, &lines, out, |line_number, target| {
        sources.push((line_number, target.to_string()));
    });

    for (line_number, target) in sources {
        let resolved = resolve_source_target(&target, path);
        if !resolved.is_file() {
            debug!(file = %key, line = line_number, target = %target, "source target not found");
            continue;
        }
        debug!(file = %key, line = line_number, target = %resolved.display(), "following source");
        if let Err(e) = scan_file(&resolved, visited, out) {
            match e {
                Error::Io { path, source } => {
                    warn!(file = %path.display(), error = %source, "skipping unreadable sourced file");
                }
                other => return Err(other),
            }
        }
    }

    Ok(())
}

fn to_lines(content: &str) -> Vec<String> {
    split_lines_preserve_trailing(content)
        .into_iter()
        .map(String::from)
        .collect()
}

fn record_file(out: &mut ParsedConfig, key: &str, location: PathBuf, content: &str, lines: Vec<String>) {
    out.fingerprints.insert(key.to_string(), fingerprint(content));
    out.locations.insert(key.to_string(), location);
    out.raw_lines.insert(key.to_string(), lines);
    out.files.push(key.to_string());
}

/// Scan one file's lines, pushing entities into `out`.
///
/// `on_source` receives `(line_number, target)` for each `source` directive.
fn scan_lines<F>(file: &str, lines: &[String], out: &mut ParsedConfig, mut on_source: F)
where
    F: FnMut(usize, &str),
{
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];
        let line_number = idx + 1;

        match classify_line(line) {
            LineKind::Blank | LineKind::Comment | LineKind::Other => {}

            LineKind::Alias(parsed) => {
                let alias = Alias::new(parsed.name, parsed.expansion)
                    .with_enabled(parsed.enabled)
                    .with_origin(Origin::new(file, line_number));
                out.aliases.push(alias);
            }

            LineKind::FunctionStart(name) => {
                let description = idx
                    .checked_sub(1)
                    .and_then(|prev| comment_text(&lines[prev]))
                    .unwrap_or_default();

                let mut builder = FunctionBuilder::new(name, line_number);
                let mut cursor = idx;
                while cursor < lines.len() {
                    builder.add_line(&lines[cursor]);
                    cursor += 1;
                    if builder.is_complete() {
                        break;
                    }
                }

                if !builder.is_complete() {
                    warn!(
                        file,
                        line = line_number,
                        function = %builder.name,
                        "unterminated function, clamped to end of file"
                    );
                    out.add_warning(ParseWarning::new(
                        file,
                        line_number,
                        format!(
                            "function '{}' has no closing brace; body runs to end of file",
                            builder.name
                        ),
                    ));
                }

                out.functions
                    .push(builder.build(file).with_description(description));
                idx = cursor;
                continue;
            }

            LineKind::Path(segments) => {
                for (order, segment) in segments.into_iter().enumerate() {
                    out.path_entries.push(
                        PathEntry::new(segment, order).with_origin(Origin::new(file, line_number)),
                    );
                }
            }

            LineKind::Export(export) => {
                out.env_vars.push(
                    EnvVar::new(export.key, export.value)
                        .with_origin(Origin::new(file, line_number)),
                );
            }

            LineKind::Source(target) => on_source(line_number, &target),
        }

        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_str_collects_all_kinds() {
        let content = "\
# shell setup
alias ll='ls -la'
# alias old='cmd'
export EDITOR=nvim
export PATH=\"/usr/local/bin:/usr/bin:$PATH\"

# Say hello
greet() {
  echo \"hello $1\"
}
source ~/.aliases
";
        let parsed = parse_str("~/.zshrc", content);

        assert_eq!(parsed.aliases.len(), 2);
        assert!(parsed.aliases[0].enabled);
        assert!(!parsed.aliases[1].enabled);
        assert_eq!(parsed.aliases[1].origin.as_ref().unwrap().line, 3);

        assert_eq!(parsed.env_vars.len(), 1);
        assert_eq!(parsed.env_vars[0].key, "EDITOR");

        assert_eq!(parsed.path_entries.len(), 2);
        assert_eq!(parsed.path_entries[0].path, "/usr/local/bin");
        assert_eq!(parsed.path_entries[0].order, 0);
        assert_eq!(parsed.path_entries[1].order, 1);

        assert_eq!(parsed.functions.len(), 1);
        let greet = &parsed.functions[0];
        assert_eq!(greet.description, "Say hello");
        let origin = greet.origin.as_ref().unwrap();
        assert_eq!((origin.line, origin.end_line), (8, 10));

        assert_eq!(parsed.lines_of("~/.zshrc").unwrap().len(), 11);
    }

    #[test]
    fn test_parse_str_brace_depth() {
        let content = "f() {\n  if [ 1 ]; then\n    echo hi\n  fi\n}\n";
        let parsed = parse_str("rc", content);
        let f = &parsed.functions[0];
        let origin = f.origin.as_ref().unwrap();
        assert_eq!((origin.line, origin.end_line), (1, 5));
        assert_eq!(f.body, "if [ 1 ]; then\n  echo hi\nfi");
        assert!(f.description.is_empty());
    }

    #[test]
    fn test_parse_str_single_line_function() {
        let parsed = parse_str("rc", "quick() { echo done; }\n");
        let f = &parsed.functions[0];
        assert_eq!(f.name, "quick");
        let origin = f.origin.as_ref().unwrap();
        assert_eq!((origin.line, origin.end_line), (1, 1));
        assert_eq!(f.body, "echo done;");
    }

    #[test]
    fn test_parse_str_function_body_not_scanned_for_entities() {
        let content = "setup() {\n  alias inner='x'\n  export INNER=1\n}\nalias outer='y'\n";
        let parsed = parse_str("rc", content);
        assert_eq!(parsed.functions.len(), 1);
        assert_eq!(parsed.aliases.len(), 1);
        assert_eq!(parsed.aliases[0].name, "outer");
        assert!(parsed.env_vars.is_empty());
    }

    #[test]
    fn test_parse_str_unterminated_function_warns() {
        let content = "alias a='b'\nbroken() {\n  echo one\n  echo two\n";
        let parsed = parse_str("rc", content);
        let f = &parsed.functions[0];
        let origin = f.origin.as_ref().unwrap();
        assert_eq!((origin.line, origin.end_line), (2, 4));
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].line_number, 2);
        assert!(parsed.warnings[0].message.contains("broken"));
    }

    #[test]
    fn test_parse_str_shebang_is_not_description() {
        let parsed = parse_str("rc", "#!/bin/zsh\nf() { :; }\n");
        assert!(parsed.functions[0].description.is_empty());
    }

    #[test]
    fn test_parse_str_keychain_env() {
        let content =
            "export API_KEY=$(security find-generic-password -s 'env/API_KEY' -a \"$USER\" -w)\n";
        let parsed = parse_str("rc", content);
        let var = &parsed.env_vars[0];
        assert!(var.keychain);
        assert_eq!(var.keychain_service().as_deref(), Some("env/API_KEY"));
    }

    #[test]
    fn test_parse_missing_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let parsed = parse(&[missing.to_string_lossy()]).unwrap();
        assert_eq!(parsed.entity_count(), 0);
        assert!(parsed.files.is_empty());
    }

    #[test]
    fn test_parse_single_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = parse_single_file(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_parse_follows_relative_source() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("rc");
        fs::write(&main, "alias a='1'\nsource extra.sh\n").unwrap();
        fs::write(dir.path().join("extra.sh"), "alias b='2'\n").unwrap();

        let parsed = parse_single_file(&main.to_string_lossy()).unwrap();
        let names: Vec<_> = parsed.aliases.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(parsed.files.len(), 2);
        assert!(parsed.aliases[1]
            .origin
            .as_ref()
            .unwrap()
            .file
            .ends_with("extra.sh"));
    }

    #[test]
    fn test_parse_source_cycle_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.sh");
        let b = dir.path().join("b.sh");
        fs::write(&a, format!("alias a='1'\nsource {}\n", b.display())).unwrap();
        fs::write(&b, format!("alias b='2'\nsource {}\n", a.display())).unwrap();

        let parsed = parse(&[a.to_string_lossy(), b.to_string_lossy()]).unwrap();
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.aliases.len(), 2);
    }

    #[test]
    fn test_parse_records_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("rc");
        fs::write(&main, "export A=1\n").unwrap();

        let parsed = parse(&[main.to_string_lossy()]).unwrap();
        let key = &parsed.files[0];
        assert_eq!(parsed.fingerprints[key], fingerprint("export A=1\n"));
        assert_eq!(parsed.location_of(key), main);
    }
}
