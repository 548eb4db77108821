//! # Line Parser
//!
//! Stateless recognisers for the line shapes the config parser cares about.
//! Each takes one line of text and returns a structured result or `None`;
//! nothing here knows about files or neighbouring lines.
//!
//! [`classify_line`] applies them in the fixed priority order used by the
//! config scan: alias, function start, PATH, export, source.

use super::common::{extract_comment, is_single_word};
use super::patterns::*;
use crate::utils::strings::{strip_stray_quotes, unescape_double_quoted, unquote};

/// How an alias value was quoted in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
    Bare,
}

/// A recognised `alias NAME=VALUE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasLine {
    pub name: String,
    pub expansion: String,
    pub enabled: bool,
    pub quote: QuoteStyle,
}

/// A recognised `export KEY=VALUE` / `KEY=VALUE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub key: String,
    pub value: String,
}

/// What a single line is, by recogniser priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Alias(AliasLine),
    FunctionStart(String),
    Path(Vec<String>),
    Export(ExportLine),
    Source(String),
    Comment,
    Other,
}

/// Classify one line.
///
/// Disabled aliases are `#` comments too, so the alias recogniser runs
/// before a line is written off as a comment.
pub fn classify_line(line: &str) -> LineKind {
    if is_blank(line) {
        return LineKind::Blank;
    }
    if let Some(alias) = parse_alias(line) {
        return LineKind::Alias(alias);
    }
    if is_comment(line) {
        return LineKind::Comment;
    }
    if let Some(name) = parse_function_start(line) {
        return LineKind::FunctionStart(name);
    }
    if let Some(segments) = parse_path(line) {
        return LineKind::Path(segments);
    }
    if let Some(export) = parse_export(line) {
        return LineKind::Export(export);
    }
    if let Some(target) = parse_source(line) {
        return LineKind::Source(target);
    }
    LineKind::Other
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Text of a plain `#` comment line, `None` for anything else.
///
/// Shebangs and commented-out aliases are not descriptions.
pub fn comment_text(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') || trimmed.starts_with("#!") || parse_alias(trimmed).is_some() {
        return None;
    }
    Some(trimmed.trim_start_matches('#').trim().to_string())
}

/// Parse `alias NAME=VALUE`, optionally commented out (`enabled = false`).
pub fn parse_alias(line: &str) -> Option<AliasLine> {
    let trimmed = line.trim();

    let (caps, quote) = if let Some(caps) = ALIAS_SINGLE_RE.captures(trimmed) {
        (caps, QuoteStyle::Single)
    } else if let Some(caps) = ALIAS_DOUBLE_RE.captures(trimmed) {
        (caps, QuoteStyle::Double)
    } else if let Some(caps) = ALIAS_NOQUOTE_RE.captures(trimmed) {
        (caps, QuoteStyle::Bare)
    } else {
        return None;
    };

    let expansion = match quote {
        QuoteStyle::Double => unescape_double_quoted(&caps[3]),
        _ => caps[3].to_string(),
    };

    Some(AliasLine {
        name: caps[2].to_string(),
        expansion,
        enabled: caps.get(1).is_none(),
        quote,
    })
}

/// Detect `name() {`, `function name() {` or `function name {`.
pub fn parse_function_start(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if let Some(caps) = FUNC_START_RE.captures(trimmed) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = FUNC_KEYWORD_RE.captures(trimmed) {
        return Some(caps[1].to_string());
    }
    None
}

/// Parse the prepend idiom `PATH="segment:$PATH"`, returning the new segment.
pub fn parse_path_prepend(line: &str) -> Option<String> {
    let caps = PATH_PREPEND_RE.captures(line.trim())?;
    let segment = strip_stray_quotes(&unquote(&caps[1]));
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// Parse a full `PATH=` assignment into its directories.
///
/// `$PATH`/`${PATH}` markers and empty segments are dropped. The result may
/// be empty (e.g. `PATH=$PATH`), which still counts as a PATH line.
pub fn parse_path_assignment(line: &str) -> Option<Vec<String>> {
    let caps = PATH_ASSIGN_RE.captures(line.trim())?;
    let (value, _comment) = extract_comment(&caps[1], '#');
    Some(split_path_value(&value))
}

/// Parse either PATH form; the prepend idiom wins.
pub fn parse_path(line: &str) -> Option<Vec<String>> {
    if let Some(segment) = parse_path_prepend(line) {
        return Some(vec![segment]);
    }
    parse_path_assignment(line)
}

/// Split a PATH value on `:` into directories.
pub fn split_path_value(value: &str) -> Vec<String> {
    value
        .split(':')
        .map(|segment| strip_stray_quotes(&unquote(segment)))
        .filter(|segment| !segment.is_empty() && !is_path_marker(segment))
        .collect()
}

fn is_path_marker(segment: &str) -> bool {
    segment == "$PATH" || segment == "${PATH}"
}

/// Parse `export KEY=VALUE` or `KEY=VALUE`. Never returns `PATH`.
pub fn parse_export(line: &str) -> Option<ExportLine> {
    let caps = EXPORT_RE.captures(line.trim())?;
    let key = caps[1].to_string();
    if key == "PATH" {
        return None;
    }

    let (raw_value, _comment) = extract_comment(&caps[2], '#');
    if !is_single_word(&raw_value) {
        return None;
    }

    let raw_value = raw_value.trim();
    let double_quoted =
        raw_value.len() >= 2 && raw_value.starts_with('"') && raw_value.ends_with('"');
    let value = if double_quoted {
        unescape_double_quoted(&raw_value[1..raw_value.len() - 1])
    } else {
        unquote(raw_value)
    };

    Some(ExportLine { key, value })
}

/// Parse `source FILE` or `. FILE`, returning the unquoted target.
pub fn parse_source(line: &str) -> Option<String> {
    let caps = SOURCE_RE.captures(line.trim())?;
    let (target, _comment) = extract_comment(&caps[1], '#');
    let target = unquote(&target);
    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}

/// True when the value reads a secret from the macOS keychain via command substitution.
pub fn is_keychain_derived(value: &str) -> bool {
    KEYCHAIN_RE.is_match(value)
}

/// The `-s` service name of a keychain lookup value.
pub fn keychain_service(value: &str) -> Option<String> {
    if !is_keychain_derived(value) {
        return None;
    }
    let caps = KEYCHAIN_SERVICE_RE.captures(value)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}
