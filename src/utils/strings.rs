//! String utility functions

/// Split a string into lines, preserving trailing empty lines (unlike `.lines()`).
///
/// Rust's `str::lines()` strips trailing newlines:
/// - `"a\n".lines()` → `["a"]` (loses the trailing newline)
/// - `"a\n\n".lines()` → `["a", ""]` (only 1 empty line, but original has 2 newlines)
///
/// This function preserves trailing empty lines:
/// - `"a\nb"` → `["a", "b"]`
/// - `"a\n"` → `["a"]` (single trailing newline is treated as line terminator)
/// - `"a\n\n"` → `["a", ""]` (preserves trailing empty line)
/// - `"a\n\n\n"` → `["a", "", ""]` (preserves all trailing empty lines)
///
/// # Examples
///
/// ```
/// use dotrc::utils::strings::split_lines_preserve_trailing;
///
/// assert_eq!(split_lines_preserve_trailing("a\nb"), vec!["a", "b"]);
/// assert_eq!(split_lines_preserve_trailing("a\n"), vec!["a"]);
/// assert_eq!(split_lines_preserve_trailing("a\n\n"), vec!["a", ""]);
/// assert_eq!(split_lines_preserve_trailing("a\n\n\n"), vec!["a", "", ""]);
/// assert_eq!(split_lines_preserve_trailing(""), Vec::<&str>::new());
/// ```
pub fn split_lines_preserve_trailing(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<&str> = s.split('\n').collect();

    // split('\n') produces an empty string after the final '\n'
    // This empty string represents the line terminator, not an actual empty line.
    // Pop it if present. The remaining empty strings represent actual empty lines.
    if s.ends_with('\n') && result.last() == Some(&"") {
        result.pop();
    }

    result
}

/// Inverse of [`split_lines_preserve_trailing`]: every line gets a `\n` terminator.
pub fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Strip one matching pair of surrounding quotes (single or double).
///
/// Input is trimmed first; a value without a matching pair is returned trimmed.
pub fn unquote(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('\'') && trimmed.ends_with('\''))
            || (trimmed.starts_with('"') && trimmed.ends_with('"')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Escape `\` and `"` for use inside a double-quoted shell word.
///
/// `$` and backticks stay as written so expansions still run.
pub fn escape_double_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Inverse of [`escape_double_quoted`]. Other backslash sequences are kept.
pub fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '"')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Remove quote characters left over at either end of a segment.
///
/// `export PATH="/a:/b":$PATH` splits into `"/a` and `/b"`, neither of which
/// has a matching pair for [`unquote`].
pub fn strip_stray_quotes(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

/// Number of leading whitespace bytes.
pub fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Remove the common leading indentation of all non-blank lines.
///
/// Blank lines come out empty.
pub fn dedent(lines: &[String]) -> Vec<String> {
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.get(common..).unwrap_or_else(|| l.trim_start()).to_string()
            }
        })
        .collect()
}
