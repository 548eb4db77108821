//! Common parsing utilities

/// Split off a trailing shell comment.
///
/// A `#` only starts a comment outside quotes and backticks and at the start
/// of a word, so `${#arr}`, `a#b` and `\#` are left alone.
pub fn extract_comment(line: &str, comment_char: char) -> (String, Option<String>) {
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut in_backtick = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            prev = Some(c);
            continue;
        }
        match c {
            '\\' if !in_single_quote => escaped = true,
            '\'' if !in_double_quote && !in_backtick => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '`' if !in_single_quote => in_backtick = !in_backtick,
            c if c == comment_char
                && !in_single_quote
                && !in_double_quote
                && !in_backtick
                && prev.map_or(true, char::is_whitespace) =>
            {
                let code = &line[..i];
                let comment = &line[i + c.len_utf8()..];
                return (
                    code.trim_end().to_string(),
                    Some(comment.trim().to_string()),
                );
            }
            _ => {}
        }
        prev = Some(c);
    }

    (line.to_string(), None)
}

/// Count braces outside of quoted strings and comments
/// Returns (open_brace_count, close_brace_count)
pub fn count_braces_outside_quotes(line: &str) -> (usize, usize) {
    let (code, _) = extract_comment(line, '#');
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut prev: Option<char> = None;
    let mut open_count = 0;
    let mut close_count = 0;

    for c in code.chars() {
        match c {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote && prev != Some('\\') => in_double_quote = !in_double_quote,
            '{' if !in_single_quote && !in_double_quote => open_count += 1,
            '}' if !in_single_quote && !in_double_quote => close_count += 1,
            _ => {}
        }
        prev = Some(c);
    }

    (open_count, close_count)
}

/// True when `value` is one shell word: fully quoted, a single `$(...)` or
/// backtick substitution, or free of unquoted whitespace.
///
/// `LANG=C sort file` is a command with an environment prefix, not an assignment.
pub fn is_single_word(value: &str) -> bool {
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut in_backtick = false;
    let mut escaped = false;
    let mut paren_depth = 0usize;
    let mut prev: Option<char> = None;

    for c in value.chars() {
        if escaped {
            escaped = false;
            prev = None;
            continue;
        }
        match c {
            '\\' if !in_single_quote => escaped = true,
            '\'' if !in_double_quote && !in_backtick => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '`' if !in_single_quote => in_backtick = !in_backtick,
            '(' if !in_single_quote && prev == Some('$') => paren_depth += 1,
            ')' if !in_single_quote && paren_depth > 0 => paren_depth -= 1,
            c if c.is_whitespace()
                && !in_single_quote
                && !in_double_quote
                && !in_backtick
                && paren_depth == 0 =>
            {
                return false
            }
            _ => {}
        }
        prev = Some(c);
    }

    true
}
