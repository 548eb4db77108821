//! # Shell Regex Patterns
//!
//! All regex patterns used to recognise rc-file line shapes.
//!
//! ## Pattern Naming Convention
//!
//! - `*_SINGLE_RE` - Single-quoted version
//! - `*_DOUBLE_RE` - Double-quoted version
//! - `*_NOQUOTE_RE` - Unquoted version
//! - `*_START_RE` - Start of multi-line construct
//!
//! ## Regex Notes
//!
//! Rust's `regex` crate does not support backreferences, so we use
//! separate patterns for single-quoted and double-quoted variants.
//! Every pattern runs against a trimmed line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // Alias Patterns
    // =========================================================================

    /// Matches single-quoted alias: `alias name='value'`, optionally `#`-disabled
    ///
    /// Captures:
    /// - Group 1: leading `#` marker (present when the alias is commented out)
    /// - Group 2: alias name (allows special chars like `.`, `~`, `-`)
    /// - Group 3: alias value (content between single quotes)
    pub static ref ALIAS_SINGLE_RE: Regex = Regex::new(
        r#"^(#+\s*)?alias\s+([^\s=#'"]+)='([^']*)'\s*(?:#.*)?$"#
    ).unwrap();

    /// Matches double-quoted alias: `alias name="value"`
    ///
    /// `\"` inside the value is allowed and unescaped by the caller.
    ///
    /// Captures: same layout as [`ALIAS_SINGLE_RE`]
    pub static ref ALIAS_DOUBLE_RE: Regex = Regex::new(
        r#"^(#+\s*)?alias\s+([^\s=#'"]+)="((?:[^"\\]|\\.)*)"\s*(?:#.*)?$"#
    ).unwrap();

    /// Matches unquoted alias: `alias name=value`
    ///
    /// Captures: same layout as [`ALIAS_SINGLE_RE`], value is a single word
    pub static ref ALIAS_NOQUOTE_RE: Regex = Regex::new(
        r##"^(#+\s*)?alias\s+([^\s=#'"]+)=([^\s'"#][^\s'"]*)\s*(?:#.*)?$"##
    ).unwrap();

    // =========================================================================
    // Function Patterns
    // =========================================================================

    /// Matches function with parentheses: `name() {` or `function name() {`
    ///
    /// Captures:
    /// - Group 1: function name
    pub static ref FUNC_START_RE: Regex = Regex::new(
        r#"^(?:function\s+)?([A-Za-z_][\w:.\-]*)\s*\(\s*\)\s*\{"#
    ).unwrap();

    /// Matches function with `function` keyword (no parentheses): `function name {`
    ///
    /// Captures:
    /// - Group 1: function name
    pub static ref FUNC_KEYWORD_RE: Regex = Regex::new(
        r#"^function\s+([A-Za-z_][\w:.\-]*)\s*\{"#
    ).unwrap();

    // =========================================================================
    // PATH Patterns
    // =========================================================================

    /// Matches the prepend idiom: `export PATH="segment:$PATH"`
    ///
    /// Captures:
    /// - Group 1: the single new segment (may still carry quotes)
    pub static ref PATH_PREPEND_RE: Regex = Regex::new(
        r#"^(?:export\s+)?PATH=["']?([^:"']+)["']?:["']?\$\{?PATH\}?["']?\s*(?:#.*)?$"#
    ).unwrap();

    /// Matches any PATH assignment: `export PATH=...` or `PATH=...`
    ///
    /// Captures:
    /// - Group 1: right-hand side, to be split on `:`
    pub static ref PATH_ASSIGN_RE: Regex = Regex::new(
        r#"^(?:export\s+)?PATH=(.*)$"#
    ).unwrap();

    // =========================================================================
    // Export (Environment Variable) Patterns
    // =========================================================================

    /// Matches `export VAR=value` or a bare `VAR=value`
    ///
    /// Captures:
    /// - Group 1: variable name
    /// - Group 2: value (everything after `=`)
    pub static ref EXPORT_RE: Regex = Regex::new(
        r#"^(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)=(.*)$"#
    ).unwrap();

    // =========================================================================
    // Source Patterns
    // =========================================================================

    /// Matches source statement: `source file` or `. file`
    ///
    /// Captures:
    /// - Group 1: file path (everything after source/.)
    pub static ref SOURCE_RE: Regex = Regex::new(
        r#"^(?:source|\.)\s+(.+)$"#
    ).unwrap();

    // =========================================================================
    // Name Patterns
    // =========================================================================

    /// A name the alias recognisers accept
    pub static ref ALIAS_NAME_RE: Regex = Regex::new(
        r#"^[^\s=#'"]+$"#
    ).unwrap();

    /// A name the function recognisers accept
    pub static ref FUNC_NAME_RE: Regex = Regex::new(
        r#"^[A-Za-z_][\w:.\-]*$"#
    ).unwrap();

    /// A key the export recogniser accepts
    pub static ref ENV_KEY_RE: Regex = Regex::new(
        r#"^[A-Za-z_][A-Za-z0-9_]*$"#
    ).unwrap();

    // =========================================================================
    // Keychain Patterns
    // =========================================================================

    /// Matches a keychain lookup inside a command substitution:
    /// `$(security find-generic-password ...)` or the backtick form
    pub static ref KEYCHAIN_RE: Regex = Regex::new(
        r#"(?:\$\(|`)\s*(?:/usr/bin/)?security\s+find-(?:generic|internet)-password\b"#
    ).unwrap();

    /// Extracts the `-s SERVICE` argument of a keychain lookup
    ///
    /// Captures:
    /// - Group 1/2/3: single-quoted, double-quoted or bare service name
    pub static ref KEYCHAIN_SERVICE_RE: Regex = Regex::new(
        r#"\s-s\s+(?:'([^']*)'|"([^"]*)"|([^\s)`]+))"#
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_single_re() {
        let caps = ALIAS_SINGLE_RE.captures("alias ll='ls -la'").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(&caps[2], "ll");
        assert_eq!(&caps[3], "ls -la");
    }

    #[test]
    fn test_alias_single_re_disabled() {
        let caps = ALIAS_SINGLE_RE.captures("# alias old='cmd'").unwrap();
        assert!(caps.get(1).is_some());
        assert_eq!(&caps[2], "old");
    }

    #[test]
    fn test_alias_double_re() {
        let caps = ALIAS_DOUBLE_RE
            .captures(r#"alias gs="git status""#)
            .unwrap();
        assert_eq!(&caps[2], "gs");
        assert_eq!(&caps[3], "git status");
    }

    #[test]
    fn test_alias_special_names() {
        assert!(ALIAS_SINGLE_RE.captures("alias ..='cd ..'").is_some());
        assert!(ALIAS_SINGLE_RE.captures("alias ~='cd ~'").is_some());
        assert!(ALIAS_SINGLE_RE.captures("alias ...='cd ../..'").is_some());
    }

    #[test]
    fn test_alias_trailing_prose_rejected() {
        assert!(ALIAS_SINGLE_RE
            .captures("# alias foo='bar' is handy")
            .is_none());
    }

    #[test]
    fn test_alias_noquote_re() {
        let caps = ALIAS_NOQUOTE_RE.captures("alias v=nvim").unwrap();
        assert_eq!(&caps[3], "nvim");
        assert!(ALIAS_NOQUOTE_RE.captures("alias x='unterminated").is_none());
    }

    #[test]
    fn test_func_start_re() {
        let caps = FUNC_START_RE.captures("greet() {").unwrap();
        assert_eq!(&caps[1], "greet");

        let caps = FUNC_START_RE.captures("function hello() {").unwrap();
        assert_eq!(&caps[1], "hello");

        assert!(FUNC_START_RE.captures("greet()").is_none());
    }

    #[test]
    fn test_func_keyword_re() {
        let caps = FUNC_KEYWORD_RE.captures("function test {").unwrap();
        assert_eq!(&caps[1], "test");
    }

    #[test]
    fn test_path_prepend_re() {
        let caps = PATH_PREPEND_RE
            .captures(r#"export PATH="/opt/homebrew/bin:$PATH""#)
            .unwrap();
        assert_eq!(&caps[1], "/opt/homebrew/bin");

        let caps = PATH_PREPEND_RE.captures("PATH=$HOME/bin:${PATH}").unwrap();
        assert_eq!(&caps[1], "$HOME/bin");

        assert!(PATH_PREPEND_RE
            .captures(r#"export PATH="/a:/b:$PATH""#)
            .is_none());
    }

    #[test]
    fn test_path_assign_re() {
        let caps = PATH_ASSIGN_RE
            .captures(r#"export PATH="/a:/b:$PATH""#)
            .unwrap();
        assert_eq!(&caps[1], r#""/a:/b:$PATH""#);
        assert!(PATH_ASSIGN_RE.captures("MANPATH=/x").is_none());
    }

    #[test]
    fn test_export_re() {
        let caps = EXPORT_RE.captures("export EDITOR=nvim").unwrap();
        assert_eq!(&caps[1], "EDITOR");
        assert_eq!(&caps[2], "nvim");

        let caps = EXPORT_RE.captures("HISTSIZE=10000").unwrap();
        assert_eq!(&caps[1], "HISTSIZE");
    }

    #[test]
    fn test_source_re() {
        let caps = SOURCE_RE.captures("source ~/.aliases").unwrap();
        assert_eq!(&caps[1], "~/.aliases");

        let caps = SOURCE_RE.captures(". ~/.profile").unwrap();
        assert_eq!(&caps[1], "~/.profile");
    }

    #[test]
    fn test_keychain_re() {
        assert!(KEYCHAIN_RE.is_match(
            r#"$(security find-generic-password -s 'env/API_KEY' -a "$USER" -w)"#
        ));
        assert!(KEYCHAIN_RE.is_match("`security find-internet-password -s github.com -w`"));
        assert!(!KEYCHAIN_RE.is_match("security find-generic-password"));
    }

    #[test]
    fn test_keychain_service_re() {
        let caps = KEYCHAIN_SERVICE_RE
            .captures(r#"$(security find-generic-password -s 'env/API_KEY' -w)"#)
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "env/API_KEY");
    }

    #[test]
    fn test_name_patterns() {
        assert!(ALIAS_NAME_RE.is_match(".."));
        assert!(!ALIAS_NAME_RE.is_match("a b"));
        assert!(!ALIAS_NAME_RE.is_match("a=b"));
        assert!(FUNC_NAME_RE.is_match("git:clean-up"));
        assert!(!FUNC_NAME_RE.is_match("9lives"));
        assert!(ENV_KEY_RE.is_match("_SECRET_2"));
        assert!(!ENV_KEY_RE.is_match("MY-KEY"));
    }
}
