//! Line generators
//!
//! Each generator is the inverse of a recogniser in [`crate::parser::line`]:
//! feeding its output back through the parser yields the same values.

use crate::parser::common::is_single_word;
use crate::utils::strings::{escape_double_quoted, unquote};

/// `alias NAME='EXPANSION'`, prefixed with `# ` when disabled.
///
/// Single quotes unless the expansion itself contains one; then double
/// quotes with embedded `\` and `"` escaped.
pub fn alias_line(name: &str, expansion: &str, enabled: bool) -> String {
    let line = if expansion.contains('\'') {
        format!("alias {}=\"{}\"", name, escape_double_quoted(expansion))
    } else {
        format!("alias {}='{}'", name, expansion)
    };

    if enabled {
        line
    } else {
        format!("# {}", line)
    }
}

/// `name() { ... }` with the body re-indented by two spaces.
pub fn function_block(name: &str, body: &str) -> String {
    let mut out = format!("{}() {{\n", name);
    for line in body.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push('}');
    out
}

/// A function block preceded by its `# description` line, if any.
pub fn described_function_block(name: &str, body: &str, description: &str) -> String {
    let block = function_block(name, body);
    if description.trim().is_empty() {
        block
    } else {
        format!("{}\n{}", description_line(description), block)
    }
}

/// `# description`
pub fn description_line(description: &str) -> String {
    format!("# {}", description.trim())
}

/// `export KEY="VALUE"`.
///
/// A command substitution that forms one shell word is left unquoted. Values
/// holding only double quotes use single quotes. Everything else is double
/// quoted with `\` and `"` escaped.
pub fn export_line(key: &str, value: &str) -> String {
    let substitution = value.contains("$(") || value.contains('`');
    if substitution && is_single_word(value) && unquote(value) == value {
        format!("export {}={}", key, value)
    } else if value.contains('"') && !value.contains('\'') {
        format!("export {}='{}'", key, value)
    } else {
        format!("export {}=\"{}\"", key, escape_double_quoted(value))
    }
}

/// Command substitution reading a generic password from the login keychain.
pub fn keychain_lookup(service: &str) -> String {
    format!(
        "$(security find-generic-password -s '{}' -a \"$USER\" -w)",
        service
    )
}

/// `export KEY=$(security find-generic-password -s 'SERVICE' -a "$USER" -w)`
pub fn keychain_export_line(key: &str, service: &str) -> String {
    format!("export {}={}", key, keychain_lookup(service))
}

/// `export PATH="dir1:dir2:$PATH"`
pub fn path_line<S: AsRef<str>>(dirs: &[S]) -> String {
    let mut segments: Vec<&str> = dirs.iter().map(|d| d.as_ref()).collect();
    segments.push("$PATH");
    format!("export PATH=\"{}\"", segments.join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::function::FunctionBuilder;
    use crate::parser::line::{parse_alias, parse_export, parse_path, QuoteStyle};

    #[test]
    fn test_alias_line_single_quotes() {
        assert_eq!(alias_line("ll", "ls -la", true), "alias ll='ls -la'");
        assert_eq!(alias_line("ll", "ls -la", false), "# alias ll='ls -la'");
    }

    #[test]
    fn test_alias_line_double_quotes_when_single_quote_present() {
        let line = alias_line("say", "echo it's", true);
        assert_eq!(line, "alias say=\"echo it's\"");
        assert_eq!(parse_alias(&line).unwrap().quote, QuoteStyle::Double);
    }

    #[test]
    fn test_alias_line_round_trip() {
        let cases = [
            ("ll", "ls -la", true),
            ("old", "cmd", false),
            ("say", "echo \"it's\" done", true),
            ("x", "it's\\", true),
            ("x", "it's a \\\"q\\\"", true),
            ("..", "cd ..", true),
            ("empty", "", true),
        ];
        for (name, expansion, enabled) in cases {
            let parsed = parse_alias(&alias_line(name, expansion, enabled)).unwrap();
            assert_eq!(parsed.name, name);
            assert_eq!(parsed.expansion, expansion);
            assert_eq!(parsed.enabled, enabled);
        }
    }

    #[test]
    fn test_function_block() {
        let block = function_block("greet", "if [ -n \"$1\" ]; then\n  echo hi\nfi");
        assert_eq!(
            block,
            "greet() {\n  if [ -n \"$1\" ]; then\n    echo hi\n  fi\n}"
        );
    }

    #[test]
    fn test_function_block_round_trip() {
        let body = "local x=1\n\necho $x";
        let block = function_block("f", body);

        let mut builder = FunctionBuilder::new("f".into(), 1);
        for line in block.split('\n') {
            builder.add_line(line);
        }
        assert!(builder.is_complete());
        assert_eq!(builder.build("rc").body, body);
    }

    #[test]
    fn test_described_function_block() {
        assert_eq!(
            described_function_block("f", "true", "Does nothing"),
            "# Does nothing\nf() {\n  true\n}"
        );
        assert_eq!(described_function_block("f", "true", ""), "f() {\n  true\n}");
    }

    #[test]
    fn test_export_line_quoting() {
        assert_eq!(export_line("EDITOR", "nvim"), "export EDITOR=\"nvim\"");
        assert_eq!(
            export_line("PREFIX", "$(brew --prefix)"),
            "export PREFIX=$(brew --prefix)"
        );
        assert_eq!(export_line("Q", "say \"hi\""), "export Q='say \"hi\"'");
        assert_eq!(export_line("NOW", "`date +%s`"), "export NOW=`date +%s`");
        assert_eq!(
            export_line("X", "$(brew --prefix) extra"),
            "export X=\"$(brew --prefix) extra\""
        );
        assert_eq!(
            export_line("Q", "say \"hi\" it's"),
            r#"export Q="say \"hi\" it's""#
        );
    }

    #[test]
    fn test_export_line_round_trip() {
        for value in [
            "nvim",
            "hello world",
            "$(brew --prefix)",
            "$HOME/go",
            "`date +%s`",
            "$(brew --prefix) extra",
            "say \"hi\" it's",
            "it's\\",
            "C:\\tmp",
        ] {
            let parsed = parse_export(&export_line("KEY", value)).unwrap();
            assert_eq!(parsed.key, "KEY");
            assert_eq!(parsed.value, value);
        }
    }

    #[test]
    fn test_keychain_export_line() {
        let line = keychain_export_line("API_KEY", "env/API_KEY");
        assert_eq!(
            line,
            "export API_KEY=$(security find-generic-password -s 'env/API_KEY' -a \"$USER\" -w)"
        );
        let parsed = parse_export(&line).unwrap();
        assert!(crate::parser::line::is_keychain_derived(&parsed.value));
        assert_eq!(
            crate::parser::line::keychain_service(&parsed.value).as_deref(),
            Some("env/API_KEY")
        );
    }

    #[test]
    fn test_path_line_round_trip() {
        let line = path_line(&["/usr/local/bin", "/usr/bin"]);
        assert_eq!(line, "export PATH=\"/usr/local/bin:/usr/bin:$PATH\"");
        assert_eq!(
            parse_path(&line).unwrap(),
            vec!["/usr/local/bin".to_string(), "/usr/bin".to_string()]
        );
    }

    #[test]
    fn test_path_line_single_dir_uses_prepend_form() {
        let line = path_line(&["/opt/homebrew/bin"]);
        assert_eq!(parse_path(&line).unwrap(), vec!["/opt/homebrew/bin".to_string()]);
    }
}
