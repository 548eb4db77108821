//! # FunctionBuilder
//!
//! Accumulates lines for shell functions by brace counting.
//!
//! ## Example Input
//!
//! ```bash
//! my_func() {
//!     echo "hello"
//!     echo "world"
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut builder = FunctionBuilder::new("my_func".into(), 1);
//! builder.add_line("my_func() {");
//! builder.add_line("    echo \"hello\"");
//! builder.add_line("}");
//! assert!(builder.is_complete());
//! let func = builder.build("~/.zshrc");
//! // func.origin = ~/.zshrc:1-3, func.body = "echo \"hello\""
//! ```
//!
//! ## Body Extraction
//!
//! - one-liners: the text between the first `{` and the last `}`
//! - multi-line: the interior lines, dedented by their common indent; code
//!   sharing the opening or closing line with a brace is kept as a body line
//! - unterminated: every line after the opening one

use crate::model::{Origin, ShellFunction};
use crate::parser::common::{count_braces_outside_quotes, extract_comment};
use crate::utils::strings::dedent;

/// Builder for accumulating function definitions.
///
/// # Fields
///
/// - `name`: Function name extracted from the definition
/// - `start_line`: Line number where the function starts (1-based)
/// - `lines`: Accumulated raw lines including the opening and closing lines
#[derive(Debug)]
pub struct FunctionBuilder {
    pub name: String,
    pub start_line: usize,
    pub lines: Vec<String>,
    depth: usize,
    opened: bool,
}

impl FunctionBuilder {
    /// Create a new builder for a function starting at the given line.
    pub fn new(name: String, start_line: usize) -> Self {
        Self {
            name,
            start_line,
            lines: Vec::new(),
            depth: 0,
            opened: false,
        }
    }

    /// Add the next line and update the brace depth.
    pub fn add_line(&mut self, line: &str) {
        let (open, close) = count_braces_outside_quotes(line);
        if open > 0 {
            self.opened = true;
        }
        self.depth += open;
        self.depth = self.depth.saturating_sub(close);
        self.lines.push(line.to_string());
    }

    /// The closing brace has been seen.
    pub fn is_complete(&self) -> bool {
        self.opened && self.depth == 0
    }

    /// Last line number consumed so far (1-based).
    pub fn end_line(&self) -> usize {
        self.start_line + self.lines.len().saturating_sub(1)
    }

    /// Build the function. An incomplete builder is clamped to its last line.
    pub fn build(self, file: &str) -> ShellFunction {
        let origin = Origin::new(file, self.start_line).with_end_line(self.end_line());
        let body = self.extract_body();
        ShellFunction::new(self.name, body).with_origin(origin)
    }

    fn extract_body(&self) -> String {
        let Some(first) = self.lines.first() else {
            return String::new();
        };

        if self.lines.len() == 1 {
            let (code, _comment) = extract_comment(first, '#');
            return match (code.find('{'), code.rfind('}')) {
                (Some(start), Some(end)) if end > start => code[start + 1..end].trim().to_string(),
                (Some(start), None) => code[start + 1..].trim().to_string(),
                _ => String::new(),
            };
        }

        let opening_rest = first
            .find('{')
            .map(|start| first[start + 1..].trim().to_string())
            .filter(|rest| !rest.is_empty());

        let (interior, closing) = if self.is_complete() {
            (&self.lines[1..self.lines.len() - 1], self.lines.last())
        } else {
            (&self.lines[1..], None)
        };
        let mut body: Vec<String> = interior.to_vec();

        if let Some(last) = closing {
            let (code, _comment) = extract_comment(last, '#');
            if let Some(end) = code.rfind('}') {
                let before = &code[..end];
                if !before.trim().is_empty() {
                    body.push(before.trim_end().to_string());
                }
            }
        }

        // Leading/trailing blank lines carry no meaning
        while body.first().is_some_and(|l| l.trim().is_empty()) {
            body.remove(0);
        }
        while body.last().is_some_and(|l| l.trim().is_empty()) {
            body.pop();
        }

        let mut body = dedent(&body);
        if let Some(rest) = opening_rest {
            body.insert(0, rest);
        }
        body.join("\n")
    }
}
