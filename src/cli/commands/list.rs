//! List command implementation with table output

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::EntryTypeArg;
use crate::cli::Context;
use crate::model::Origin;
use crate::session::Session;

/// One printable table row
struct Row {
    kind: EntryTypeArg,
    name: String,
    location: String,
    value: String,
    enabled: bool,
}

/// Get terminal width, defaulting to 80 if unable to detect
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Calculate column widths (type, name, location, value) for a terminal width
fn calculate_column_widths(term_width: usize) -> (usize, usize, usize, usize) {
    // "│ " prefix (2) + " │" suffix (2) + spaces between columns (3)
    let fixed_overhead = 7;
    let type_width = 9;
    let location_width = 18;

    let available = term_width.saturating_sub(fixed_overhead + type_width + location_width);

    let name_width = (available * 30 / 100).clamp(10, 28);
    let value_width = available.saturating_sub(name_width + 1).max(10);

    (type_width, name_width, location_width, value_width)
}

/// Truncate a string to fit within max_width, adding "..." if truncated
fn truncate_value(s: &str, max_width: usize) -> String {
    let s = s.replace('\n', "\\n");

    if s.chars().count() <= max_width {
        s
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        format!("{}...", s.chars().take(max_width - 3).collect::<String>())
    }
}

fn location(origin: Option<&Origin>) -> String {
    origin
        .map(|o| o.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn collect_rows(session: &Session, filter: Option<EntryTypeArg>) -> Vec<Row> {
    let wanted = |kind: EntryTypeArg| filter.map(|f| f == kind).unwrap_or(true);
    let mut rows = Vec::new();

    if wanted(EntryTypeArg::Alias) {
        let mut aliases: Vec<_> = session.aliases.iter().collect();
        aliases.sort_by_key(|a| a.category);
        rows.extend(aliases.into_iter().map(|a| Row {
            kind: EntryTypeArg::Alias,
            name: format!("{} [{}]", a.name, a.category),
            location: location(a.origin.as_ref()),
            value: a.expansion.clone(),
            enabled: a.enabled,
        }));
    }
    if wanted(EntryTypeArg::Func) {
        rows.extend(session.functions.iter().map(|f| Row {
            kind: EntryTypeArg::Func,
            name: f.name.clone(),
            location: location(f.origin.as_ref()),
            value: if f.description.is_empty() {
                f.body.clone()
            } else {
                f.description.clone()
            },
            enabled: true,
        }));
    }
    if wanted(EntryTypeArg::Env) {
        rows.extend(session.env_vars.iter().map(|v| Row {
            kind: EntryTypeArg::Env,
            name: v.key.clone(),
            location: location(v.origin.as_ref()),
            value: match v.keychain_service() {
                Some(service) => format!("<keychain: {}>", service),
                None => v.value.clone(),
            },
            enabled: true,
        }));
    }
    if wanted(EntryTypeArg::Path) {
        rows.extend(session.path_entries.iter().map(|p| Row {
            kind: EntryTypeArg::Path,
            name: p.path.clone(),
            location: location(p.origin.as_ref()),
            value: crate::utils::path::expand_tilde(&p.path)
                .display()
                .to_string(),
            enabled: true,
        }));
    }

    rows
}

/// Execute the list command
pub fn execute(ctx: &Context, entry_type: Option<EntryTypeArg>) -> Result<()> {
    let session = ctx.load_session()?;

    for warning in session.warnings() {
        ctx.print_warning(&warning.to_string());
    }

    let rows = collect_rows(&session, entry_type);

    if rows.is_empty() {
        println!("{}", "No entries found.".dimmed());
        return Ok(());
    }

    let term_width = get_terminal_width();
    let (type_w, name_w, loc_w, value_w) = calculate_column_widths(term_width);

    let title = format!("{} entries in {}", rows.len(), session.snapshot().files.join(", "));
    let title = truncate_value(&title, term_width.saturating_sub(4));
    let header_line_len = term_width.saturating_sub(title.chars().count() + 4);
    println!("┌─ {} {}", title.bold(), "─".repeat(header_line_len).dimmed());

    let content_width = type_w + 1 + name_w + 1 + loc_w + 1 + value_w;
    println!(
        "│ {:<type_w$} {:<name_w$} {:<loc_w$} {:<value_w$} │",
        "TYPE".bold().cyan(),
        "NAME".bold().cyan(),
        "LOCATION".bold().cyan(),
        "VALUE".bold().cyan(),
    );
    println!("│ {} │", "─".repeat(content_width).dimmed());

    for row in &rows {
        let kind = color_entry_type(row.kind);
        let name = truncate_value(&row.name, name_w);
        let name = if row.enabled {
            name.white()
        } else {
            name.dimmed().strikethrough()
        };

        println!(
            "│ {:<type_w$} {:<name_w$} {:<loc_w$} {:<value_w$} │",
            kind,
            name,
            truncate_value(&row.location, loc_w).dimmed(),
            truncate_value(&row.value, value_w).dimmed(),
        );
    }

    println!("└{}┘", "─".repeat(content_width + 2).dimmed());

    Ok(())
}

fn color_entry_type(kind: EntryTypeArg) -> colored::ColoredString {
    let label = kind.label();
    match kind {
        EntryTypeArg::Alias => label.green().bold(),
        EntryTypeArg::Func => label.blue().bold(),
        EntryTypeArg::Env => label.yellow().bold(),
        EntryTypeArg::Path => label.magenta().bold(),
    }
}
