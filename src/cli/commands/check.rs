//! Check command implementation

use anyhow::Result;
use colored::Colorize;

use crate::checker::{check_all, Severity};
use crate::cli::Context;

/// Execute the check command
pub fn execute(ctx: &Context) -> Result<()> {
    let session = ctx.load_session()?;
    let snapshot = session.snapshot();

    let check_result = check_all(snapshot);

    if check_result.is_ok() {
        ctx.print_success("No issues found");
        println!(
            "{}",
            format!(
                "Checked {} entries in {} file(s)",
                snapshot.entity_count(),
                snapshot.files.len()
            )
            .dimmed()
        );
        return Ok(());
    }

    println!("{}", "Issues found:".red().bold());
    for issue in &check_result.issues {
        let (icon, severity) = match issue.severity {
            Severity::Error => ("✗".red(), "ERROR".red()),
            Severity::Warning => ("⚠".yellow(), "WARNING".yellow()),
        };

        print!("  {} [{}]", icon, severity);

        if let Some(ref location) = issue.location {
            print!(" {}", location.dimmed());
        }

        if let Some(ref name) = issue.entry_name {
            print!(" ({})", name.cyan());
        }

        println!(": {}", issue.message);
    }

    println!();
    let error_count = check_result
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warning_count = check_result.issues.len() - error_count;

    let summary = format!("Found {} error(s), {} warning(s)", error_count, warning_count);
    if check_result.has_errors() {
        println!("{}", summary.red());
    } else {
        println!("{}", summary.yellow());
    }

    Ok(())
}
