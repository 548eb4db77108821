//! Remove command implementation

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::EntryTypeArg;
use crate::cli::Context;

/// Execute the remove command
pub fn execute(ctx: &Context, entry_type: EntryTypeArg, name: &str) -> Result<()> {
    let mut session = ctx.load_session()?;

    let current = match entry_type {
        EntryTypeArg::Alias => session
            .aliases
            .iter()
            .find(|a| a.name == name)
            .map(|a| (a.expansion.clone(), a.origin.clone())),
        EntryTypeArg::Func => session
            .functions
            .iter()
            .find(|f| f.name == name)
            .map(|f| (f.body.clone(), f.origin.clone())),
        EntryTypeArg::Env => session
            .env_vars
            .iter()
            .find(|v| v.key == name)
            .map(|v| (v.value.clone(), v.origin.clone())),
        EntryTypeArg::Path => session
            .path_entries
            .iter()
            .find(|p| p.path == name)
            .map(|p| (p.path.clone(), p.origin.clone())),
    };

    let Some((value, origin)) = current else {
        ctx.print_error(&format!("{} '{}' not found", entry_type, name));
        return Ok(());
    };

    println!(
        "Found {} '{}' = '{}'{}",
        entry_type,
        name.cyan(),
        value.dimmed(),
        origin
            .map(|o| format!(" at {}", o).dimmed().to_string())
            .unwrap_or_default()
    );

    if !ctx.confirm("Delete this entry?")? {
        println!("Cancelled.");
        return Ok(());
    }

    match entry_type {
        EntryTypeArg::Alias => {
            session.remove_alias(name);
        }
        EntryTypeArg::Func => {
            session.remove_function(name);
        }
        EntryTypeArg::Env => {
            session.remove_env_var(name);
        }
        EntryTypeArg::Path => {
            session.remove_path(name);
        }
    }

    ctx.save(&mut session)?;
    ctx.print_success(&format!("Removed {} '{}'", entry_type, name.cyan()));
    Ok(())
}
