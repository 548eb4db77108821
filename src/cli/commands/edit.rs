//! Edit command implementation

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Editor, Input};

use crate::cli::args::EntryTypeArg;
use crate::cli::Context;
use crate::session::Session;

/// Execute the edit command
pub fn execute(
    ctx: &Context,
    entry_type: EntryTypeArg,
    name: &str,
    value: Option<&str>,
) -> Result<()> {
    let mut session = ctx.load_session()?;

    let Some(current) = current_value(&session, entry_type, name) else {
        ctx.print_error(&format!("{} '{}' not found", entry_type, name));
        return Ok(());
    };

    let new_value = match value {
        Some(value) => value.to_string(),
        None => {
            println!(
                "Editing {} '{}' (current value: '{}')",
                entry_type,
                name.cyan(),
                current.dimmed()
            );
            prompt_value(entry_type, &current)?
        }
    };

    if new_value == current {
        println!("No changes made.");
        return Ok(());
    }

    match entry_type {
        EntryTypeArg::Alias => {
            if let Some(alias) = session.alias_mut(name) {
                alias.set_expansion(new_value.clone());
            }
        }
        EntryTypeArg::Func => {
            if let Some(func) = session.function_mut(name) {
                func.body = new_value.clone();
            }
        }
        EntryTypeArg::Env => {
            if let Some(var) = session.env_var_mut(name) {
                var.set_value(new_value.clone());
            }
        }
        EntryTypeArg::Path => {
            for entry in session.path_entries.iter_mut().filter(|p| p.path == name) {
                entry.path = new_value.clone();
            }
        }
    }

    ctx.save(&mut session)?;
    ctx.print_success(&format!(
        "Updated {} '{}' = '{}'",
        entry_type,
        name.cyan(),
        new_value
    ));
    Ok(())
}

fn current_value(session: &Session, entry_type: EntryTypeArg, name: &str) -> Option<String> {
    match entry_type {
        EntryTypeArg::Alias => session
            .aliases
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.expansion.clone()),
        EntryTypeArg::Func => session
            .functions
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.body.clone()),
        EntryTypeArg::Env => session
            .env_vars
            .iter()
            .find(|v| v.key == name)
            .map(|v| v.value.clone()),
        EntryTypeArg::Path => session
            .path_entries
            .iter()
            .find(|p| p.path == name)
            .map(|p| p.path.clone()),
    }
}

/// Function bodies open in `$EDITOR`; everything else is a one-line prompt.
fn prompt_value(entry_type: EntryTypeArg, current: &str) -> Result<String> {
    if entry_type == EntryTypeArg::Func {
        let edited = Editor::new().extension(".sh").edit(current)?;
        return Ok(edited
            .map(|body| body.trim_end_matches('\n').to_string())
            .unwrap_or_else(|| current.to_string()));
    }

    Ok(Input::new()
        .with_prompt("New value")
        .with_initial_text(current)
        .interact_text()?)
}
