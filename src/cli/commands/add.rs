//! Add command implementation

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::args::{split_definition, AddCommands};
use crate::cli::Context;
use crate::model::{Alias, EnvVar, ShellFunction};
use crate::session::Session;
use crate::utils::path::file_key;

/// Execute the add command
pub fn execute(ctx: &Context, add_cmd: &AddCommands) -> Result<()> {
    let mut session = ctx.load_session()?;

    let added = match add_cmd {
        AddCommands::Alias { definition, to } => add_alias(ctx, &mut session, definition, to)?,
        AddCommands::Func {
            name,
            body,
            description,
            to,
        } => add_function(ctx, &mut session, name, body, description.as_deref(), to)?,
        AddCommands::Env {
            definition,
            keychain,
            to,
        } => add_env(ctx, &mut session, definition, keychain.as_deref(), to)?,
        AddCommands::Path { dir, to } => {
            // `~` does not expand inside the double-quoted PATH line
            let dir = match dir.strip_prefix("~/") {
                Some(rest) => format!("$HOME/{}", rest),
                None => dir.clone(),
            };
            if session.path_entries.iter().any(|p| p.path == dir) {
                ctx.print_warning(&format!("'{}' is already on PATH, skipping", dir));
                return Ok(());
            }
            session.add_path(dir.clone(), to.as_deref().map(file_key));
            Some(format!("Path '{}'", dir.cyan()))
        }
    };

    let Some(added) = added else {
        println!("Skipped.");
        return Ok(());
    };

    ctx.save(&mut session)?;
    ctx.print_success(&format!("Added {}", added));
    Ok(())
}

/// Ask before shadowing an existing definition of the same name.
fn overwrite_ok(ctx: &Context, kind: &str, name: &str, existing: &str) -> Result<bool> {
    println!(
        "{} '{}' already exists with value: {}",
        kind,
        name.cyan(),
        existing.dimmed()
    );
    ctx.confirm("Overwrite?")
}

fn add_alias(
    ctx: &Context,
    session: &mut Session,
    definition: &str,
    to: &Option<String>,
) -> Result<Option<String>> {
    let Some((name, expansion)) = split_definition(definition) else {
        bail!("Invalid alias format. Use: NAME=VALUE");
    };

    if let Some(existing) = session.aliases.iter().find(|a| a.name == name) {
        let current = existing.expansion.clone();
        if !overwrite_ok(ctx, "Alias", &name, &current)? {
            return Ok(None);
        }
        if let Some(alias) = session.alias_mut(&name) {
            alias.set_expansion(expansion.clone());
            alias.enabled = true;
        }
    } else {
        let mut alias = Alias::new(name.clone(), expansion.clone());
        alias.source_file = to.as_deref().map(file_key);
        session.aliases.push(alias);
    }

    Ok(Some(format!("Alias '{}' = '{}'", name.cyan(), expansion)))
}

fn add_function(
    ctx: &Context,
    session: &mut Session,
    name: &str,
    body: &str,
    description: Option<&str>,
    to: &Option<String>,
) -> Result<Option<String>> {
    if let Some(existing) = session.functions.iter().find(|f| f.name == name) {
        let current = existing.body.clone();
        if !overwrite_ok(ctx, "Function", name, &current)? {
            return Ok(None);
        }
        if let Some(func) = session.function_mut(name) {
            func.body = body.to_string();
            if let Some(description) = description {
                func.description = description.to_string();
            }
        }
    } else {
        let mut func = ShellFunction::new(name, body);
        if let Some(description) = description {
            func = func.with_description(description);
        }
        func.source_file = to.as_deref().map(file_key);
        session.functions.push(func);
    }

    Ok(Some(format!("Function '{}'", name.cyan())))
}

fn add_env(
    ctx: &Context,
    session: &mut Session,
    definition: &str,
    keychain: Option<&str>,
    to: &Option<String>,
) -> Result<Option<String>> {
    let var = match (split_definition(definition), keychain) {
        (_, Some(service)) => {
            let key = definition.split('=').next().unwrap_or(definition).trim();
            EnvVar::keychain(key, service)
        }
        (Some((key, value)), None) => EnvVar::new(key, value),
        (None, None) => bail!("Invalid env format. Use: KEY=VALUE, or KEY --keychain SERVICE"),
    };

    if let Some(existing) = session.env_vars.iter().find(|v| v.key == var.key) {
        let current = existing.value.clone();
        if !overwrite_ok(ctx, "EnvVar", &var.key, &current)? {
            return Ok(None);
        }
        if let Some(existing) = session.env_var_mut(&var.key) {
            existing.set_value(var.value.clone());
        }
    } else {
        let mut var = var.clone();
        var.source_file = to.as_deref().map(file_key);
        session.env_vars.push(var);
    }

    Ok(Some(match keychain {
        Some(service) => format!("EnvVar '{}' from keychain '{}'", var.key.cyan(), service),
        None => format!("EnvVar '{}' = '{}'", var.key.cyan(), var.value),
    }))
}
