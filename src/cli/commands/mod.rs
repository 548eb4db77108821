//! CLI command implementations

pub mod add;
pub mod backup;
pub mod check;
pub mod diff;
pub mod edit;
pub mod list;
pub mod remove;
pub mod toggle;

use anyhow::Result;

use crate::cli::args::Commands;
use crate::cli::Context;

/// Dispatch a parsed subcommand
pub fn execute(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::List { entry_type } => list::execute(ctx, *entry_type),
        Commands::Check => check::execute(ctx),
        Commands::Diff => diff::execute(ctx),
        Commands::Add { add_command } => add::execute(ctx, add_command),
        Commands::Remove { entry_type, name } => remove::execute(ctx, *entry_type, name),
        Commands::Edit {
            entry_type,
            name,
            value,
        } => edit::execute(ctx, *entry_type, name, value.as_deref()),
        Commands::Enable { name } => toggle::execute(ctx, name, true),
        Commands::Disable { name } => toggle::execute(ctx, name, false),
        Commands::Backup { backup_command } => backup::execute(ctx, backup_command),
    }
}
