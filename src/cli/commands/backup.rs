//! Backup command implementation

use anyhow::{bail, Result};
use colored::Colorize;

use crate::backup::{BackupEntry, BackupManager};
use crate::cli::args::BackupCommands;
use crate::cli::Context;
use crate::utils::path::expand_tilde;

/// Execute the backup command
pub fn execute(ctx: &Context, backup_cmd: &BackupCommands) -> Result<()> {
    let backup_manager = ctx.backup_manager();

    match backup_cmd {
        BackupCommands::List => list_backups(&backup_manager),
        BackupCommands::Restore { id } => restore_backup(ctx, &backup_manager, id),
        BackupCommands::Clean { keep } => clean_backups(&backup_manager, *keep),
    }
}

fn list_backups(manager: &BackupManager) -> Result<()> {
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("{}", "No backups found.".dimmed());
        return Ok(());
    }

    println!("{}", "Available backups:".bold());
    println!();

    println!(
        "{:<44} {:<16} {}",
        "ID".bold().cyan(),
        "FILE".bold().cyan(),
        "SIZE".bold().cyan()
    );
    println!("{}", "─".repeat(70).dimmed());

    for backup in &backups {
        println!(
            "{:<44} {:<16} {}",
            backup.id.white(),
            backup.original.dimmed(),
            format_size(backup.size).dimmed()
        );
    }

    println!();
    println!("{}", format!("Total: {} backup(s)", backups.len()).dimmed());

    Ok(())
}

/// The tracked file a backup was taken from, matched on file name.
fn restore_target(ctx: &Context, backup: &BackupEntry) -> String {
    ctx.files
        .iter()
        .find(|f| {
            expand_tilde(f)
                .file_name()
                .map(|n| n.to_string_lossy() == backup.original)
                .unwrap_or(false)
        })
        .cloned()
        .or_else(|| ctx.primary.clone())
        .unwrap_or_else(|| backup.original.clone())
}

fn restore_backup(ctx: &Context, manager: &BackupManager, id: &str) -> Result<()> {
    let Some(backup) = manager.get_backup(id)? else {
        bail!("Backup not found: {}", id);
    };
    let target = restore_target(ctx, &backup);

    println!(
        "Restoring backup: {} ({}) onto {}",
        backup.id.cyan(),
        backup.timestamp.dimmed(),
        target.cyan()
    );

    if !ctx.confirm("This will overwrite the current file. Continue?")? {
        println!("Cancelled.");
        return Ok(());
    }

    manager.restore_backup(&backup.id, &expand_tilde(&target))?;

    ctx.print_success(&format!("Restored backup to {}", target.cyan()));
    ctx.print_reload_hint(&target);

    Ok(())
}

fn clean_backups(manager: &BackupManager, keep: usize) -> Result<()> {
    let removed = manager.cleanup_keep(keep)?;

    if removed == 0 {
        println!("{}", "No old backups to clean.".dimmed());
    } else {
        println!(
            "{} Removed {} old backup(s), keeping {}",
            "✓".green(),
            removed,
            keep
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
