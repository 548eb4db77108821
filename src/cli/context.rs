//! Command execution context

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use crate::backup::BackupManager;
use crate::cli::args::Cli;
use crate::model::{Config, ShellType};
use crate::session::Session;

/// Common context for command execution
pub struct Context {
    pub config: Config,
    /// Files to load, in order
    pub files: Vec<String>,
    /// File that receives new entries
    pub primary: Option<String>,
    /// Answer yes to every confirmation
    pub assume_yes: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = crate::config::load_or_create_config()?;

        let (files, primary) = if !cli.file.is_empty() {
            (cli.file.clone(), cli.file.first().cloned())
        } else if let Some(shell) = cli.shell {
            let shell: ShellType = shell.into();
            let files: Vec<String> = shell.default_files().iter().map(|s| s.to_string()).collect();
            let primary = files.first().cloned();
            (files, primary)
        } else {
            (config.files.default_files(), config.files.primary_file())
        };

        Ok(Self {
            config,
            files,
            primary,
            assume_yes: cli.yes,
        })
    }

    /// Load the configured files into a fresh session
    pub fn load_session(&self) -> Result<Session> {
        let mut session = Session::load(self.files.clone(), self.primary.clone())?
            .with_conflict_check(self.config.write.check_conflicts);
        if self.config.backup.enabled {
            session = session.with_backup(self.backup_manager());
        }
        Ok(session)
    }

    /// Get a BackupManager instance
    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.config)
    }

    /// Save the session and report what was written
    pub fn save(&self, session: &mut Session) -> Result<()> {
        let report = session.save()?;
        for write in &report.written {
            println!(
                "{} {} ({} change{})",
                "→".cyan(),
                write.file.dimmed(),
                write.modifications,
                if write.modifications == 1 { "" } else { "s" }
            );
        }
        if !report.is_empty() {
            self.print_reload_hint(session.primary());
        }
        Ok(())
    }

    /// Ask for confirmation unless `--yes` was given
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print reload hint after modifying configuration
    pub fn print_reload_hint(&self, file: &str) {
        println!(
            "{} {}",
            "→".cyan(),
            format!("Run 'source {}' to apply changes", file).dimmed()
        );
    }
}
