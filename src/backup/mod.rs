//! Backup management module

use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::model::Config;

/// Backup entry information
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub id: String,
    pub path: PathBuf,
    pub timestamp: String,
    /// Name of the file that was backed up (e.g. `.zshrc`)
    pub original: String,
    pub size: u64,
}

/// Backup manager
///
/// Every rc file written by a save is copied here first. Backups are named
/// `<timestamp>_<original file name>.bak` so they sort chronologically.
pub struct BackupManager {
    backup_dir: PathBuf,
    max_count: usize,
}

impl BackupManager {
    pub fn new(config: &Config) -> Self {
        Self::with_dir(Config::backups_dir(), config.backup.max_count)
    }

    pub fn with_dir(backup_dir: PathBuf, max_count: usize) -> Self {
        Self {
            backup_dir,
            max_count,
        }
    }

    /// Ensure backup directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.backup_dir)
    }

    /// Create a backup of the specified file
    pub fn create_backup(&self, source_file: &Path) -> io::Result<PathBuf> {
        self.ensure_dir()?;

        let now = OffsetDateTime::now_utc();
        let timestamp = format!(
            "{:04}-{:02}-{:02}_{:02}{:02}{:02}{:03}",
            now.year(),
            now.month() as u8,
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            now.millisecond()
        );

        let filename = source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "rc".to_string());

        let mut backup_path = self.backup_dir.join(format!("{}_{}.bak", timestamp, filename));
        let mut suffix = 1;
        while backup_path.exists() {
            backup_path = self
                .backup_dir
                .join(format!("{}-{}_{}.bak", timestamp, suffix, filename));
            suffix += 1;
        }

        std::fs::copy(source_file, &backup_path)?;
        self.cleanup_old_backups()?;

        Ok(backup_path)
    }

    /// List all backups, newest first
    pub fn list_backups(&self) -> io::Result<Vec<BackupEntry>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in std::fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "bak").unwrap_or(false) {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                let size = entry.metadata()?.len();
                let id = filename.trim_end_matches(".bak").to_string();

                // <date>_<time>_<original>
                let mut parts = id.splitn(3, '_');
                let date = parts.next().unwrap_or_default();
                let clock = parts.next().unwrap_or_default();
                let original = parts.next().unwrap_or_default().to_string();

                entries.push(BackupEntry {
                    timestamp: format!("{}_{}", date, clock),
                    id,
                    path,
                    original,
                    size,
                });
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(entries)
    }

    /// Restore a backup by ID onto `target_file`.
    ///
    /// The current content of the target is backed up first.
    pub fn restore_backup(&self, id: &str, target_file: &Path) -> io::Result<()> {
        let backup = self.get_backup(id)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("Backup not found: {}", id))
        })?;

        if target_file.exists() {
            self.create_backup(target_file)?;
        }

        std::fs::copy(&backup.path, target_file)?;

        Ok(())
    }

    /// Clean up old backups, keeping only the configured number
    pub fn cleanup_old_backups(&self) -> io::Result<usize> {
        self.cleanup_keep(self.max_count)
    }

    /// Clean up backups, keeping only the specified number
    pub fn cleanup_keep(&self, keep: usize) -> io::Result<usize> {
        let backups = self.list_backups()?;

        if backups.len() <= keep {
            return Ok(0);
        }

        let mut removed = 0;
        for backup in backups.into_iter().skip(keep) {
            std::fs::remove_file(&backup.path)?;
            removed += 1;
        }

        Ok(removed)
    }

    /// Get a specific backup by ID
    pub fn get_backup(&self, id: &str) -> io::Result<Option<BackupEntry>> {
        let backups = self.list_backups()?;
        Ok(backups
            .into_iter()
            .find(|b| b.id == id || b.id.starts_with(id)))
    }
}
