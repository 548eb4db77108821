//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ShellType;

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub write: WriteConfig,
}

/// Which rc files are loaded by default
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FilesConfig {
    /// Shell whose conventional startup files are used (detected from `$SHELL` when absent)
    pub shell: Option<ShellType>,
    /// Explicit file list, overrides the shell's default set
    #[serde(default)]
    pub paths: Vec<String>,
    /// File that receives newly created entries (defaults to the first file)
    pub primary: Option<String>,
}

/// Backup configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackupConfig {
    pub enabled: bool,
    pub max_count: usize,
}

/// Save behaviour
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WriteConfig {
    /// Refuse to save a file whose content changed since it was loaded
    pub check_conflicts: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        BackupConfig {
            enabled: true,
            max_count: 20,
        }
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        WriteConfig {
            check_conflicts: true,
        }
    }
}

impl FilesConfig {
    /// The ordered list of files to scan, tilde-prefixed.
    pub fn default_files(&self) -> Vec<String> {
        if !self.paths.is_empty() {
            return self.paths.clone();
        }
        let shell = self
            .shell
            .or_else(ShellType::detect)
            .unwrap_or(ShellType::Zsh);
        shell
            .default_files()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Target file for new entries.
    pub fn primary_file(&self) -> Option<String> {
        self.primary
            .clone()
            .or_else(|| self.default_files().into_iter().next())
    }
}

impl Config {
    /// Get the dotrc configuration directory path
    ///
    /// `DOTRC_CONFIG_DIR` overrides the platform location.
    pub fn config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os("DOTRC_CONFIG_DIR").filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("dotrc")
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the backups directory path
    pub fn backups_dir() -> PathBuf {
        Self::config_dir().join("backups")
    }

    /// Load configuration from file, or return default if file doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.backup.enabled);
        assert_eq!(config.backup.max_count, 20);
        assert!(config.write.check_conflicts);
        assert!(config.files.paths.is_empty());
    }

    #[test]
    fn test_explicit_paths_override_shell() {
        let files = FilesConfig {
            shell: Some(ShellType::Bash),
            paths: vec!["~/.config/zsh/main.zsh".into()],
            primary: None,
        };
        assert_eq!(files.default_files(), vec!["~/.config/zsh/main.zsh"]);
        assert_eq!(
            files.primary_file().as_deref(),
            Some("~/.config/zsh/main.zsh")
        );
    }

    #[test]
    fn test_shell_default_files() {
        let files = FilesConfig {
            shell: Some(ShellType::Zsh),
            ..Default::default()
        };
        assert_eq!(files.default_files(), vec!["~/.zshrc", "~/.zprofile"]);
        assert_eq!(files.primary_file().as_deref(), Some("~/.zshrc"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[files]
shell = "bash"
primary = "~/.bash_aliases"

[backup]
enabled = false
max_count = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.files.shell, Some(ShellType::Bash));
        assert_eq!(
            config.files.primary_file().as_deref(),
            Some("~/.bash_aliases")
        );
        assert!(!config.backup.enabled);
        assert_eq!(config.backup.max_count, 3);
        assert!(config.write.check_conflicts);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backup.max_count, config.backup.max_count);
    }
}
