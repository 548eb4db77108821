//! Shell type detection and conventional startup files

use serde::{Deserialize, Serialize};
use std::env;

/// Supported shell types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    Zsh,
    Bash,
}

impl ShellType {
    /// Detect shell type from `$SHELL`
    pub fn detect() -> Option<Self> {
        let shell = env::var("SHELL").ok()?;
        Self::from_shell_path(&shell)
    }

    fn from_shell_path(shell: &str) -> Option<Self> {
        let name = shell.rsplit('/').next().unwrap_or(shell);
        if name.contains("zsh") {
            Some(ShellType::Zsh)
        } else if name.contains("bash") {
            Some(ShellType::Bash)
        } else {
            None
        }
    }

    /// Startup file followed by profile file, in load order.
    pub fn default_files(&self) -> &'static [&'static str] {
        match self {
            ShellType::Zsh => &["~/.zshrc", "~/.zprofile"],
            ShellType::Bash => &["~/.bashrc", "~/.bash_profile"],
        }
    }

    /// Get shell name as string
    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Zsh => "zsh",
            ShellType::Bash => "bash",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ShellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zsh" => Ok(ShellType::Zsh),
            "bash" => Ok(ShellType::Bash),
            _ => Err(format!("Unknown shell type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_type_name() {
        assert_eq!(ShellType::Zsh.name(), "zsh");
        assert_eq!(ShellType::Bash.name(), "bash");
    }

    #[test]
    fn test_shell_type_from_str() {
        assert_eq!("zsh".parse::<ShellType>().unwrap(), ShellType::Zsh);
        assert_eq!("BASH".parse::<ShellType>().unwrap(), ShellType::Bash);
        assert!("fish".parse::<ShellType>().is_err());
    }

    #[test]
    fn test_from_shell_path() {
        assert_eq!(ShellType::from_shell_path("/bin/zsh"), Some(ShellType::Zsh));
        assert_eq!(
            ShellType::from_shell_path("/opt/homebrew/bin/bash"),
            Some(ShellType::Bash)
        );
        assert_eq!(ShellType::from_shell_path("/usr/bin/fish"), None);
    }

    #[test]
    fn test_default_files() {
        assert_eq!(ShellType::Zsh.default_files()[0], "~/.zshrc");
        assert_eq!(ShellType::Bash.default_files()[1], "~/.bash_profile");
    }
}
