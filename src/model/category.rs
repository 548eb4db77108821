//! Alias classification
//!
//! Categories are derived from an alias' name and expansion for grouping in
//! listings. They are never written back and carry no weight in parsing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AliasCategory {
    Git,
    Navigation,
    Listing,
    Container,
    Editor,
    Package,
    Network,
    System,
    Other,
}

impl AliasCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AliasCategory::Git => "git",
            AliasCategory::Navigation => "navigation",
            AliasCategory::Listing => "listing",
            AliasCategory::Container => "container",
            AliasCategory::Editor => "editor",
            AliasCategory::Package => "package",
            AliasCategory::Network => "network",
            AliasCategory::System => "system",
            AliasCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for AliasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

const EDITORS: &[&str] = &["vim", "nvim", "vi", "nano", "emacs", "code", "subl", "hx", "micro"];
const PACKAGE_TOOLS: &[&str] = &[
    "brew", "npm", "pnpm", "yarn", "pip", "pip3", "cargo", "gem", "port", "mas",
];
const NETWORK_TOOLS: &[&str] = &[
    "curl", "wget", "ssh", "scp", "ping", "dig", "nslookup", "ifconfig", "netstat", "lsof",
];
const SYSTEM_TOOLS: &[&str] = &[
    "sudo", "kill", "killall", "top", "htop", "ps", "df", "du", "open", "pbcopy", "pbpaste",
    "defaults", "launchctl", "source", "exec",
];

/// Classify an alias from its name and expansion.
///
/// The first command word of the expansion decides; a few name shapes
/// (`..`, `g*`) are recognised when the expansion is inconclusive.
pub fn classify_alias(name: &str, expansion: &str) -> AliasCategory {
    let command = first_command_word(expansion);

    match command {
        "git" | "gh" | "tig" | "lazygit" => return AliasCategory::Git,
        "cd" | "pushd" | "popd" | "z" | "zoxide" => return AliasCategory::Navigation,
        "ls" | "ll" | "la" | "exa" | "eza" | "lsd" | "tree" => return AliasCategory::Listing,
        "docker" | "docker-compose" | "podman" | "kubectl" | "k9s" | "helm" => {
            return AliasCategory::Container
        }
        _ => {}
    }
    if EDITORS.contains(&command) {
        return AliasCategory::Editor;
    }
    if PACKAGE_TOOLS.contains(&command) {
        return AliasCategory::Package;
    }
    if NETWORK_TOOLS.contains(&command) {
        return AliasCategory::Network;
    }
    if SYSTEM_TOOLS.contains(&command) {
        return AliasCategory::System;
    }

    if name.chars().all(|c| c == '.') || name == "~" || name == "-" {
        return AliasCategory::Navigation;
    }
    if name.len() <= 4 && name.starts_with('g') && expansion.contains("git") {
        return AliasCategory::Git;
    }

    AliasCategory::Other
}

/// First word of a command line, skipping leading `VAR=x` assignments and `command`/`noglob` prefixes.
fn first_command_word(expansion: &str) -> &str {
    expansion
        .split_whitespace()
        .find(|w| !w.contains('=') && !matches!(*w, "command" | "noglob" | "nocorrect" | "builtin"))
        .map(|w| w.rsplit('/').next().unwrap_or(w))
        .unwrap_or("")
}
