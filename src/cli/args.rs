//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "dotrc")]
#[command(about = "Shell dotfile manager - edit aliases, functions, PATH and exports in place")]
#[command(version)]
#[command(author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to load (repeatable; default: the shell's startup files)
    #[arg(short, long, global = true)]
    pub file: Vec<String>,

    /// Shell whose default files are loaded
    #[arg(short, long, global = true)]
    pub shell: Option<ShellArg>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List entries
    #[command(visible_alias = "ls")]
    List {
        /// Entry type: alias|func|env|path (a/f/e/p)
        entry_type: Option<EntryTypeArg>,
    },

    /// Check for duplicates and parse problems
    Check,

    /// Show the edits a save would make (empty right after loading)
    Diff,

    /// Add an entry
    Add {
        #[command(subcommand)]
        add_command: AddCommands,
    },

    /// Remove an entry
    #[command(visible_alias = "rm")]
    Remove {
        /// Entry type: a/f/e/p
        entry_type: EntryTypeArg,
        /// Alias/function name, variable key or PATH directory
        name: String,
    },

    /// Edit an entry; prompts for the value when omitted
    Edit {
        /// Entry type: a/f/e/p
        entry_type: EntryTypeArg,
        /// Alias/function name, variable key or PATH directory
        name: String,
        /// New value (alias expansion, function body, variable value or directory)
        value: Option<String>,
    },

    /// Uncomment a disabled alias
    Enable {
        /// Alias name
        name: String,
    },

    /// Comment out an alias
    Disable {
        /// Alias name
        name: String,
    },

    /// Backup management
    Backup {
        #[command(subcommand)]
        backup_command: BackupCommands,
    },
}

#[derive(Subcommand)]
pub enum AddCommands {
    /// Add alias
    #[command(visible_alias = "a")]
    Alias {
        /// NAME=VALUE format
        definition: String,
        /// File to add to (default: primary file)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add function
    #[command(visible_alias = "f")]
    Func {
        /// Function name
        name: String,
        /// Function body
        body: String,
        /// One-line description, written as a comment above the function
        #[arg(short, long)]
        description: Option<String>,
        /// File to add to (default: primary file)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add environment variable
    #[command(visible_alias = "e")]
    Env {
        /// KEY=VALUE format, or just KEY with --keychain
        definition: String,
        /// Read the value from this keychain service at shell startup
        #[arg(long)]
        keychain: Option<String>,
        /// File to add to (default: primary file)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add PATH directory
    #[command(visible_alias = "p")]
    Path {
        /// Directory to prepend to PATH
        dir: String,
        /// File to add to (default: primary file)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// List backups
    List,
    /// Restore backup
    Restore {
        /// Backup ID
        id: String,
    },
    /// Clean old backups
    Clean {
        /// Number to keep
        #[arg(long, default_value = "20")]
        keep: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShellArg {
    Zsh,
    Bash,
}

impl From<ShellArg> for crate::model::ShellType {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Zsh => crate::model::ShellType::Zsh,
            ShellArg::Bash => crate::model::ShellType::Bash,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntryTypeArg {
    #[value(alias = "a")]
    Alias,
    #[value(aliases = ["f", "function"])]
    Func,
    #[value(alias = "e")]
    Env,
    #[value(alias = "p")]
    Path,
}

impl EntryTypeArg {
    pub fn label(self) -> &'static str {
        match self {
            EntryTypeArg::Alias => "Alias",
            EntryTypeArg::Func => "Function",
            EntryTypeArg::Env => "EnvVar",
            EntryTypeArg::Path => "Path",
        }
    }
}

impl std::fmt::Display for EntryTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Split `NAME=VALUE`, stripping one pair of quotes around the value.
pub fn split_definition(definition: &str) -> Option<(String, String)> {
    let (name, value) = definition.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), crate::utils::strings::unquote(value)))
}
