//! Core data models for dotrc

mod category;
mod config;
mod entities;
mod parsed;
mod shell;

pub use category::{classify_alias, AliasCategory};
pub use config::{BackupConfig, Config, FilesConfig, WriteConfig};
pub use entities::{Alias, EnvVar, Origin, PathEntry, ShellFunction};
pub use parsed::{ParseWarning, ParsedConfig};
pub use shell::ShellType;
