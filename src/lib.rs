//! dotrc - Shell Dotfile Manager
//!
//! Reads zsh/bash startup files into typed entities and writes edits back as
//! minimal line-level changes, leaving everything it does not understand
//! byte-for-byte intact.
//!
//! # Features
//!
//! - Parse aliases (including commented-out ones), functions, PATH entries and exports
//! - Follow `source`/`.` directives with cycle detection
//! - Diff in-memory edits against the loaded snapshot and apply them per file
//! - Refuse to overwrite files changed on disk since they were loaded
//! - Check for duplicate definitions
//! - Automatic backups

pub mod backup;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;
pub mod utils;
pub mod writer;

pub use checker::check_all;
pub use error::{Error, Result};
pub use model::{
    Alias, AliasCategory, Config, EnvVar, Origin, ParseWarning, ParsedConfig, PathEntry,
    ShellFunction, ShellType,
};
pub use parser::{parse, parse_single_file};
pub use session::Session;
pub use writer::{apply, Modification};
