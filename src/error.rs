//! Library error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the load/save engine.
///
/// Missing default files, unreadable sourced files and malformed lines are
/// not errors; they are absorbed by the parser. Only failures on files the
/// caller explicitly asked for end up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} changed on disk since it was loaded; reload before saving", path.display())]
    Conflict { path: PathBuf },

    #[error("could not back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {kind} name: '{name}'")]
    InvalidName { kind: &'static str, name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
