//! File read/write primitives
//!
//! Reads map I/O failures onto [`Error::Io`] with the offending path. Writes
//! go through a temp file in the target's directory and are renamed into
//! place, so an interrupted save never leaves a half-written rc file.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backup::BackupManager;
use crate::error::{Error, Result};
use crate::utils::strings::split_lines_preserve_trailing;

/// Read a whole file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read a file as a line array (see [`split_lines_preserve_trailing`]).
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = read_file(path)?;
    Ok(split_lines_preserve_trailing(&content)
        .into_iter()
        .map(String::from)
        .collect())
}

/// SHA-256 of file content, hex encoded.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Write `content` to `path` atomically.
///
/// - symlinks are followed so the link itself survives
/// - the previous content is copied to `backup` first when given
/// - the original permission bits are carried over to the new file
///
/// Returns the path actually written.
pub fn write_atomic(
    path: &Path,
    content: &str,
    backup: Option<&BackupManager>,
) -> Result<PathBuf> {
    let target = if path.exists() {
        fs::canonicalize(path).map_err(|e| Error::io(path, e))?
    } else {
        path.to_path_buf()
    };

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let existing_perms = fs::metadata(&target).map(|m| m.permissions()).ok();

    if let (Some(manager), true) = (backup, target.exists()) {
        let saved = manager
            .create_backup(&target)
            .map_err(|e| Error::Backup {
                path: target.clone(),
                source: e,
            })?;
        debug!(file = %target.display(), backup = %saved.display(), "backed up before write");
    }

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io(tmp.path(), e))?;

    if let Some(perms) = existing_perms {
        fs::set_permissions(tmp.path(), perms).map_err(|e| Error::io(tmp.path(), e))?;
    }

    tmp.persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;

    debug!(file = %target.display(), bytes = content.len(), "wrote file");
    Ok(target)
}
