//! # Session
//!
//! Owns one load of a set of rc files and turns in-memory edits into
//! line-level writes.
//!
//! ```text
//! load ──► snapshot + editable copies
//!            │
//!   edit  ───┘ (mutate aliases / functions / path_entries / env_vars)
//!            │
//! save ──► plan (diff vs. snapshot) ──► apply per file ──► guard ──► write ──► reload
//! ```
//!
//! Line numbers are only meaningful against the snapshot they were parsed
//! from, so every successful save ends with a fresh parse. A save that stops
//! part way re-parses too: edits that reached disk are adopted and the rest
//! stay pending against the new snapshot.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dotrc::session::Session;
//!
//! let mut session = Session::load(vec!["~/.zshrc".into()], None)?;
//! if let Some(alias) = session.aliases.iter_mut().find(|a| a.name == "ll") {
//!     alias.set_expansion("ls -lah");
//! }
//! session.save()?;
//! ```

mod diff;

pub use diff::Plan;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::backup::BackupManager;
use crate::error::{Error, Result};
use crate::model::{Alias, EnvVar, ParseWarning, ParsedConfig, PathEntry, ShellFunction};
use crate::parser;
use crate::parser::patterns::{ALIAS_NAME_RE, ENV_KEY_RE, FUNC_NAME_RE};
use crate::utils::fs::{fingerprint, read_file, write_atomic};
use crate::utils::path::file_key;
use crate::utils::strings::join_lines;
use crate::writer;

use diff::{target_file, Placed, Planner};

/// One file written by a save
#[derive(Debug, Clone)]
pub struct FileWrite {
    pub file: String,
    pub path: PathBuf,
    pub modifications: usize,
}

/// Outcome of [`Session::save`]
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    pub written: Vec<FileWrite>,
}

impl SaveReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    pub fn total_modifications(&self) -> usize {
        self.written.iter().map(|w| w.modifications).sum()
    }
}

/// A loaded configuration plus the pending edits against it.
pub struct Session {
    files: Vec<String>,
    primary: String,
    snapshot: ParsedConfig,
    pub aliases: Vec<Alias>,
    pub functions: Vec<ShellFunction>,
    pub path_entries: Vec<PathEntry>,
    pub env_vars: Vec<EnvVar>,
    backup: Option<BackupManager>,
    check_conflicts: bool,
}

impl Session {
    /// Parse `files` (missing ones are skipped) and start a session.
    ///
    /// New entities go to `primary`, or to the first file when `None`.
    pub fn load(files: Vec<String>, primary: Option<String>) -> Result<Self> {
        let primary = primary
            .or_else(|| files.first().cloned())
            .map(|p| file_key(&p))
            .unwrap_or_default();
        let snapshot = parser::parse(files.as_slice())?;

        let mut session = Self {
            files,
            primary,
            snapshot: ParsedConfig::new(),
            aliases: Vec::new(),
            functions: Vec::new(),
            path_entries: Vec::new(),
            env_vars: Vec::new(),
            backup: None,
            check_conflicts: true,
        };
        session.install(snapshot);
        Ok(session)
    }

    /// Copy previous content to `manager` before every write.
    pub fn with_backup(mut self, manager: BackupManager) -> Self {
        self.backup = Some(manager);
        self
    }

    /// Enable or disable the on-disk change check before writing.
    pub fn with_conflict_check(mut self, enabled: bool) -> Self {
        self.check_conflicts = enabled;
        self
    }

    pub fn snapshot(&self) -> &ParsedConfig {
        &self.snapshot
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.snapshot.warnings
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Throw away pending edits and parse again.
    pub fn reload(&mut self) -> Result<()> {
        let snapshot = parser::parse(self.files.as_slice())?;
        self.install(snapshot);
        Ok(())
    }

    fn install(&mut self, snapshot: ParsedConfig) {
        self.aliases = snapshot.aliases.clone();
        self.functions = snapshot.functions.clone();
        self.path_entries = snapshot.path_entries.clone();
        self.env_vars = snapshot.env_vars.clone();
        self.snapshot = snapshot;
    }

    /// The modifications a save would apply, grouped by file.
    pub fn plan(&self) -> Plan {
        let mut planner = Planner::new(&self.snapshot, &self.primary);
        planner.aliases(&self.aliases);
        planner.functions(&self.functions);
        planner.path_entries(&self.path_entries);
        planner.env_vars(&self.env_vars);
        planner.finish()
    }

    pub fn is_dirty(&self) -> bool {
        !self.plan().is_empty()
    }

    /// Write pending edits and reload.
    ///
    /// Nothing is written if any entity has an invalid name or any target
    /// file changed on disk since it was loaded. On error the pending edits
    /// that did not reach disk are left in place.
    pub fn save(&mut self) -> Result<SaveReport> {
        self.save_with(write_atomic)
    }

    fn save_with<W>(&mut self, mut write: W) -> Result<SaveReport>
    where
        W: FnMut(&Path, &str, Option<&BackupManager>) -> Result<PathBuf>,
    {
        self.validate()?;

        let plan = self.plan();
        if plan.is_empty() {
            debug!("nothing to save");
            return Ok(SaveReport::default());
        }

        let mut batches = Vec::with_capacity(plan.len());
        for (file, modifications) in &plan {
            let path = self.snapshot.location_of(file);
            if self.check_conflicts {
                self.guard(file, &path)?;
            }
            let original = self.snapshot.lines_of(file).unwrap_or(&[]);
            let lines = writer::apply(modifications, original);
            debug!(file = %file, modifications = modifications.len(), "applied batch");
            batches.push((file.clone(), path, modifications.len(), lines));
        }

        let mut report = SaveReport::default();
        for (file, path, modifications, lines) in batches {
            if let Err(err) = write(&path, &join_lines(&lines), self.backup.as_ref()) {
                if !report.is_empty() {
                    warn!(file = %file, written = report.written.len(), "save stopped part way");
                    self.track_new_files(&report);
                    if let Err(reparse) = self.rebase(&report) {
                        warn!(error = %reparse, "could not re-read files after a partial save");
                    }
                }
                return Err(err);
            }
            report.written.push(FileWrite {
                file,
                path,
                modifications,
            });
        }

        self.track_new_files(&report);
        self.reload()?;
        Ok(report)
    }

    /// Files created by a save are tracked from then on.
    fn track_new_files(&mut self, report: &SaveReport) {
        for write in &report.written {
            let tracked = self.files.iter().any(|f| file_key(f) == write.file);
            if !tracked && !self.snapshot.raw_lines.contains_key(&write.file) {
                self.files.push(write.file.clone());
            }
        }
    }

    /// Parse again after some of a plan's files were written.
    ///
    /// Entities bound for a written file are replaced by what is now on disk.
    /// The rest keep their pending state; those whose origin sat in a written
    /// file lose it, since that line is gone or moved.
    fn rebase(&mut self, report: &SaveReport) -> Result<()> {
        let fresh = parser::parse(self.files.as_slice())?;
        let written: HashSet<String> = report.written.iter().map(|w| w.file.clone()).collect();
        let target =
            |source_file: Option<&str>| target_file(&self.snapshot, &self.primary, source_file);

        let aliases = rebase_entities(&self.aliases, &fresh.aliases, &written, &target);
        let functions = rebase_entities(&self.functions, &fresh.functions, &written, &target);
        let path_entries =
            rebase_entities(&self.path_entries, &fresh.path_entries, &written, &target);
        let env_vars = rebase_entities(&self.env_vars, &fresh.env_vars, &written, &target);

        self.aliases = aliases;
        self.functions = functions;
        self.path_entries = path_entries;
        self.env_vars = env_vars;
        self.snapshot = fresh;
        Ok(())
    }

    /// Fail with [`Error::Conflict`] when `path` no longer matches the snapshot.
    fn guard(&self, file: &str, path: &std::path::Path) -> Result<()> {
        let unchanged = match self.snapshot.fingerprints.get(file) {
            Some(expected) => path.exists() && fingerprint(&read_file(path)?) == *expected,
            None => !path.exists(),
        };
        if unchanged {
            Ok(())
        } else {
            Err(Error::Conflict {
                path: path.to_path_buf(),
            })
        }
    }

    fn validate(&self) -> Result<()> {
        for alias in &self.aliases {
            if !ALIAS_NAME_RE.is_match(&alias.name) {
                return Err(invalid("alias", &alias.name));
            }
        }
        for func in &self.functions {
            if !FUNC_NAME_RE.is_match(&func.name) {
                return Err(invalid("function", &func.name));
            }
        }
        for var in &self.env_vars {
            if var.key == "PATH" || !ENV_KEY_RE.is_match(&var.key) {
                return Err(invalid("environment variable", &var.key));
            }
        }
        for entry in &self.path_entries {
            let path = entry.path.trim();
            if path.is_empty() || path.contains(':') || path.contains('"') {
                return Err(invalid("PATH", &entry.path));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Lookup helpers
    // =========================================================================

    pub fn alias_mut(&mut self, name: &str) -> Option<&mut Alias> {
        self.aliases.iter_mut().find(|a| a.name == name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut ShellFunction> {
        self.functions.iter_mut().find(|f| f.name == name)
    }

    pub fn env_var_mut(&mut self, key: &str) -> Option<&mut EnvVar> {
        self.env_vars.iter_mut().find(|v| v.key == key)
    }

    /// Remove the first alias called `name`.
    pub fn remove_alias(&mut self, name: &str) -> Option<Alias> {
        let index = self.aliases.iter().position(|a| a.name == name)?;
        Some(self.aliases.remove(index))
    }

    pub fn remove_function(&mut self, name: &str) -> Option<ShellFunction> {
        let index = self.functions.iter().position(|f| f.name == name)?;
        Some(self.functions.remove(index))
    }

    pub fn remove_env_var(&mut self, key: &str) -> Option<EnvVar> {
        let index = self.env_vars.iter().position(|v| v.key == key)?;
        Some(self.env_vars.remove(index))
    }

    /// Remove every PATH entry equal to `dir`, returning how many went.
    pub fn remove_path(&mut self, dir: &str) -> usize {
        let before = self.path_entries.len();
        self.path_entries.retain(|e| e.path != dir);
        before - self.path_entries.len()
    }

    /// Queue a new PATH directory, placed after other new directories.
    pub fn add_path(&mut self, dir: impl Into<String>, source_file: Option<String>) {
        let order = self
            .path_entries
            .iter()
            .filter(|e| e.origin.is_none())
            .count();
        let mut entry = PathEntry::new(dir, order);
        entry.source_file = source_file;
        self.path_entries.push(entry);
    }
}

fn rebase_entities<T, F>(
    pending: &[T],
    fresh: &[T],
    written: &HashSet<String>,
    target: &F,
) -> Vec<T>
where
    T: Placed + Clone,
    F: Fn(Option<&str>) -> String,
{
    let in_written = |entity: &T| entity.origin().map_or(false, |o| written.contains(&o.file));

    let mut out: Vec<T> = pending
        .iter()
        .filter(|e| !written.contains(&target(e.source_file())))
        .cloned()
        .map(|mut e| {
            if in_written(&e) {
                e.detach();
            }
            e
        })
        .collect();
    out.extend(fresh.iter().filter(|&e| in_written(e)).cloned());
    out
}

fn invalid(kind: &'static str, name: &str) -> Error {
    Error::InvalidName {
        kind,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn session_for(content: &str) -> (tempfile::TempDir, PathBuf, Session) {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        fs::write(&rc, content).unwrap();
        let session = Session::load(vec![rc.to_string_lossy().to_string()], None).unwrap();
        (dir, rc, session)
    }

    #[test]
    fn test_zero_edit_save_is_noop() {
        let (_dir, rc, mut session) = session_for("# hi\n\nalias ll='ls'\n");
        assert!(!session.is_dirty());
        let report = session.save().unwrap();
        assert!(report.is_empty());
        assert_eq!(fs::read_to_string(rc).unwrap(), "# hi\n\nalias ll='ls'\n");
    }

    #[test]
    fn test_save_updates_and_reloads() {
        let (_dir, rc, mut session) = session_for("alias ll='ls'\n# keep me\nalias gs='git status'\n");
        session.alias_mut("ll").unwrap().set_expansion("ls -la");
        session.remove_alias("gs");
        session.aliases.push(Alias::new("k", "kubectl"));

        let report = session.save().unwrap();
        assert_eq!(report.total_modifications(), 3);
        assert_eq!(
            fs::read_to_string(&rc).unwrap(),
            "alias ll='ls -la'\n# keep me\nalias k='kubectl'\n"
        );

        // Fresh snapshot with corrected line numbers
        assert_eq!(session.aliases[1].name, "k");
        assert_eq!(session.aliases[1].origin.as_ref().unwrap().line, 3);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_save_detects_external_change() {
        let (_dir, rc, mut session) = session_for("alias ll='ls'\n");
        fs::write(&rc, "alias ll='ls'\nalias x='y'\n").unwrap();

        session.alias_mut("ll").unwrap().set_expansion("ls -la");
        let err = session.save().unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        // Pending edit survives and file is untouched
        assert_eq!(session.aliases[0].expansion, "ls -la");
        assert_eq!(fs::read_to_string(&rc).unwrap(), "alias ll='ls'\nalias x='y'\n");
    }

    #[test]
    fn test_save_without_conflict_check_overwrites() {
        let (_dir, rc, session) = session_for("alias ll='ls'\n");
        let mut session = session.with_conflict_check(false);
        fs::write(&rc, "alias ll='ls'\nalias x='y'\n").unwrap();

        session.alias_mut("ll").unwrap().set_expansion("ls -la");
        session.save().unwrap();
        assert_eq!(fs::read_to_string(&rc).unwrap(), "alias ll='ls -la'\nalias x='y'\n");
    }

    #[test]
    fn test_save_rejects_invalid_names() {
        let (_dir, _rc, mut session) = session_for("");
        session.aliases.push(Alias::new("bad name", "x"));
        let err = session.save().unwrap_err();
        assert!(matches!(err, Error::InvalidName { kind: "alias", .. }));

        session.aliases.clear();
        session.env_vars.push(EnvVar::new("PATH", "/x"));
        assert!(matches!(
            session.save().unwrap_err(),
            Error::InvalidName { .. }
        ));
    }

    #[test]
    fn test_save_creates_missing_primary() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        let mut session = Session::load(vec![rc.to_string_lossy().to_string()], None).unwrap();
        session.add_path("/opt/bin", None);
        session.save().unwrap();

        assert_eq!(
            fs::read_to_string(&rc).unwrap(),
            "export PATH=\"/opt/bin:$PATH\"\n"
        );
        assert_eq!(session.path_entries.len(), 1);
        assert!(session.path_entries[0].origin.is_some());
    }

    #[test]
    fn test_function_replace_shifts_following_edits() {
        let content = "f() {\n  one\n  two\n  three\n}\nalias a='1'\n";
        let (_dir, rc, mut session) = session_for(content);
        session.function_mut("f").unwrap().body = "only".into();
        session.alias_mut("a").unwrap().set_expansion("2");
        session.save().unwrap();

        assert_eq!(
            fs::read_to_string(&rc).unwrap(),
            "f() {\n  only\n}\nalias a='2'\n"
        );
        assert_eq!(session.aliases[0].origin.as_ref().unwrap().line, 4);
    }

    fn two_file_session(
        main: &str,
        extra: &str,
    ) -> (tempfile::TempDir, PathBuf, PathBuf, Session) {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.zsh");
        let b = dir.path().join("b.zsh");
        fs::write(&a, main).unwrap();
        fs::write(&b, extra).unwrap();
        let session = Session::load(vec![a.to_string_lossy().to_string()], None).unwrap();
        (dir, a, b, session)
    }

    /// Writes the first file of a save, then fails like a read-only target.
    fn fail_second_write() -> impl FnMut(&Path, &str, Option<&BackupManager>) -> Result<PathBuf> {
        let mut calls = 0;
        move |path: &Path, content: &str, backup: Option<&BackupManager>| {
            calls += 1;
            if calls == 2 {
                let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
                return Err(Error::io(path, denied));
            }
            write_atomic(path, content, backup)
        }
    }

    #[test]
    fn test_partial_save_can_be_retried() {
        let (_dir, a, b, mut session) =
            two_file_session("source b.zsh\nalias x='1'\n", "alias y='1'\n");
        session.alias_mut("x").unwrap().set_expansion("2");
        session.alias_mut("y").unwrap().set_expansion("2");

        let err = session.save_with(fail_second_write()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(fs::read_to_string(&a).unwrap(), "source b.zsh\nalias x='2'\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "alias y='1'\n");

        // Only the unwritten edit is still pending
        let plan = session.plan();
        assert_eq!(plan.len(), 1);
        assert_eq!(session.alias_mut("y").unwrap().expansion, "2");

        session.save().unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "source b.zsh\nalias x='2'\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "alias y='2'\n");
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_partial_move_is_finished_on_retry() {
        let (_dir, a, b, mut session) =
            two_file_session("source b.zsh\nalias x='1'\n", "alias y='1'\n");
        let b_key = session.snapshot().files[1].clone();
        session.alias_mut("x").unwrap().source_file = Some(b_key);

        assert!(session.save_with(fail_second_write()).is_err());
        assert_eq!(fs::read_to_string(&a).unwrap(), "source b.zsh\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "alias y='1'\n");

        let x = session.aliases.iter().find(|a| a.name == "x").unwrap();
        assert!(x.origin.is_none());

        session.save().unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "source b.zsh\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "alias y='1'\nalias x='1'\n");
    }

    #[test]
    fn test_save_with_backup() {
        let (dir, _rc, session) = session_for("alias ll='ls'\n");
        let backups = dir.path().join("backups");
        let mut session = session.with_backup(BackupManager::with_dir(backups.clone(), 5));
        session.remove_alias("ll");
        session.save().unwrap();

        assert_eq!(fs::read_dir(&backups).unwrap().count(), 1);
    }
}
