//! Snapshot vs. current-state diff
//!
//! Every entity is matched to its snapshot counterpart by [`Origin`]. A
//! matched entity that changed becomes an update at the snapshot position,
//! an unmatched snapshot entity becomes a delete, and an entity without a
//! usable origin becomes an append to its target file.
//!
//! An entity whose `source_file` no longer equals its origin's file is
//! treated as moved: delete at the origin, append to the new file.

use std::collections::{BTreeMap, HashSet};

use crate::model::{Alias, EnvVar, Origin, ParsedConfig, PathEntry, ShellFunction};
use crate::utils::path::file_key;
use crate::writer::generate::{
    alias_line, described_function_block, description_line, export_line, function_block,
    keychain_export_line, path_line,
};
use crate::writer::Modification;

/// Modification batches keyed by file.
pub type Plan = BTreeMap<String, Vec<Modification>>;

/// Provenance shared by every entity kind.
pub(crate) trait Placed {
    fn origin(&self) -> Option<&Origin>;
    fn source_file(&self) -> Option<&str>;
    /// Forget the snapshot slot, turning the entity into an append.
    fn detach(&mut self);
}

macro_rules! impl_placed {
    ($($ty:ty),*) => {
        $(
            impl Placed for $ty {
                fn origin(&self) -> Option<&Origin> {
                    self.origin.as_ref()
                }

                fn source_file(&self) -> Option<&str> {
                    self.source_file.as_deref()
                }

                fn detach(&mut self) {
                    self.origin = None;
                }
            }
        )*
    };
}

impl_placed!(Alias, ShellFunction, PathEntry, EnvVar);

/// Entities that occupy one line (aliases, env vars).
trait LineEntity: Placed {
    /// Same semantic content as `other`, ignoring provenance
    fn same_content(&self, other: &Self) -> bool;
    fn render(&self) -> String;
}

/// File an entity with `source_file` is written to.
pub(crate) fn target_file(
    snapshot: &ParsedConfig,
    primary: &str,
    source_file: Option<&str>,
) -> String {
    match source_file {
        Some(file) if snapshot.raw_lines.contains_key(file) => file.to_string(),
        Some(file) => file_key(file),
        None => primary.to_string(),
    }
}

impl LineEntity for Alias {
    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name && self.expansion == other.expansion && self.enabled == other.enabled
    }

    fn render(&self) -> String {
        alias_line(&self.name, &self.expansion, self.enabled)
    }
}

impl LineEntity for EnvVar {
    fn same_content(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }

    fn render(&self) -> String {
        match self.keychain_service() {
            Some(service) => keychain_export_line(&self.key, &service),
            None => export_line(&self.key, &self.value),
        }
    }
}

/// Builds the per-file batches.
pub(crate) struct Planner<'a> {
    snapshot: &'a ParsedConfig,
    primary: &'a str,
    plan: Plan,
}

impl<'a> Planner<'a> {
    pub fn new(snapshot: &'a ParsedConfig, primary: &'a str) -> Self {
        Self {
            snapshot,
            primary,
            plan: Plan::new(),
        }
    }

    pub fn finish(self) -> Plan {
        self.plan
    }

    fn push(&mut self, file: &str, modification: Modification) {
        self.plan
            .entry(file.to_string())
            .or_default()
            .push(modification);
    }

    fn target_file(&self, source_file: Option<&str>) -> String {
        target_file(self.snapshot, self.primary, source_file)
    }

    /// Origin of `entity` if it still addresses its snapshot slot.
    fn live_origin<'e>(&self, origin: Option<&'e Origin>, source_file: Option<&str>) -> Option<&'e Origin> {
        let origin = origin?;
        let target = self.target_file(source_file);
        (target == origin.file).then_some(origin)
    }

    fn diff_lines<T: LineEntity>(&mut self, snapshot: &[T], current: &[T]) {
        let by_origin: BTreeMap<&Origin, &T> = snapshot
            .iter()
            .filter_map(|e| e.origin().map(|o| (o, e)))
            .collect();
        let mut matched: HashSet<&Origin> = HashSet::new();

        for entity in current {
            let slot = self
                .live_origin(entity.origin(), entity.source_file())
                .and_then(|o| by_origin.get_key_value(o))
                .filter(|(o, _)| !matched.contains(*o));

            match slot {
                Some((&origin, &before)) => {
                    matched.insert(origin);
                    if !entity.same_content(before) {
                        self.push(
                            &origin.file,
                            Modification::UpdateLine(origin.start_index(), entity.render()),
                        );
                    }
                }
                None => {
                    let file = self.target_file(entity.source_file());
                    self.push(&file, Modification::AppendLine(entity.render()));
                }
            }
        }

        for (origin, _) in by_origin {
            if !matched.contains(origin) {
                self.push(&origin.file, Modification::DeleteLine(origin.start_index()));
            }
        }
    }

    pub fn aliases(&mut self, current: &[Alias]) {
        let snapshot = self.snapshot;
        self.diff_lines(&snapshot.aliases, current);
    }

    pub fn env_vars(&mut self, current: &[EnvVar]) {
        let snapshot = self.snapshot;
        self.diff_lines(&snapshot.env_vars, current);
    }

    /// Functions span a range and may own a description comment on the line
    /// above the opening line.
    pub fn functions(&mut self, current: &[ShellFunction]) {
        let snapshot = self.snapshot;
        let by_origin: BTreeMap<&Origin, &ShellFunction> = snapshot
            .functions
            .iter()
            .filter_map(|f| f.origin.as_ref().map(|o| (o, f)))
            .collect();
        let mut matched: HashSet<&Origin> = HashSet::new();

        for func in current {
            let slot = self
                .live_origin(func.origin.as_ref(), func.source_file.as_deref())
                .and_then(|o| by_origin.get_key_value(o))
                .filter(|(o, _)| !matched.contains(*o));

            match slot {
                Some((&origin, &before)) => {
                    matched.insert(origin);
                    self.update_function(origin, before, func);
                }
                None => {
                    let file = self.target_file(func.source_file.as_deref());
                    self.push(
                        &file,
                        Modification::AppendLine(described_function_block(
                            &func.name,
                            &func.body,
                            &func.description,
                        )),
                    );
                }
            }
        }

        for (origin, before) in by_origin {
            if !matched.contains(origin) {
                self.delete_range(origin);
                if has_description(before) {
                    self.push(
                        &origin.file,
                        Modification::DeleteLine(origin.start_index() - 1),
                    );
                }
            }
        }
    }

    fn update_function(&mut self, origin: &Origin, before: &ShellFunction, after: &ShellFunction) {
        let code_changed = before.name != after.name || before.body != after.body;
        let description_changed = before.description.trim() != after.description.trim();
        if !code_changed && !description_changed {
            return;
        }

        if has_description(before) {
            let desc_index = origin.start_index() - 1;
            if description_changed {
                let modification = if after.description.trim().is_empty() {
                    Modification::DeleteLine(desc_index)
                } else {
                    Modification::UpdateLine(desc_index, description_line(&after.description))
                };
                self.push(&origin.file, modification);
            }
            if code_changed {
                self.replace_range(origin, function_block(&after.name, &after.body));
            }
        } else {
            // A new description goes in front of the regenerated block
            self.replace_range(
                origin,
                described_function_block(&after.name, &after.body, &after.description),
            );
        }
    }

    fn replace_range(&mut self, origin: &Origin, block: String) {
        self.push(&origin.file, Modification::UpdateLine(origin.start_index(), block));
        for index in origin.start_index() + 1..=origin.end_index() {
            self.push(&origin.file, Modification::DeleteLine(index));
        }
    }

    fn delete_range(&mut self, origin: &Origin) {
        for index in origin.start_index()..=origin.end_index() {
            self.push(&origin.file, Modification::DeleteLine(index));
        }
    }

    /// Entries sharing an origin line form one PATH statement, regenerated
    /// as a whole when its directory list changes.
    pub fn path_entries(&mut self, current: &[PathEntry]) {
        let snapshot = self.snapshot;

        let mut statements: BTreeMap<&Origin, Vec<&PathEntry>> = BTreeMap::new();
        for entry in &snapshot.path_entries {
            if let Some(origin) = entry.origin.as_ref() {
                statements.entry(origin).or_default().push(entry);
            }
        }

        let mut kept: BTreeMap<&Origin, Vec<&PathEntry>> = BTreeMap::new();
        let mut appended: BTreeMap<String, Vec<&PathEntry>> = BTreeMap::new();
        for entry in current {
            let live = self
                .live_origin(entry.origin.as_ref(), entry.source_file.as_deref())
                .filter(|o| statements.contains_key(*o));
            match live {
                Some(origin) => kept.entry(origin).or_default().push(entry),
                None => {
                    let file = self.target_file(entry.source_file.as_deref());
                    appended.entry(file).or_default().push(entry);
                }
            }
        }

        for (origin, before) in &statements {
            let before_dirs = ordered_dirs(before);
            let after_dirs = kept.get(origin).map(|e| ordered_dirs(e)).unwrap_or_default();

            if after_dirs.is_empty() {
                self.push(&origin.file, Modification::DeleteLine(origin.start_index()));
            } else if after_dirs != before_dirs {
                self.push(
                    &origin.file,
                    Modification::UpdateLine(origin.start_index(), path_line(&after_dirs)),
                );
            }
        }

        for (file, entries) in appended {
            self.push(&file, Modification::AppendLine(path_line(&ordered_dirs(&entries))));
        }
    }
}

fn has_description(func: &ShellFunction) -> bool {
    !func.description.trim().is_empty()
        && func.origin.as_ref().is_some_and(|o| o.start_index() > 0)
}

fn ordered_dirs(entries: &[&PathEntry]) -> Vec<String> {
    let mut sorted: Vec<&PathEntry> = entries.to_vec();
    sorted.sort_by_key(|e| e.order);
    sorted.into_iter().map(|e| e.path.clone()).collect()
}
