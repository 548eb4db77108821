//! # Writer Module
//!
//! Line-level edits against a file's line array.
//!
//! A save never rewrites a file from entities. It computes a batch of
//! [`Modification`]s against the lines captured at load time and applies
//! them with [`apply`], so everything the batch does not touch (comments,
//! blank lines, unrecognised shell code) survives byte for byte.
//!
//! ## Ordering
//!
//! Indices are 0-based and refer to the *original* array. [`apply`] sorts
//! the indexed operations by descending index before touching anything, so
//! a shift caused by an insert or delete never moves a line that is still
//! waiting to be edited. Appends run last, in input order.
//!
//! At the same index the order is insert, update, delete: an insert after
//! line `i` lands before `i` is replaced or removed, which keeps it anchored
//! to the right neighbour.

pub mod generate;

use std::cmp::Reverse;

use tracing::debug;

/// One line-addressed edit.
///
/// Content may contain `\n`; it is spliced in as several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// Replace line `index`
    UpdateLine(usize, String),
    /// Insert after line `index` (clamped to the end of the file)
    InsertAfter(usize, String),
    /// Remove line `index`
    DeleteLine(usize),
    /// Add at the end of the file
    AppendLine(String),
}

impl Modification {
    /// Line index the operation addresses; `None` for appends.
    pub fn index(&self) -> Option<usize> {
        match self {
            Modification::UpdateLine(i, _)
            | Modification::InsertAfter(i, _)
            | Modification::DeleteLine(i) => Some(*i),
            Modification::AppendLine(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Modification::InsertAfter(..) => 0,
            Modification::UpdateLine(..) => 1,
            Modification::DeleteLine(_) => 2,
            Modification::AppendLine(_) => 3,
        }
    }
}

impl std::fmt::Display for Modification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modification::UpdateLine(i, content) => write!(f, "~ {:>4} | {}", i + 1, content),
            Modification::InsertAfter(i, content) => write!(f, "+ {:>4} | {}", i + 2, content),
            Modification::DeleteLine(i) => write!(f, "- {:>4}", i + 1),
            Modification::AppendLine(content) => write!(f, "+  end | {}", content),
        }
    }
}

/// Apply a batch of modifications to `lines`, returning the new array.
///
/// The outcome does not depend on the order of `modifications`, except that
/// several inserts after the same line and several appends keep their
/// relative input order. Updates and deletes past the end are ignored.
pub fn apply(modifications: &[Modification], lines: &[String]) -> Vec<String> {
    let mut result = lines.to_vec();

    let mut indexed: Vec<(usize, &Modification)> = modifications
        .iter()
        .enumerate()
        .filter(|(_, m)| m.index().is_some())
        .collect();

    // Reverse input position for inserts: the one applied last ends up first
    indexed.sort_by_key(|(pos, m)| {
        let tiebreak = match m {
            Modification::InsertAfter(..) => Reverse(*pos),
            _ => Reverse(usize::MAX - *pos),
        };
        (Reverse(m.index().unwrap_or(0)), m.rank(), tiebreak)
    });

    for (_, modification) in indexed {
        match modification {
            Modification::UpdateLine(i, content) => {
                if *i < result.len() {
                    result.splice(*i..=*i, split_content(content));
                } else {
                    debug!(index = i, len = result.len(), "update past end ignored");
                }
            }
            Modification::InsertAfter(i, content) => {
                let at = (*i + 1).min(result.len());
                result.splice(at..at, split_content(content));
            }
            Modification::DeleteLine(i) => {
                if *i < result.len() {
                    result.remove(*i);
                } else {
                    debug!(index = i, len = result.len(), "delete past end ignored");
                }
            }
            Modification::AppendLine(_) => {}
        }
    }

    for modification in modifications {
        if let Modification::AppendLine(content) = modification {
            result.extend(split_content(content));
        }
    }

    result
}

fn split_content(content: &str) -> Vec<String> {
    content.split('\n').map(String::from).collect()
}
