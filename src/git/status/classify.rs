// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reduction of raw entries to [`StatusSets`].
//!
//! ```text
//! stages present        Conflict         secondary set
//! --------------------  ---------------  -------------
//!        ours theirs    BothAdded        added
//!        ours           AddedByUs        added
//!             theirs    AddedByThem      added
//! base        theirs    DeletedByUs      deleted
//! base   ours           DeletedByThem    deleted
//! base                  BothDeleted      deleted
//! base   ours theirs    BothModified     modified
//! ```

use bitflags::bitflags;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::{FileState, Stage, StatusEntry};
use crate::error::{GitError, GitLibResult};

bitflags! {
    /// Conflict stages present for one path.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StageSet: u8 {
        const BASE = 0x01;
        const OURS = 0x02;
        const THEIRS = 0x04;
    }
}

impl StageSet {
    /// Flag for a conflict stage; empty for stage 0.
    #[must_use]
    pub const fn of(stage: Stage) -> Self {
        match stage {
            Stage::Merged => Self::empty(),
            Stage::Base => Self::BASE,
            Stage::Ours => Self::OURS,
            Stage::Theirs => Self::THEIRS,
        }
    }
}

/// Kind of change for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Change {
    Added,
    Modified,
    Deleted,
}

impl Change {
    /// Change of a stage 0 entry, `None` if the path is identical everywhere.
    #[must_use]
    pub const fn of_merged(index: FileState, worktree: FileState) -> Option<Self> {
        match (index, worktree) {
            (FileState::Added, _) | (_, FileState::Added | FileState::Untracked) => {
                Some(Self::Added)
            }
            (FileState::Deleted, _) | (_, FileState::Deleted) => Some(Self::Deleted),
            (FileState::Modified, _) | (_, FileState::Modified) => Some(Self::Modified),
            _ => None,
        }
    }
}

/// Topology of an unresolved merge conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Conflict {
    BothAdded,
    AddedByUs,
    AddedByThem,
    DeletedByUs,
    DeletedByThem,
    BothDeleted,
    BothModified,
}

impl Conflict {
    /// Conflict described by the stages present, `None` if there are none.
    #[must_use]
    pub fn from_stages(stages: StageSet) -> Option<Self> {
        let base = stages.contains(StageSet::BASE);
        let ours = stages.contains(StageSet::OURS);
        let theirs = stages.contains(StageSet::THEIRS);
        match (base, ours, theirs) {
            (false, false, false) => None,
            (false, true, true) => Some(Self::BothAdded),
            (false, true, false) => Some(Self::AddedByUs),
            (false, false, true) => Some(Self::AddedByThem),
            (true, false, true) => Some(Self::DeletedByUs),
            (true, true, false) => Some(Self::DeletedByThem),
            (true, false, false) => Some(Self::BothDeleted),
            (true, true, true) => Some(Self::BothModified),
        }
    }

    /// The one secondary set a conflicted path belongs to.
    ///
    /// A side missing while the base exists is a deletion, whatever the other
    /// side did.
    #[must_use]
    pub const fn secondary(self) -> Change {
        match self {
            Self::BothAdded | Self::AddedByUs | Self::AddedByThem => Change::Added,
            Self::DeletedByUs | Self::DeletedByThem | Self::BothDeleted => Change::Deleted,
            Self::BothModified => Change::Modified,
        }
    }
}

/// Classification of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathState {
    Unchanged,
    Changed(Change),
    Conflicted(Conflict),
}

impl PathState {
    /// Classify all entries recorded for `path`.
    ///
    /// A path removed from the index but still on disk is reported twice at
    /// stage 0 (tracked deletion plus untracked file); the tracked entry wins.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Parse`] if the same stage is reported twice.
    pub fn from_entries<'a>(
        path: &str,
        entries: impl IntoIterator<Item = &'a StatusEntry>,
    ) -> GitLibResult<Self> {
        let mut stages = StageSet::empty();
        let mut tracked: Option<&StatusEntry> = None;
        let mut untracked = false;

        for entry in entries {
            let duplicate = if entry.stage.is_conflict() {
                let flag = StageSet::of(entry.stage);
                let seen = stages.contains(flag);
                stages.insert(flag);
                seen
            } else if entry.worktree_state == FileState::Untracked {
                std::mem::replace(&mut untracked, true)
            } else {
                tracked.replace(entry).is_some()
            };
            if duplicate {
                return Err(GitError::parse(
                    format!("duplicate stage {} entry", entry.stage.number()),
                    path,
                )
                .into());
            }
        }

        if let Some(conflict) = Conflict::from_stages(stages) {
            return Ok(Self::Conflicted(conflict));
        }
        let change = match tracked {
            Some(entry) => Change::of_merged(entry.index_state, entry.worktree_state),
            None if untracked => Some(Change::Added),
            None => None,
        };
        Ok(change.map_or(Self::Unchanged, Self::Changed))
    }
}

/// Paths grouped by kind of change, each set ordered by path.
///
/// A path outside `unmerged` is in at most one of `added`, `modified` and
/// `deleted`; a path in `unmerged` is in exactly one of them as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSets {
    added: BTreeSet<String>,
    modified: BTreeSet<String>,
    deleted: BTreeSet<String>,
    unmerged: BTreeSet<String>,
}

impl StatusSets {
    #[must_use]
    pub const fn added(&self) -> &BTreeSet<String> {
        &self.added
    }

    #[must_use]
    pub const fn modified(&self) -> &BTreeSet<String> {
        &self.modified
    }

    #[must_use]
    pub const fn deleted(&self) -> &BTreeSet<String> {
        &self.deleted
    }

    #[must_use]
    pub const fn unmerged(&self) -> &BTreeSet<String> {
        &self.unmerged
    }

    /// True when no path is in any set.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.added.is_empty()
            && self.modified.is_empty()
            && self.deleted.is_empty()
            && self.unmerged.is_empty()
    }

    /// Record `path` according to its state.
    pub fn insert(&mut self, path: &str, state: PathState) {
        let change = match state {
            PathState::Unchanged => return,
            PathState::Changed(change) => change,
            PathState::Conflicted(conflict) => {
                self.unmerged.insert(path.to_string());
                conflict.secondary()
            }
        };
        let set = match change {
            Change::Added => &mut self.added,
            Change::Modified => &mut self.modified,
            Change::Deleted => &mut self.deleted,
        };
        set.insert(path.to_string());
    }
}

/// Reduce raw status entries to [`StatusSets`].
///
/// Entries may arrive in any order and a conflicted path may have one entry
/// per stage.
///
/// # Errors
///
/// Returns [`GitError::Parse`] if a path reports the same stage twice.
pub fn classify(entries: &[StatusEntry]) -> GitLibResult<StatusSets> {
    let mut by_path: BTreeMap<&str, Vec<&StatusEntry>> = BTreeMap::new();
    for entry in entries {
        by_path.entry(entry.path.as_str()).or_default().push(entry);
    }

    let mut sets = StatusSets::default();
    for (path, group) in by_path {
        let state = PathState::from_entries(path, group)?;
        sets.insert(path, state);
    }

    debug!(
        added = sets.added.len(),
        modified = sets.modified.len(),
        deleted = sets.deleted.len(),
        unmerged = sets.unmerged.len(),
        "classified status"
    );
    Ok(sets)
}
