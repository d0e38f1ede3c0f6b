// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-tree and index status.
//!
//! ```text
//! git status --porcelain=v2 -z --untracked-files=all
//!        |
//!        v
//!  parse_porcelain_v2()      one StatusEntry per path per stage
//!        |
//!        v
//!  classify()                group by path -> PathState -> StatusSets
//!                            { added, modified, deleted, unmerged }
//! ```
//!
//! Record kinds understood by the parser (`-z`, NUL terminated):
//!
//! ```text
//! 1 XY sub mH mI mW hH hI path                 ordinary change   stage 0
//! 2 XY sub mH mI mW hH hI Xscore path \0 orig  rename / copy     stage 0
//! u XY sub m1 m2 m3 mW h1 h2 h3 path           unmerged          stages 1-3
//! ? path                                       untracked         stage 0
//! ! path, # header                             skipped
//! ```

mod classify;

pub use classify::{Change, Conflict, PathState, StageSet, StatusSets, classify};

use crate::error::{GitError, GitLibResult};
use serde::Serialize;

/// Arguments that produce the output [`parse_porcelain_v2`] expects.
pub const STATUS_ARGS: [&str; 4] = [
    "status",
    "--porcelain=v2",
    "-z",
    "--untracked-files=all",
];

/// Mode reported for a stage or worktree file that does not exist.
const ABSENT_MODE: &str = "000000";

/// Index slot of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Normal entry, no conflict.
    Merged = 0,
    /// Common ancestor of a conflicted merge.
    Base = 1,
    /// Our side (HEAD).
    Ours = 2,
    /// Their side (`MERGE_HEAD`).
    Theirs = 3,
}

impl Stage {
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Stages 1-3 only exist while a merge is unresolved.
    #[must_use]
    pub const fn is_conflict(self) -> bool {
        !matches!(self, Self::Merged)
    }
}

/// State of a path on one side of a comparison (index vs HEAD, worktree vs index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FileState {
    #[default]
    Unchanged,
    Added,
    Modified,
    Deleted,
    Untracked,
}

impl FileState {
    /// Decode one character of a porcelain v2 `XY` field.
    ///
    /// Renamed and copied paths count as added; type changes as modified.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '.' => Some(Self::Unchanged),
            'M' | 'T' => Some(Self::Modified),
            'A' | 'R' | 'C' => Some(Self::Added),
            'D' => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// One raw status record for one stage of one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Repository-relative path.
    pub path: String,
    pub stage: Stage,
    /// Index compared to HEAD.
    pub index_state: FileState,
    /// Worktree compared to index.
    pub worktree_state: FileState,
}

impl StatusEntry {
    /// Stage 0 entry.
    pub fn merged(path: impl Into<String>, index_state: FileState, worktree_state: FileState) -> Self {
        Self {
            path: path.into(),
            stage: Stage::Merged,
            index_state,
            worktree_state,
        }
    }

    /// Untracked worktree file.
    pub fn untracked(path: impl Into<String>) -> Self {
        Self::merged(path, FileState::Unchanged, FileState::Untracked)
    }

    /// Entry for one conflict stage. The index state of a conflict stage is
    /// not tracked separately and is reported as unchanged.
    pub fn conflict(path: impl Into<String>, stage: Stage, worktree_state: FileState) -> Self {
        Self {
            path: path.into(),
            stage,
            index_state: FileState::Unchanged,
            worktree_state,
        }
    }
}

/// Parse `git status --porcelain=v2 -z` output into raw entries.
///
/// Paths are taken verbatim. `ShellRunner` refuses stdout that is not UTF-8,
/// so a path that is not valid UTF-8 surfaces as a parse error rather than as
/// a different path.
///
/// # Errors
///
/// Returns [`GitError::Parse`] for any record that does not match one of the
/// known record shapes. Nothing is skipped silently except ignored files and
/// headers.
pub fn parse_porcelain_v2(raw: &str) -> GitLibResult<Vec<StatusEntry>> {
    let mut entries = Vec::new();
    let mut records = raw.split('\0');

    while let Some(record) = records.next() {
        if record.is_empty() {
            continue;
        }
        let (kind, rest) = record
            .split_once(' ')
            .ok_or_else(|| GitError::parse("record has no fields", record))?;

        match kind {
            "1" => entries.push(parse_ordinary(rest, record)?),
            "2" => {
                let original = records
                    .next()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| GitError::parse("rename without original path", record))?;
                parse_renamed(rest, original, record, &mut entries)?;
            }
            "u" => parse_unmerged(rest, record, &mut entries)?,
            "?" => {
                if rest.is_empty() {
                    return Err(GitError::parse("untracked record without path", record).into());
                }
                entries.push(StatusEntry::untracked(rest));
            }
            "!" | "#" => {}
            _ => return Err(GitError::parse("unknown record kind", record).into()),
        }
    }

    Ok(entries)
}

/// Split `rest` into exactly `count` space-separated fields; the last one
/// (the path) may itself contain spaces.
fn fields<'a>(rest: &'a str, count: usize, record: &str) -> GitLibResult<Vec<&'a str>> {
    let parts: Vec<&str> = rest.splitn(count, ' ').collect();
    if parts.len() != count || parts.iter().any(|p| p.is_empty()) {
        return Err(GitError::parse(format!("expected {count} fields"), record).into());
    }
    Ok(parts)
}

fn xy_states(xy: &str, record: &str) -> GitLibResult<(FileState, FileState)> {
    let mut chars = xy.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(x), Some(y), None) => match (FileState::from_code(x), FileState::from_code(y)) {
            (Some(index), Some(worktree)) => Ok((index, worktree)),
            _ => Err(GitError::parse(format!("unknown status code {xy:?}"), record).into()),
        },
        _ => Err(GitError::parse(format!("malformed XY field {xy:?}"), record).into()),
    }
}

fn parse_ordinary(rest: &str, record: &str) -> GitLibResult<StatusEntry> {
    let parts = fields(rest, 8, record)?;
    let (index, worktree) = xy_states(parts[0], record)?;
    Ok(StatusEntry::merged(parts[7], index, worktree))
}

fn parse_renamed(
    rest: &str,
    original: &str,
    record: &str,
    entries: &mut Vec<StatusEntry>,
) -> GitLibResult<()> {
    let parts = fields(rest, 9, record)?;
    let (index, worktree) = xy_states(parts[0], record)?;
    let score = parts[7];
    entries.push(StatusEntry::merged(parts[8], index, worktree));

    match score.chars().next() {
        // The source of a rename is gone from the side that reported the rename.
        Some('R') => {
            let mut xy = parts[0].chars();
            let gone = |code: Option<char>| {
                if code == Some('R') {
                    FileState::Deleted
                } else {
                    FileState::Unchanged
                }
            };
            let (index_gone, worktree_gone) = (gone(xy.next()), gone(xy.next()));
            entries.push(StatusEntry::merged(original, index_gone, worktree_gone));
        }
        Some('C') => {}
        _ => return Err(GitError::parse(format!("unknown score {score:?}"), record).into()),
    }
    Ok(())
}

fn parse_unmerged(rest: &str, record: &str, entries: &mut Vec<StatusEntry>) -> GitLibResult<()> {
    let parts = fields(rest, 10, record)?;
    if parts[0].len() != 2 || !parts[0].chars().all(|c| matches!(c, 'A' | 'D' | 'U')) {
        return Err(GitError::parse(format!("unknown unmerged code {:?}", parts[0]), record).into());
    }

    let path = parts[9];
    let worktree = if parts[5] == ABSENT_MODE {
        FileState::Deleted
    } else {
        FileState::Modified
    };

    let before = entries.len();
    for (mode, stage) in [
        (parts[2], Stage::Base),
        (parts[3], Stage::Ours),
        (parts[4], Stage::Theirs),
    ] {
        if mode != ABSENT_MODE {
            entries.push(StatusEntry::conflict(path, stage, worktree));
        }
    }
    if entries.len() == before {
        return Err(GitError::parse("unmerged record without stages", record).into());
    }
    Ok(())
}
