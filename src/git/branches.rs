// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch listing parser.
//!
//! ```text
//! git branch -a --no-color --no-column
//!
//!   ba                                      -> ba
//! * master                                  -> master (current)
//! + feature                                 -> feature (checked out elsewhere)
//!   remotes/origin/HEAD -> origin/master    -> remotes/origin/HEAD
//! * (HEAD detached at 1a2b3c4)              -> skipped, not a branch
//! ```
//!
//! Output is sorted by name; git's own order is not relied upon. Colors and
//! columns are switched off explicitly so `color.ui` and `column.ui` settings
//! cannot change the line format.

use serde::Serialize;

use crate::error::{GitError, GitLibResult};

/// Arguments that produce the output [`BranchListing::parse`] expects.
pub const BRANCH_LIST_ARGS: [&str; 4] = ["branch", "-a", "--no-color", "--no-column"];

/// A branch and whether it is checked out in this work tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BranchDescriptor {
    pub name: String,
    pub is_current: bool,
}

/// Branches sorted by name, at most one of them current.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchListing {
    branches: Vec<BranchDescriptor>,
}

impl BranchListing {
    /// Parse `git branch -a --no-color --no-column` output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Parse`] for a line without a known marker column, or
    /// if more than one branch is marked current.
    pub fn parse(raw: &str) -> GitLibResult<Self> {
        let mut branches = Vec::new();
        for line in raw.lines() {
            if let Some(branch) = parse_line(line)? {
                branches.push(branch);
            }
        }

        if branches.iter().filter(|b| b.is_current).count() > 1 {
            return Err(GitError::parse("more than one current branch", raw).into());
        }

        branches.sort();
        Ok(Self { branches })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BranchDescriptor> {
        self.branches.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Branch names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b.name == name)
    }

    #[must_use]
    pub fn current(&self) -> Option<&BranchDescriptor> {
        self.branches.iter().find(|b| b.is_current)
    }

    /// Name of the current branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoCurrentBranch`] if no branch is current (detached HEAD).
    pub fn current_name(&self) -> GitLibResult<&str> {
        self.current()
            .map(|b| b.name.as_str())
            .ok_or_else(|| GitError::NoCurrentBranch.into())
    }
}

impl<'a> IntoIterator for &'a BranchListing {
    type Item = &'a BranchDescriptor;
    type IntoIter = std::slice::Iter<'a, BranchDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.iter()
    }
}

impl IntoIterator for BranchListing {
    type Item = BranchDescriptor;
    type IntoIter = std::vec::IntoIter<BranchDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.into_iter()
    }
}

/// Name of the branch marked current in a branch listing.
///
/// # Errors
///
/// Returns [`GitError::Parse`] for malformed output and
/// [`GitError::NoCurrentBranch`] if nothing is marked current.
pub fn current_branch_name(raw: &str) -> GitLibResult<String> {
    BranchListing::parse(raw)?
        .current_name()
        .map(ToString::to_string)
}

fn parse_line(line: &str) -> GitLibResult<Option<BranchDescriptor>> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(None);
    }

    let (is_current, rest) = if let Some(rest) = line.strip_prefix("* ") {
        (true, rest)
    } else if let Some(rest) = line
        .strip_prefix("  ")
        .or_else(|| line.strip_prefix("+ "))
    {
        (false, rest)
    } else {
        return Err(GitError::parse("unexpected branch marker", line).into());
    };

    let name = rest.trim();
    // "(HEAD detached at ...)", "(no branch, rebasing ...)"
    if name.starts_with('(') {
        return Ok(None);
    }
    let name = name.split_once(" -> ").map_or(name, |(symref, _)| symref);
    if name.is_empty() {
        return Err(GitError::parse("branch line without name", line).into());
    }

    Ok(Some(BranchDescriptor {
        name: name.to_string(),
        is_current,
    }))
}
