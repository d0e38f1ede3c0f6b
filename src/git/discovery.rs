// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Work tree discovery using gix (no subprocess).
//!
//! ```text
//! repo/
//!   .git/
//!   src/        work_tree_root("repo/src") == "repo"
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{GitError, GitLibResult, GixError};

/// Check if path is inside a git repository.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    gix::discover(path).is_ok()
}

/// Find the root of the work tree containing `path`.
///
/// # Errors
///
/// Returns `GitError::RepoNotFound` if `path` does not exist, a gix discovery
/// error if no repository encloses it, and `GixError::BareRepository` if the
/// repository has no work tree.
pub fn work_tree_root(path: &Path) -> GitLibResult<PathBuf> {
    if !path.exists() {
        return Err(GitError::RepoNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let repo = gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
    let workdir = repo
        .workdir()
        .ok_or(GitError::Gix(GixError::BareRepository))?;
    debug!(path = %path.display(), root = %workdir.display(), "discovered work tree");
    Ok(workdir.to_path_buf())
}
