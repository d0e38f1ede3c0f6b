// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Argument vector construction.
//!
//! ```text
//! build_branch_args   branch NAME BASE | branch -d NAME | branch -D NAME
//! build_push_args     push REMOTE LOCAL:REMOTE | push REMOTE --delete NAME
//!                     (delete NAME: named, else REMOTE_BRANCH, else LOCAL, else current)
//! build_checkout_args checkout NAME | checkout -b NAME BASE
//! build_remove_args   rm [-f] -- PATHS
//! ```
//!
//! Builders are pure: they never run git. Resolving the current branch for a
//! push is delegated to a caller-supplied closure.

use bon::Builder;

use crate::config::types::DEFAULT_BASE_BRANCH;
use crate::error::GitLibResult;

/// Options for [`build_branch_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct BranchOptions {
    /// Start point for a new branch. `master` when unset.
    #[builder(into)]
    pub base_branch: Option<String>,
    /// Delete the branch instead of creating it.
    #[builder(default)]
    pub delete: bool,
    /// Delete even if unmerged. Ignored unless `delete` is set.
    #[builder(default)]
    pub force: bool,
}

/// Build the `branch` invocation for `name`.
#[must_use]
pub fn build_branch_args(name: &str, options: &BranchOptions) -> Vec<String> {
    if options.delete {
        let flag = if options.force { "-D" } else { "-d" };
        return to_args(["branch", flag, name]);
    }
    let base = options
        .base_branch
        .as_deref()
        .unwrap_or(DEFAULT_BASE_BRANCH);
    to_args(["branch", name, base])
}

/// Remote branch deletion requested by a push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PushDelete {
    /// Normal push.
    #[default]
    Keep,
    /// Delete the branch the push names: the remote branch, else the local
    /// branch, else the current branch.
    Branch,
    /// Delete the named remote branch.
    Named(String),
}

impl From<bool> for PushDelete {
    fn from(delete: bool) -> Self {
        if delete { Self::Branch } else { Self::Keep }
    }
}

impl From<&str> for PushDelete {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for PushDelete {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Options for [`build_push_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct PushOptions {
    #[builder(default, into)]
    pub delete: PushDelete,
}

/// Build the `push` invocation.
///
/// `resolve_current` is called at most once, and only when the current branch
/// is actually needed: no local branch is given, and for a delete no remote
/// branch either. An empty name counts as absent.
///
/// # Errors
///
/// Propagates the error returned by `resolve_current`.
pub fn build_push_args<F>(
    remote: &str,
    local_branch: Option<&str>,
    remote_branch: Option<&str>,
    options: &PushOptions,
    resolve_current: F,
) -> GitLibResult<Vec<String>>
where
    F: FnOnce() -> GitLibResult<String>,
{
    let local_branch = local_branch.filter(|b| !b.is_empty());
    let remote_branch = remote_branch.filter(|b| !b.is_empty());

    match &options.delete {
        PushDelete::Named(name) if !name.is_empty() => {
            return Ok(to_args(["push", remote, "--delete", name.as_str()]));
        }
        PushDelete::Branch => {
            let name = match remote_branch.or(local_branch) {
                Some(name) => name.to_string(),
                None => resolve_current()?,
            };
            return Ok(to_args(["push", remote, "--delete", name.as_str()]));
        }
        PushDelete::Named(_) | PushDelete::Keep => {}
    }

    let local = match local_branch {
        Some(branch) => branch.to_string(),
        None => resolve_current()?,
    };
    let target = remote_branch.unwrap_or(local.as_str());
    let refspec = format!("{local}:{target}");
    Ok(to_args(["push", remote, refspec.as_str()]))
}

/// Options for [`build_checkout_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct CheckoutOptions {
    /// Create the branch from this start point before switching to it.
    #[builder(into)]
    pub new_branch: Option<String>,
}

/// Build the `checkout` invocation for `name`.
#[must_use]
pub fn build_checkout_args(name: &str, options: &CheckoutOptions) -> Vec<String> {
    match options.new_branch.as_deref() {
        Some(base) => to_args(["checkout", "-b", name, base]),
        None => to_args(["checkout", name]),
    }
}

/// Options for [`build_remove_args`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct RemoveOptions {
    /// Remove even if the file has local modifications.
    #[builder(default)]
    pub force: bool,
}

/// Build the `rm` invocation for `paths`.
#[must_use]
pub fn build_remove_args(paths: &[&str], options: &RemoveOptions) -> Vec<String> {
    let mut args = to_args(["rm"]);
    if options.force {
        args.push("-f".to_string());
    }
    args.push("--".to_string());
    args.extend(paths.iter().map(ToString::to_string));
    args
}

/// Owned argument vector from string slices.
pub(crate) fn to_args<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}
