// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository facade.
//!
//! ```text
//! status        status --porcelain=v2 -z    -> StatusSets
//! branch        branch NAME BASE / -d / -D
//! branches      branch -a --no-color --no-column -> BranchListing
//! push          push REMOTE ...             (+ branch listing if needed)
//! add/rm/commit/checkout/merge/fetch
//! ```
//!
//! Every operation runs git once, except `push` when it has to look up the
//! current branch first. A non-zero exit becomes `GitError::CommandFailed`;
//! only `merge` looks at the output first, so that conflicts are reported as
//! [`MergeOutcome::Conflicted`].

use std::path::Path;
use tracing::{debug, error, info, warn};

use super::backend::{CommandOutput, CommandRunner, ShellRunner};
use super::branches::{BRANCH_LIST_ARGS, BranchListing};
use super::cmd::{
    BranchOptions, CheckoutOptions, PushOptions, RemoveOptions, build_branch_args,
    build_checkout_args, build_push_args, build_remove_args, to_args,
};
use super::discovery::work_tree_root;
use super::status::{STATUS_ARGS, StatusEntry, StatusSets, classify, parse_porcelain_v2};
use crate::config::Config;
use crate::config::types::GitSettings;
use crate::error::{GitLibError, GitLibResult};

/// Markers git prints when a merge stops on conflicts.
const CONFLICT_MARKERS: [&str; 2] = ["CONFLICT (", "Automatic merge failed"];

/// Result of [`GitLib::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Merge completed (fast-forward, merge commit, or already up to date).
    Merged,
    /// Merge stopped with unresolved conflicts; inspect [`GitLib::status`].
    Conflicted,
}

/// Client for one git work tree.
#[derive(Debug, Clone)]
pub struct GitLib<R = ShellRunner> {
    runner: R,
    settings: GitSettings,
}

impl GitLib<ShellRunner> {
    /// Open the work tree containing `path`, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if no work tree encloses `path` or the configured git
    /// executable cannot be found.
    pub fn open(path: &Path, config: &Config) -> GitLibResult<Self> {
        let root = work_tree_root(path)?;
        let runner = ShellRunner::from_settings(&config.git, root)?;
        info!(root = %runner.cwd().display(), "opened repository");
        Ok(Self::with_settings(runner, config.git.clone()))
    }
}

impl<R: CommandRunner> GitLib<R> {
    /// Client with default settings.
    pub fn new(runner: R) -> Self {
        Self::with_settings(runner, GitSettings::default())
    }

    pub const fn with_settings(runner: R, settings: GitSettings) -> Self {
        Self { runner, settings }
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    pub const fn settings(&self) -> &GitSettings {
        &self.settings
    }

    /// Working-tree and index status, with conflicts resolved per path.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails and `Parse` if its output is malformed.
    pub fn status(&self) -> GitLibResult<StatusSets> {
        classify(&self.status_entries()?)
    }

    /// Raw per-stage status records.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails and `Parse` if its output is malformed.
    pub fn status_entries(&self) -> GitLibResult<Vec<StatusEntry>> {
        let output = self.run_checked(&to_args(STATUS_ARGS))?;
        let entries = parse_porcelain_v2(output.stdout())?;
        debug!(entries = entries.len(), "parsed status");
        Ok(entries)
    }

    /// Create or delete a branch.
    ///
    /// A new branch without an explicit base starts from
    /// `GitSettings::default_base_branch`.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git rejects the operation.
    pub fn branch(&self, name: &str, options: &BranchOptions) -> GitLibResult<()> {
        let args = if options.delete || options.base_branch.is_some() {
            build_branch_args(name, options)
        } else {
            let options = BranchOptions {
                base_branch: Some(self.settings.default_base_branch.clone()),
                ..options.clone()
            };
            build_branch_args(name, &options)
        };
        self.run_checked(&args)?;
        Ok(())
    }

    /// All local and remote-tracking branches, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails and `Parse` if its output is malformed.
    pub fn branches(&self) -> GitLibResult<BranchListing> {
        let output = self.run_checked(&to_args(BRANCH_LIST_ARGS))?;
        BranchListing::parse(output.stdout())
    }

    /// Name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentBranch` on a detached HEAD.
    pub fn current_branch(&self) -> GitLibResult<String> {
        Ok(self.branches()?.current_name()?.to_string())
    }

    /// Push a branch, or delete a remote branch.
    ///
    /// Without `local_branch` the current branch is pushed; without
    /// `remote_branch` the remote side uses the local name.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentBranch` if the current branch is needed but HEAD is
    /// detached, and `CommandFailed` if the push fails.
    pub fn push(
        &self,
        remote: &str,
        local_branch: Option<&str>,
        remote_branch: Option<&str>,
        options: &PushOptions,
    ) -> GitLibResult<()> {
        let args = build_push_args(remote, local_branch, remote_branch, options, || {
            self.current_branch()
        })?;
        self.run_checked(&args)?;
        Ok(())
    }

    /// Stage `paths`.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails.
    pub fn add(&self, paths: &[&str]) -> GitLibResult<()> {
        let mut args = to_args(["add", "--"]);
        args.extend(paths.iter().map(ToString::to_string));
        self.run_checked(&args)?;
        Ok(())
    }

    /// Remove `paths` from the index and work tree.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails.
    pub fn remove(&self, paths: &[&str], options: &RemoveOptions) -> GitLibResult<()> {
        self.run_checked(&build_remove_args(paths, options))?;
        Ok(())
    }

    /// Commit the index.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails (including nothing to commit).
    pub fn commit(&self, message: &str) -> GitLibResult<()> {
        self.run_checked(&to_args(["commit", "-m", message]))?;
        Ok(())
    }

    /// Switch branches, optionally creating the branch first.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails.
    pub fn checkout(&self, name: &str, options: &CheckoutOptions) -> GitLibResult<()> {
        self.run_checked(&build_checkout_args(name, options))?;
        Ok(())
    }

    /// Merge `branch` into the current branch.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` for any failure other than merge conflicts.
    pub fn merge(&self, branch: &str) -> GitLibResult<MergeOutcome> {
        let args = to_args(["merge", "--no-edit", branch]);
        let output = self.runner.run(&args)?;
        if output.success() {
            return Ok(MergeOutcome::Merged);
        }
        if has_conflicts(&output) {
            warn!(branch, "merge stopped with conflicts");
            return Ok(MergeOutcome::Conflicted);
        }
        Err(failure(&args, &output))
    }

    /// Fetch from `remote`.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if git fails.
    pub fn fetch(&self, remote: &str) -> GitLibResult<()> {
        self.run_checked(&to_args(["fetch", remote]))?;
        Ok(())
    }

    fn run_checked(&self, args: &[String]) -> GitLibResult<CommandOutput> {
        let output = self.runner.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(failure(args, &output))
        }
    }
}

fn failure(args: &[String], output: &CommandOutput) -> GitLibError {
    let err = output.to_error(args);
    error!(exit_code = output.exit_code(), "{err}");
    err.into()
}

fn has_conflicts(output: &CommandOutput) -> bool {
    [output.stdout(), output.stderr()]
        .iter()
        .any(|text| CONFLICT_MARKERS.iter().any(|marker| text.contains(marker)))
}
