// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for Git operations.
//!
//! Every test drives the real `git` binary in a temporary repository.

use git_lib::config::Config;
use git_lib::git::backend::{CommandRunner, ShellRunner};
use git_lib::git::cmd::{BranchOptions, CheckoutOptions, RemoveOptions};
use git_lib::git::discovery::{is_git_repo, work_tree_root};
use git_lib::git::ops::{GitLib, MergeOutcome};
use git_lib::git::status::StatusSets;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    git: GitLib,
}

impl TestRepo {
    /// Empty repository on `master`; the identity comes from the runner env.
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let runner = ShellRunner::new(dir.path())
            .with_env("GIT_AUTHOR_NAME", "Test")
            .with_env("GIT_AUTHOR_EMAIL", "test@test.com")
            .with_env("GIT_COMMITTER_NAME", "Test")
            .with_env("GIT_COMMITTER_EMAIL", "test@test.com");
        let git = GitLib::new(runner);
        let repo = Self { dir, git };
        repo.run(&["init", "-q"]);
        repo.run(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.run(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Repository with one commit containing `.gitignore`.
    fn with_commit() -> Self {
        let repo = Self::new();
        repo.write(".gitignore", "*.log\n");
        repo.commit_all("initial");
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let output = self.git.runner().run(&args).expect("failed to spawn git");
        assert!(
            output.success(),
            "git {args:?} failed: {}",
            output.stderr()
        );
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("failed to write file");
    }

    fn commit_all(&self, message: &str) {
        self.git.add(&["."]).expect("add");
        self.git.commit(message).expect("commit");
    }

    fn status(&self) -> StatusSets {
        self.git.status().expect("status")
    }

    /// Commit `edit_master` on master and `edit_fb` on a branch `fb` forked
    /// from it, then merge `fb` into master.
    fn diverge_and_merge(&self, edit_fb: impl FnOnce(&Self), edit_master: impl FnOnce(&Self)) {
        self.git
            .checkout("fb", &CheckoutOptions::builder().new_branch("master").build())
            .expect("checkout -b fb");
        edit_fb(self);
        self.commit_all("fb change");

        self.git
            .checkout("master", &CheckoutOptions::default())
            .expect("checkout master");
        edit_master(self);
        self.commit_all("master change");

        let outcome = self.git.merge("fb").expect("merge");
        assert_eq!(outcome, MergeOutcome::Conflicted);
    }
}

fn names(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

// =============================================================================
// status
// =============================================================================

#[test]
fn test_status_clean_repo() {
    let repo = TestRepo::with_commit();
    let status = repo.status();
    assert!(status.is_clean());
    assert!(status.added().is_empty());
    assert!(status.modified().is_empty());
    assert!(status.deleted().is_empty());
    assert!(status.unmerged().is_empty());
}

#[test]
fn test_status_three_new_files_are_added() {
    let repo = TestRepo::with_commit();
    repo.write("a", "a");
    repo.write("b", "b");
    repo.write("c", "c");
    repo.write("ignored.log", "noise");

    let status = repo.status();
    assert_eq!(names(status.added()), ["a", "b", "c"]);
    assert!(status.modified().is_empty());
    assert!(status.deleted().is_empty());
    assert!(status.unmerged().is_empty());

    // staging does not change the classification
    repo.git.add(&["a", "b", "c"]).expect("add");
    assert_eq!(repo.status(), status);
}

#[test]
fn test_status_modified_and_deleted() {
    let repo = TestRepo::with_commit();
    repo.write("keep", "1");
    repo.write("gone", "1");
    repo.commit_all("two files");

    repo.write("keep", "2");
    repo.git
        .remove(&["gone"], &RemoveOptions::default())
        .expect("rm");

    let status = repo.status();
    assert_eq!(names(status.modified()), ["keep"]);
    assert_eq!(names(status.deleted()), ["gone"]);
    assert!(status.added().is_empty());
}

#[test]
fn test_status_rename_reports_both_paths() {
    let repo = TestRepo::with_commit();
    repo.write("old", "content that is long enough to be detected as a rename\n");
    repo.commit_all("old");
    repo.run(&["mv", "old", "new"]);

    let status = repo.status();
    assert_eq!(names(status.added()), ["new"]);
    assert_eq!(names(status.deleted()), ["old"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_status_rejects_non_utf8_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let repo = TestRepo::with_commit();
    fs::write(repo.path().join(OsStr::from_bytes(b"caf\xe9")), "x").expect("write");

    let err = repo.git.status().expect_err("path is not UTF-8");
    assert!(err.is_parse());
}

#[test]
fn test_status_conflict_modify_modify() {
    let repo = TestRepo::with_commit();
    repo.write("a", "base\n");
    repo.commit_all("base");

    repo.diverge_and_merge(|r| r.write("a", "fb\n"), |r| r.write("a", "master\n"));

    let status = repo.status();
    assert_eq!(names(status.unmerged()), ["a"]);
    assert_eq!(names(status.modified()), ["a"]);
    assert!(status.added().is_empty());
    assert!(status.deleted().is_empty());
}

#[test]
fn test_status_conflict_add_add() {
    let repo = TestRepo::with_commit();

    repo.diverge_and_merge(|r| r.write("n", "fb\n"), |r| r.write("n", "master\n"));

    let status = repo.status();
    assert_eq!(names(status.unmerged()), ["n"]);
    assert_eq!(names(status.added()), ["n"]);
    assert!(status.modified().is_empty());
    assert!(status.deleted().is_empty());
}

#[test]
fn test_status_conflict_deleted_on_branch() {
    let repo = TestRepo::with_commit();
    repo.write("a", "base\n");
    repo.commit_all("base");

    repo.diverge_and_merge(
        |r| {
            r.git
                .remove(&["a"], &RemoveOptions::default())
                .expect("rm");
        },
        |r| r.write("a", "master\n"),
    );

    let status = repo.status();
    assert_eq!(names(status.unmerged()), ["a"]);
    assert_eq!(names(status.deleted()), ["a"]);
    assert!(status.modified().is_empty());
}

#[test]
fn test_status_conflict_deleted_on_master() {
    let repo = TestRepo::with_commit();
    repo.write("a", "base\n");
    repo.commit_all("base");

    repo.diverge_and_merge(
        |r| r.write("a", "fb\n"),
        |r| {
            r.git
                .remove(&["a"], &RemoveOptions::builder().force(true).build())
                .expect("rm");
        },
    );

    let status = repo.status();
    assert_eq!(names(status.unmerged()), ["a"]);
    assert_eq!(names(status.deleted()), ["a"]);
    assert!(status.modified().is_empty());
}

#[test]
fn test_merge_without_conflicts() {
    let repo = TestRepo::with_commit();
    repo.git
        .checkout("fb", &CheckoutOptions::builder().new_branch("master").build())
        .expect("checkout -b");
    repo.write("f", "fb\n");
    repo.commit_all("fb");
    repo.git
        .checkout("master", &CheckoutOptions::default())
        .expect("checkout");

    assert_eq!(repo.git.merge("fb").expect("merge"), MergeOutcome::Merged);
    assert!(repo.status().is_clean());
}

#[test]
fn test_merge_unknown_branch_fails() {
    let repo = TestRepo::with_commit();
    let err = repo.git.merge("no-such-branch").expect_err("bad ref");
    assert!(err.is_command_failed());
}

// =============================================================================
// branches
// =============================================================================

#[test]
fn test_branches_listing() {
    let repo = TestRepo::with_commit();
    repo.git
        .branch("bb", &BranchOptions::default())
        .expect("branch bb");
    repo.git
        .branch("ba", &BranchOptions::builder().base_branch("master").build())
        .expect("branch ba");
    repo.run(&["update-ref", "refs/remotes/origin/master", "HEAD"]);

    let listing = repo.git.branches().expect("branches");
    assert_eq!(
        listing.names(),
        ["ba", "bb", "master", "remotes/origin/master"]
    );
    assert_eq!(listing.current_name().expect("current"), "master");
    assert_eq!(listing.iter().filter(|b| b.is_current).count(), 1);
}

#[test]
fn test_branches_ignore_column_layout() {
    let repo = TestRepo::with_commit();
    repo.git
        .branch("ba", &BranchOptions::default())
        .expect("branch ba");
    repo.git
        .branch("bb", &BranchOptions::default())
        .expect("branch bb");
    repo.run(&["config", "column.ui", "always"]);
    repo.run(&["config", "color.ui", "always"]);

    let git = GitLib::open(repo.path(), &Config::default()).expect("open");
    let listing = git.branches().expect("branches");
    assert_eq!(listing.names(), ["ba", "bb", "master"]);
    assert_eq!(git.current_branch().expect("current"), "master");
}

#[test]
fn test_branch_delete() {
    let repo = TestRepo::with_commit();
    repo.git
        .branch("tmp", &BranchOptions::default())
        .expect("create");
    repo.git
        .branch("tmp", &BranchOptions::builder().delete(true).build())
        .expect("delete");
    assert!(!repo.git.branches().expect("branches").contains("tmp"));
}

#[test]
fn test_branch_existing_name_fails() {
    let repo = TestRepo::with_commit();
    let err = repo
        .git
        .branch("master", &BranchOptions::default())
        .expect_err("already exists");
    assert!(err.is_command_failed());
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_current_branch_follows_checkout() {
    let repo = TestRepo::with_commit();
    assert_eq!(repo.git.current_branch().expect("current"), "master");

    repo.git
        .checkout("topic", &CheckoutOptions::builder().new_branch("master").build())
        .expect("checkout");
    assert_eq!(repo.git.current_branch().expect("current"), "topic");
}

#[test]
fn test_current_branch_detached_head() {
    let repo = TestRepo::with_commit();
    repo.run(&["checkout", "-q", "--detach"]);
    let err = repo.git.current_branch().expect_err("detached");
    assert!(err.is_no_current_branch());
}

// =============================================================================
// open / discovery
// =============================================================================

#[test]
fn test_open_from_subdirectory() {
    let repo = TestRepo::with_commit();
    let sub = repo.path().join("src").join("nested");
    fs::create_dir_all(&sub).expect("mkdir");

    assert!(is_git_repo(&sub));
    let root = work_tree_root(&sub).expect("root");
    assert_eq!(
        root.canonicalize().expect("canonical root"),
        repo.path().canonicalize().expect("canonical temp dir")
    );

    let git = GitLib::open(&sub, &Config::default()).expect("open");
    assert_eq!(git.current_branch().expect("current"), "master");
    assert!(git.status().expect("status").is_clean());
}

#[test]
fn test_open_missing_path() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let err = GitLib::open(&dir.path().join("missing"), &Config::default())
        .expect_err("missing path");
    assert!(err.as_git().is_some());
}
