// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        GitLibError (16 bytes)
//!               |
//!     +---------+---------+
//!     |         |         |
//!     v         v         v
//!    Git     Config    Process
//!    Box      Box        Box
//!
//! Sub-errors (unboxed internally):
//!   Git      Parse, NoCurrentBranch, CommandFailed, RepoNotFound, Gix
//!   Config   InvalidValue, NotFound
//!   Process  ExecutableNotFound, SpawnFailed
//!
//! All variants boxed => GitLibError stays two words wide.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GitLibError`].
pub type GitLibResult<T> = std::result::Result<T, GitLibError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum GitLibError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process setup or spawn error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),
}

impl GitLibError {
    /// Returns the git error if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if no branch was marked current.
    #[must_use]
    pub fn is_no_current_branch(&self) -> bool {
        matches!(self.as_git(), Some(GitError::NoCurrentBranch))
    }

    /// Returns true if git output could not be parsed.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self.as_git(), Some(GitError::Parse { .. }))
    }

    /// Returns true if a git invocation exited unsuccessfully.
    #[must_use]
    pub fn is_command_failed(&self) -> bool {
        matches!(self.as_git(), Some(GitError::CommandFailed { .. }))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GitLibError {
                fn from(err: $error) -> Self {
                    GitLibError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Output of a git command did not match the expected record format.
    #[error("failed to parse git output: {message} (record: {record:?})")]
    Parse { message: String, record: String },

    /// Current branch requested but no branch is marked current.
    #[error("no current branch (detached HEAD?)")]
    NoCurrentBranch,

    /// Git command exited unsuccessfully.
    #[error("git command failed: {command} (exit code {exit_code}) - {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

impl GitError {
    /// Create a [`GitError::Parse`] for a single offending record.
    pub fn parse(message: impl Into<String>, record: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            record: record.into(),
        }
    }
}

// --- Config Errors ---

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
