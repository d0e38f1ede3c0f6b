// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command execution boundary.
//!
//! ```text
//! GitLib ---> CommandRunner (trait) ---> ShellRunner ---> git (subprocess)
//!                   |
//!                   '---> test stubs (scripted output, recorded argv)
//! ```
//!
//! A runner only reports what happened. A non-zero exit is an `Ok` with
//! `success() == false`; callers decide whether that is an error.
//!
//! Stdout must be UTF-8: paths and branch names are returned byte for byte or
//! not at all. Stderr is only used in messages and is decoded lossily.

use crate::config::types::GitSettings;
use crate::error::{GitError, GitLibResult, ProcessError};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Output from a completed git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Successful output with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// Returns the process exit code (0 = success, -1 = killed by signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a failed invocation of `args` into [`GitError::CommandFailed`].
    ///
    /// Falls back to stdout when stderr is empty (git prints some failures,
    /// such as merge conflicts, on stdout).
    #[must_use]
    pub fn to_error(&self, args: &[String]) -> GitError {
        let message = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        GitError::CommandFailed {
            command: command_line("git", args),
            exit_code: self.exit_code,
            stderr: message.to_string(),
        }
    }
}

/// Executes git argument vectors.
pub trait CommandRunner {
    /// Run git with `args` and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the process cannot be spawned and
    /// `GitError::Parse` if its stdout is not UTF-8. A non-zero exit status is
    /// reported through [`CommandOutput::success`].
    fn run(&self, args: &[String]) -> GitLibResult<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String]) -> GitLibResult<CommandOutput> {
        (**self).run(args)
    }
}

/// Runs the git CLI as a subprocess in a fixed working directory.
///
/// Every invocation sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`
/// so credential prompts fail instead of blocking, and `LC_ALL=C` so messages
/// are not localized.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: PathBuf,
    cwd: PathBuf,
    env: BTreeMap<String, String>,
}

impl ShellRunner {
    /// Runner for `git` from PATH, resolved when the process is spawned.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            cwd: cwd.into(),
            env: BTreeMap::new(),
        }
    }

    /// Runner configured from [`GitSettings`], with the executable resolved up front.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `settings.program` cannot
    /// be found.
    pub fn from_settings(settings: &GitSettings, cwd: impl Into<PathBuf>) -> GitLibResult<Self> {
        let program =
            which::which(&settings.program).map_err(|_| ProcessError::ExecutableNotFound {
                name: settings.program.clone(),
            })?;
        debug!(program = %program.display(), "resolved git executable");
        Ok(Self {
            program,
            cwd: cwd.into(),
            env: settings.env.clone(),
        })
    }

    /// Add an environment variable for every invocation.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, args: &[String]) -> GitLibResult<CommandOutput> {
        let cmd_line = command_line("git", args);
        debug!(cwd = %self.cwd.display(), cmd = %cmd_line, "exec");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .envs(&self.env)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let result = CommandOutput::new(
            output.status.code().unwrap_or(-1),
            decode_stdout(output.stdout, &cmd_line)?,
            String::from_utf8_lossy(&output.stderr),
        );
        trace!(cmd = %cmd_line, exit_code = result.exit_code(), "completed");
        Ok(result)
    }
}

/// Stdout as a string, or a parse error naming the first invalid byte.
pub(crate) fn decode_stdout(bytes: Vec<u8>, cmd_line: &str) -> GitLibResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        let offset = e.utf8_error().valid_up_to();
        GitError::parse(
            format!("output of `{cmd_line}` is not valid UTF-8 at byte {offset}"),
            String::from_utf8_lossy(&e.as_bytes()[..offset]),
        )
        .into()
    })
}

/// Render an argument vector for logs and error messages.
pub(crate) fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        if arg.is_empty() || arg.contains(' ') {
            let _ = write!(line, " \"{arg}\"");
        } else {
            let _ = write!(line, " {arg}");
        }
    }
    line
}
