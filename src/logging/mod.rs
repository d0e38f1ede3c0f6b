// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optional `tracing` subscriber for hosts that have none.
//!
//! The library only emits events. What each level shows:
//!
//! ```text
//! error   a git invocation exited non-zero (command line, exit code, stderr)
//! warn    a merge stopped with conflicts
//! info    a repository was opened
//! debug   every git command line; record and classification counts
//! trace   exit code of every git invocation
//! ```
//!
//! ```text
//! init_logging(&LogConfig)
//!    registry
//!     +-- stderr   console_level
//!     +-- file     file_level (falls back to console_level)
//!                  plain text or JSON lines, non_blocking writer
//!    -> LogGuard   flushes the file writer on drop
//! ```

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;

/// Verbosity threshold, written in config files as lowercase names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Subscriber setup, also the `[logging]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    #[builder(default)]
    pub console_level: LogLevel,
    /// Level for `log_file`; the console level when unset.
    pub file_level: Option<LogLevel>,
    /// Append events to this file as well.
    #[builder(into)]
    pub log_file: Option<PathBuf>,
    /// Write the file as JSON lines instead of plain text.
    #[builder(default)]
    pub json: bool,
    /// Show the emitting module on the console.
    #[builder(default)]
    pub show_target: bool,
}

impl LogConfig {
    #[must_use]
    pub fn effective_file_level(&self) -> LogLevel {
        self.file_level.unwrap_or(self.console_level)
    }
}

/// Keeps the file writer alive; pending events are flushed when dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install a global subscriber built from `config`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
///
/// # Example
///
/// ```no_run
/// use git_lib::logging::{LogConfig, LogLevel, init_logging};
///
/// let config = LogConfig::builder()
///     .console_level(LogLevel::Warn)
///     .file_level(LogLevel::Debug)
///     .log_file("git.log")
///     .build();
/// let _guard = init_logging(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_filter(EnvFilter::new(config.console_level.directive()));

    let (file, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = open_log_file(path)?;
            let filter = EnvFilter::new(config.effective_file_level().directive());
            let layer = if config.json {
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_filter(filter)
                    .boxed()
            } else {
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(filter)
                    .boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LogGuard { _file: guard })
}

fn open_log_file(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}
