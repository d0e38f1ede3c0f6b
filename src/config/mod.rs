// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for git-lib.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. TOML files, in the order added
//! 3. GITLIB_* env vars
//! 4. explicit overrides (ConfigLoader::set)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITLIB_GIT__PROGRAM=/usr/bin/git        → git.program
//! GITLIB_GIT__DEFAULT_BASE_BRANCH=main    → git.default_base_branch
//! GITLIB_LOGGING__CONSOLE_LEVEL=debug     → logging.console_level
//! ```
//!
//! # Example
//!
//! ```toml
//! [git]
//! program = "git"
//! default_base_branch = "main"
//!
//! [git.env]
//! GIT_SSH_COMMAND = "ssh -o BatchMode=yes"
//!
//! [logging]
//! console_level = "warn"
//! log_file = "logs/git.jsonl"
//! json = true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use crate::logging::LogConfig;
use types::GitSettings;

/// Complete library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Git invocation settings.
    pub git: GitSettings,
    /// Subscriber settings for [`init_logging`](crate::logging::init_logging).
    pub logging: LogConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use git_lib::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitlib.toml")
    ///     .with_env()
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate loaded values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required git setting is empty.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        Ok(())
    }
}
