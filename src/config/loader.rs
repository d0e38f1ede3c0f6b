// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered [`Config`] sources.
//!
//! ```text
//! lowest   Config::default()              serde defaults per field
//!          add_toml_file / _optional      in the order added
//!          add_toml_str
//!          GITLIB_SECTION__KEY env vars   only after with_env()
//! highest  set("section.key", value)
//! ```
//!
//! Required files are checked before anything is read, so a missing one is
//! reported as `ConfigError::NotFound` with its path.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat, Source};
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GITLIB";

/// Builder over the `config` crate with git-lib's source order.
pub struct ConfigLoader {
    sources: ConfigBuilder<DefaultState>,
    required: Vec<PathBuf>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: config::Config::builder(),
            required: Vec::new(),
            env_prefix: None,
        }
    }

    /// Layer a TOML file that must exist.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.required.push(path.to_path_buf());
        self.source(File::from(path).format(FileFormat::Toml).required(true))
    }

    /// Layer a TOML file if it exists.
    #[must_use]
    pub fn add_toml_file_optional(self, path: impl AsRef<Path>) -> Self {
        self.source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
    }

    /// Layer inline TOML.
    #[must_use]
    pub fn add_toml_str(self, content: &str) -> Self {
        self.source(File::from_str(content, FileFormat::Toml))
    }

    /// Read `GITLIB_<SECTION>__<KEY>` variables at build time.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_prefix(ENV_PREFIX)
    }

    /// Like [`with_env`](Self::with_env) with a different prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override `key` (dotted, e.g. `git.program`) above every other source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `key` is not a valid path.
    pub fn set(mut self, key: &str, value: impl Into<config::Value>) -> Result<Self> {
        self.sources =
            self.sources
                .set_override(key, value)
                .map_err(|e| ConfigError::InvalidValue {
                    section: "override".to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        Ok(self)
    }

    /// Read every source, deserialize and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing required file, a `config`
    /// error for unreadable TOML or unknown keys, and `ConfigError::InvalidValue`
    /// if validation fails.
    pub fn build(self) -> Result<Config> {
        if let Some(missing) = self.required.iter().find(|p| !p.is_file()) {
            return Err(ConfigError::NotFound(missing.display().to_string()).into());
        }

        let sources = match self.env_prefix {
            Some(prefix) => self.sources.add_source(
                Environment::with_prefix(&prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.sources,
        };
        let config: Config = sources.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn source(mut self, source: impl Source + Send + Sync + 'static) -> Self {
        self.sources = self.sources.add_source(source);
        self
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
