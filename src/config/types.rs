// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `[git]` configuration section. `[logging]` is
//! [`LogConfig`](crate::logging::LogConfig) itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Base branch used when a branch is created without an explicit base.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Settings for invoking git.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitSettings {
    /// Git executable (name resolved via PATH, or a path).
    pub program: String,
    /// Base for `branch` when the caller gives none.
    pub default_base_branch: String,
    /// Extra environment variables for every invocation.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            default_base_branch: DEFAULT_BASE_BRANCH.to_string(),
            env: BTreeMap::new(),
        }
    }
}

impl GitSettings {
    /// Check that required values are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first empty key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: key.to_string(),
            message: "must not be empty".to_string(),
        };
        if self.program.trim().is_empty() {
            return Err(invalid("program"));
        }
        if self.default_base_branch.trim().is_empty() {
            return Err(invalid("default_base_branch"));
        }
        Ok(())
    }
}
