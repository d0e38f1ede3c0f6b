// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                     host program
//!                          |
//!                          v
//!              ,-----------------------,
//!              |   git::ops::GitLib    |
//!              | status/branch/push/.. |
//!              '--+--------+--------+--'
//!                 |        |        |
//!                 v        v        v
//!              status   branches   cmd
//!             classify   listing  builders
//!                 \        |        /
//!                  v       v       v
//!               git::backend (CommandRunner)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use git_lib::config::Config;
//! use git_lib::git::ops::GitLib;
//!
//! let git = GitLib::open(std::path::Path::new("."), &Config::default())?;
//! let status = git.status()?;
//! for path in status.unmerged() {
//!     println!("conflict: {path}");
//! }
//! # Ok::<(), git_lib::error::GitLibError>(())
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod logging;
