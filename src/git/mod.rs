// git-lib: Git command-line client library
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!                 ops.rs (GitLib facade)
//!            /       |          |        \
//!           v        v          v         v
//!      status/   branches.rs  cmd.rs   discovery.rs
//!      parse +   listing      argv      gix, work
//!      classify  parser       builders  tree root
//!           \        |          /
//!            v       v         v
//!      ,-------------------------------,
//!      |  backend: CommandRunner trait |
//!      '----------------+--------------'
//!                       |
//!                       v
//!                  ShellRunner
//!                  (git CLI)
//! ```
//!
//! Parsers and builders work on strings only; the facade is the one place
//! that runs git.

pub mod backend;
pub mod branches;
pub mod cmd;
pub mod discovery;
pub mod ops;
pub mod status;
