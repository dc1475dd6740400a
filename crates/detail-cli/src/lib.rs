// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! detail-cli library
//!
//! This module exports the command line configuration and subcommands of
//! the `detail` binary for use in integration tests.

pub mod commands;
pub mod config;
pub mod prompt;
