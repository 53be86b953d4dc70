// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for Sheetiq
//!
//! Provides one-off query execution, an interactive SQL console (REPL)
//! and a query check that runs nothing.

pub mod commands;
pub mod console;
pub mod output;

pub use commands::{Cli, Commands};
pub use console::{handle_console, handle_query, handle_validate, open_session};
