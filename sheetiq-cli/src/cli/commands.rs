// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for Sheetiq

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verbosity accepted by `--log-level`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Sheetiq CLI - read-only SQL across spreadsheets
#[derive(Parser)]
#[command(name = "sheetiq")]
#[command(about = "Sheetiq - query spreadsheets with SQL, no database setup required")]
#[command(version)]
pub struct Cli {
    /// Library log output; overrides --verbose
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Shorthand for --log-level debug
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Session configuration file (JSON)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level; warnings only unless asked otherwise
    pub fn level_filter(&self) -> log::LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => log::LevelFilter::Debug,
            (None, false) => log::LevelFilter::Warn,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the version
    Version,

    /// Load tables and run one SELECT query
    Query {
        /// A SELECT statement
        sql: String,

        /// Spreadsheet or CSV files to load as tables
        #[arg(short, long = "table", required = true)]
        tables: Vec<PathBuf>,

        /// How to print the result
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the result to this file (.xlsx or .csv)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Interactive SQL console (REPL)
    Console {
        /// Spreadsheet or CSV files to load on startup
        #[arg(short, long = "table")]
        tables: Vec<PathBuf>,
    },

    /// Check whether a query would be accepted, without running it
    Validate {
        /// Statement to check
        sql: String,
    },
}

/// Result rendering for `query`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered terminal table
    Table,
    /// Array of row objects
    Json,
    /// Comma separated, header first
    Csv,
}
