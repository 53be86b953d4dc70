// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
mod cli;

use clap::Parser;
use cli::{handle_console, handle_query, handle_validate, open_session, Cli, Commands};
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level_filter())
        .format_timestamp_millis()
        .init();

    let result = match cli.command {
        Commands::Version => {
            println!("sheetiq {}", env!("CARGO_PKG_VERSION"));
            println!("Read-only SQL across spreadsheet tables");
            Ok(())
        }
        Commands::Validate { sql } => handle_validate(&sql),
        Commands::Query {
            sql,
            tables,
            format,
            export,
        } => match open_session(cli.config.as_deref()) {
            Ok(mut session) => handle_query(&mut session, &sql, &tables, format, export.as_deref()),
            Err(e) => report_startup_error(e),
        },
        Commands::Console { tables } => match open_session(cli.config.as_deref()) {
            Ok(mut session) => handle_console(&mut session, &tables),
            Err(e) => report_startup_error(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Handlers report their own failures; only session setup is reported here
fn report_startup_error(e: Box<dyn std::error::Error>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("{}", format!("Failed to start session: {}", e).red());
    Err(e)
}
