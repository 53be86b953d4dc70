// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers: one-off queries, the interactive console and query checks

use colored::Colorize;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};

use super::commands::OutputFormat;
use super::output::ResultFormatter;
use sheetiq::{
    ExportFormat, QueryGuard, QueryOutcome, QueryResult, RegisterOutcome, Session, SessionConfig,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

const HISTORY_FILE: &str = ".sheetiq/.sql_history.txt";

/// Build a session from the optional config file
pub fn open_session(config: Option<&Path>) -> CliResult<Session> {
    let config = match config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    Ok(Session::with_config(config)?)
}

/// `sheetiq query`: load the files, run one statement, optionally export
pub fn handle_query(
    session: &mut Session,
    sql: &str,
    tables: &[PathBuf],
    format: OutputFormat,
    export: Option<&Path>,
) -> CliResult {
    for path in tables {
        load_and_report(session, path);
    }

    let result = print_outcome(session.run_query(sql), format)?;

    if let Some(path) = export {
        export_result(session, &result, path)?;
    }
    Ok(())
}

/// `sheetiq validate`: run the guard only
pub fn handle_validate(sql: &str) -> CliResult {
    let verdict = QueryGuard::validate(sql);
    match verdict.reason {
        None => {
            println!("{}", "Query is allowed".green());
            Ok(())
        }
        Some(reason) => {
            eprintln!("{}", format!("Query rejected: {}", reason).red());
            Err(reason.into())
        }
    }
}

/// `sheetiq console`: the interactive SQL console
pub fn handle_console(session: &mut Session, tables: &[PathBuf]) -> CliResult {
    println!("{}", "Sheetiq SQL console".bold().green());
    println!("Enter 'help' for commands and 'quit' to leave");
    println!("End each statement with ';' (it may span several lines)");

    for path in tables {
        load_and_report(session, path);
    }
    print_loaded_tables(session);

    let config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut editor = Editor::<(), _>::with_config(config)?;

    if let Some(parent) = Path::new(HISTORY_FILE).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = editor.load_history(HISTORY_FILE);

    let mut statement = StatementBuffer::default();
    let mut last_result: Option<QueryResult> = None;

    loop {
        let prompt = if statement.is_empty() {
            format!("{} ", "sheetiq>".cyan())
        } else {
            format!("{} ", "     ...".cyan())
        };

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C abandons a half-typed statement
                if !statement.is_empty() {
                    statement.clear();
                    println!("{}", "Statement discarded".yellow());
                }
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Console error: {:?}", err).red());
                break;
            }
        };

        if statement.is_empty() {
            let command = line.trim();
            match command.to_lowercase().as_str() {
                "" => continue,
                "exit" | "quit" => break,
                "help" => {
                    print_help();
                    continue;
                }
                "clear" => {
                    print!("\x1B[2J\x1B[1;1H");
                    continue;
                }
                _ if command.starts_with('.') => {
                    editor.add_history_entry(command)?;
                    run_dot_command(session, command, last_result.as_ref());
                    continue;
                }
                _ => {}
            }
        }

        if let Some(sql) = statement.push_line(&line) {
            editor.add_history_entry(sql.as_str())?;
            if let Ok(result) = print_outcome(session.run_query(&sql), OutputFormat::Table) {
                last_result = Some(result);
            }
        }
    }

    println!("{}", "Bye".green());
    let _ = editor.save_history(HISTORY_FILE);

    // Tables and history live only as long as the console
    session.clear();
    Ok(())
}

/// Accumulates console lines until a statement is terminated by `;`
#[derive(Debug, Default)]
struct StatementBuffer {
    text: String,
}

impl StatementBuffer {
    /// Add a line; returns the full statement once the line ends with `;`
    fn push_line(&mut self, line: &str) -> Option<String> {
        self.text.push_str(line);
        self.text.push('\n');

        if line.trim_end().ends_with(';') {
            let statement = self.text.trim().to_string();
            self.text.clear();
            Some(statement)
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}

fn load_and_report(session: &mut Session, path: &Path) {
    match session.load_file(path) {
        Ok((identifier, RegisterOutcome::Added)) => {
            let shape = session
                .registry()
                .get(&identifier)
                .map(|t| format!("{} rows x {} columns", t.row_count(), t.column_count()))
                .unwrap_or_default();
            println!("{}", format!("Loaded table '{}' ({})", identifier, shape).green());
        }
        Ok((identifier, RegisterOutcome::AlreadyPresent)) => {
            println!(
                "{}",
                format!("Table '{}' already loaded, {} skipped", identifier, path.display()).yellow()
            );
        }
        Err(e) => eprintln!("{}", format!("{}: {}", path.display(), e).red()),
    }
}

/// Print a query outcome; the result is handed back on success
fn print_outcome(outcome: QueryOutcome, format: OutputFormat) -> CliResult<QueryResult> {
    let elapsed = outcome.elapsed;
    match outcome.result {
        Ok(result) => {
            println!("{}", ResultFormatter::format(&result, format));
            if format == OutputFormat::Table {
                let summary = format!(
                    "{} row(s), {} column(s) in {:.3}s",
                    result.row_count(),
                    result.column_count(),
                    elapsed.as_secs_f64()
                );
                println!("{}", summary.cyan());
            }
            Ok(result)
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            Err(e.into())
        }
    }
}

fn export_result(session: &Session, result: &QueryResult, path: &Path) -> CliResult {
    match session.exporter().write_to_path(result, path) {
        Ok(format) => {
            let message = format!(
                "Saved {} row(s) to {} ({})",
                result.row_count(),
                path.display(),
                format.extension()
            );
            println!("{}", message.green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Export failed: {}", e).red());
            Err(e.into())
        }
    }
}

fn run_dot_command(session: &mut Session, line: &str, last_result: Option<&QueryResult>) {
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((line, ""));

    let not_found = |name: &str| println!("{}", format!("No table named '{}'", name).yellow());

    match (command, argument) {
        (".tables", _) => {
            println!("{}", ResultFormatter::format_summaries(&session.table_summaries()))
        }
        (".load", path) if !path.is_empty() => load_and_report(session, Path::new(path)),
        (".drop", name) if !name.is_empty() => {
            if session.remove_table(name) {
                println!("{}", format!("Dropped table '{}'", name).green());
            } else {
                not_found(name);
            }
        }
        (".preview", name) if !name.is_empty() => match session.preview(name) {
            Some((table, rows)) => println!("{}", ResultFormatter::format_preview(&table, &rows)),
            None => not_found(name),
        },
        (".profile", name) if !name.is_empty() => match session.profile(name) {
            Some(profile) => println!("{}", ResultFormatter::format_profile(&profile)),
            None => not_found(name),
        },
        (".history", _) => println!("{}", ResultFormatter::format_history(session.history().all())),
        (".examples", _) => print_examples(session),
        (".format", _) => {
            if session.current_query().trim().is_empty() {
                println!("{}", "Nothing to format yet".yellow());
            } else {
                println!("{}", session.format_current_query());
            }
        }
        (".export", target) => match last_result {
            Some(result) => {
                let path = if target.is_empty() {
                    PathBuf::from(session.export_file_name(ExportFormat::Spreadsheet))
                } else {
                    PathBuf::from(target)
                };
                let _ = export_result(session, result, &path);
            }
            None => println!("{}", "No successful result to export yet".yellow()),
        },
        _ => println!(
            "{}",
            format!("Unknown or incomplete command '{}' (see 'help')", line).yellow()
        ),
    }
}

fn print_examples(session: &Session) {
    let examples = session.example_queries();
    if examples.is_empty() {
        println!("{}", "Load a table first to get examples".yellow());
        return;
    }
    for example in examples {
        println!("{}: {}", example.title.bold(), example.description);
        println!("    {}", example.query.yellow());
    }
}

fn print_loaded_tables(session: &Session) {
    let snapshot = session.registry().snapshot();
    if snapshot.is_empty() {
        println!("{}", "No tables yet; add one with .load <file>".yellow());
    } else {
        println!("Tables: {}", snapshot.identifiers().join(", ").cyan());
    }
}

fn print_help() {
    let section = |title: &str| println!("\n{}", title.bold().green());

    section("Console");
    println!("  {:<18} this help", "help".cyan());
    println!("  {:<18} leave the console", "quit | exit".cyan());
    println!("  {:<18} clear the screen", "clear".cyan());

    section("Tables");
    println!("  {:<18} list loaded tables", ".tables".cyan());
    println!("  {:<18} load a spreadsheet or csv/tsv file", ".load <file>".cyan());
    println!("  {:<18} remove a table", ".drop <table>".cyan());
    println!("  {:<18} first rows of a table", ".preview <table>".cyan());
    println!("  {:<18} column details and quick insights", ".profile <table>".cyan());

    section("Queries");
    println!("  {:<18} past queries, newest first", ".history".cyan());
    println!("  {:<18} starter queries for the loaded tables", ".examples".cyan());
    println!("  {:<18} uppercase the keywords of the last query", ".format".cyan());
    println!("  {:<18} save the last result as .xlsx or .csv", ".export [file]".cyan());

    section("Syntax");
    println!("  Read-only SELECT statements, terminated by ';'");
    println!("  Quote mixed-case column names: SELECT \"Region\" FROM sales;");
    println!("  {}", "SELECT * FROM a JOIN b ON a.id = b.id;".yellow());
    println!("  {}", "SELECT * FROM q1 UNION ALL SELECT * FROM q2;".yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_ends_at_semicolon() {
        let mut buffer = StatementBuffer::default();
        assert_eq!(buffer.push_line("SELECT *"), None);
        assert!(!buffer.is_empty());
        assert_eq!(
            buffer.push_line("FROM orders;  "),
            Some("SELECT *\nFROM orders;".to_string())
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_discards_partial_statement() {
        let mut buffer = StatementBuffer::default();
        buffer.push_line("SELECT 1");
        buffer.clear();
        assert_eq!(buffer.push_line("SELECT 2;"), Some("SELECT 2;".to_string()));
    }

    #[test]
    fn test_validate_rejects_writes() {
        assert!(handle_validate("SELECT 1").is_ok());
        assert!(handle_validate("DELETE FROM orders").is_err());
    }
}
