// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Explicit per-user session
//!
//! A session owns the table registry, the query history, the text of the
//! query being edited and its configuration. Presentation code holds one
//! `Session` per user and passes it into every call; there is no global
//! state, so independent sessions never see each other's tables.

use crate::assist::{example_queries, format_query, ExampleQuery};
use crate::config::SessionConfig;
use crate::error::{Result, SheetiqError};
use crate::exec::{QueryExecutor, QueryResult, NO_TABLES_MESSAGE};
use crate::export::{export_file_name, ExportFormat, ResultExporter};
use crate::guard::QueryGuard;
use crate::history::HistoryLog;
use crate::ingest::{file_name_of, load_spreadsheet_from_bytes, load_table, sanitize_table_name};
use crate::profile::TableProfile;
use crate::registry::{RegisterOutcome, TableRegistry, TableSummary};
use crate::types::{Row, Table};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of [`Session::run_query`]: either a result or an error, plus timing
#[derive(Debug)]
pub struct QueryOutcome {
    pub result: Result<QueryResult>,
    pub elapsed: Duration,
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// One user's working set
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    registry: TableRegistry,
    history: HistoryLog,
    executor: QueryExecutor,
    current_query: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: HistoryLog::with_limit(config.history_limit),
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Register a loaded table under the identifier derived from `filename`
    pub fn load_table(&mut self, filename: &str, table: Table) -> Result<(String, RegisterOutcome)> {
        let identifier = sanitize_table_name(filename);
        let outcome = self.registry.register(&identifier, table)?;
        Ok((identifier, outcome))
    }

    /// Load a file from disk and register it.
    ///
    /// An identifier that is already taken is not read again.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(String, RegisterOutcome)> {
        let path = path.as_ref();
        let filename = file_name_of(path);

        let identifier = sanitize_table_name(&filename);
        if self.registry.contains(&identifier) {
            log::warn!("Skipping {:?}: table '{}' is already loaded", path, identifier);
            return Ok((identifier, RegisterOutcome::AlreadyPresent));
        }

        let table = load_table(path)?;
        self.load_table(&filename, table)
    }

    /// Register an uploaded spreadsheet held in memory
    pub fn load_upload(&mut self, filename: &str, bytes: Vec<u8>) -> Result<(String, RegisterOutcome)> {
        let identifier = sanitize_table_name(filename);
        if self.registry.contains(&identifier) {
            return Ok((identifier, RegisterOutcome::AlreadyPresent));
        }

        let table = load_spreadsheet_from_bytes(filename, bytes)?;
        self.load_table(filename, table)
    }

    /// Remove a table. Returns whether it was present.
    pub fn remove_table(&mut self, identifier: &str) -> bool {
        self.registry.remove(identifier)
    }

    pub fn table_summaries(&self) -> Vec<TableSummary> {
        self.registry.summaries()
    }

    /// First rows of a table, sized by `preview_rows`
    pub fn preview(&self, identifier: &str) -> Option<(Arc<Table>, Vec<Row>)> {
        let table = self.registry.get(identifier)?;
        let rows = table.head(self.config.preview_rows).to_vec();
        Some((table, rows))
    }

    pub fn profile(&self, identifier: &str) -> Option<TableProfile> {
        self.registry.get(identifier).map(|table| TableProfile::of(&table))
    }

    pub fn example_queries(&self) -> Vec<ExampleQuery> {
        example_queries(&self.registry.snapshot().identifiers())
    }

    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    pub fn set_current_query(&mut self, query: impl Into<String>) {
        self.current_query = query.into();
    }

    /// Reformat the query being edited in place
    pub fn format_current_query(&mut self) -> &str {
        self.current_query = format_query(&self.current_query);
        &self.current_query
    }

    /// Validate, execute and log one query.
    ///
    /// Empty input is rejected without a history entry. Every other attempt,
    /// including guard rejections, is recorded.
    pub fn run_query(&mut self, query: &str) -> QueryOutcome {
        let started = Instant::now();

        if query.trim().is_empty() {
            return QueryOutcome {
                result: Err(SheetiqError::Validation(
                    "Please write a SQL query first.".to_string(),
                )),
                elapsed: started.elapsed(),
            };
        }
        self.current_query = query.to_string();

        let verdict = QueryGuard::validate(query);
        let result = if !verdict.allowed {
            let reason = verdict.reason.unwrap_or_default();
            Err(SheetiqError::Validation(reason))
        } else if self.registry.is_empty() {
            Err(SheetiqError::Execution(NO_TABLES_MESSAGE.to_string()))
        } else {
            self.executor.execute(&self.registry, query)
        };

        match &result {
            Ok(result) => self.history.record(query, Some(result.row_count()), None),
            Err(e) => self.history.record(query, None, Some(e.to_string())),
        }

        QueryOutcome {
            result,
            elapsed: started.elapsed(),
        }
    }

    pub fn exporter(&self) -> ResultExporter {
        ResultExporter::new(self.config.result_sheet_name.as_str())
    }

    /// Timestamped download name for a result
    pub fn export_file_name(&self, format: ExportFormat) -> String {
        export_file_name(&self.config.export_prefix, format, Local::now())
    }

    /// End of session: forget tables, history and the edited query
    pub fn clear(&mut self) {
        self.registry.clear();
        self.history.clear();
        self.current_query.clear();
    }
}
