// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result rendering for the terminal

use super::commands::OutputFormat;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table as DisplayTable};
use sheetiq::{QueryRecord, QueryResult, ResultExporter, Row, TableProfile, TableSummary, Table};

/// Longest error text shown in the history listing
const HISTORY_ERROR_WIDTH: usize = 50;

pub struct ResultFormatter;

impl ResultFormatter {
    /// Render a query result in the requested format
    pub fn format(result: &QueryResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => serde_json::to_string_pretty(&result.to_json_rows())
                .unwrap_or_else(|e| format!("Failed to render JSON: {}", e)),
            OutputFormat::Csv => match ResultExporter::default().to_delimited_bytes(result) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).trim_end().to_string(),
                Err(e) => format!("Failed to render CSV: {}", e),
            },
        }
    }

    fn format_table(result: &QueryResult) -> String {
        if result.is_empty() {
            return format!(
                "Query executed successfully but returned no results ({} columns: {}).",
                result.column_count(),
                result.column_names().join(", ")
            );
        }
        let mut table = new_display_table();
        table.set_header(result.column_names());
        add_rows(&mut table, &result.rows);
        table.to_string()
    }

    /// Loaded tables overview
    pub fn format_summaries(summaries: &[TableSummary]) -> String {
        if summaries.is_empty() {
            return "No tables loaded yet".to_string();
        }
        let mut table = new_display_table();
        table.set_header(vec!["Table Name", "Rows", "Columns", "Memory Usage"]);
        for summary in summaries {
            table.add_row(vec![
                summary.identifier.clone(),
                summary.rows.to_string(),
                summary.columns.to_string(),
                format!("{:.1} MB", summary.size_mb()),
            ]);
        }
        table.to_string()
    }

    /// First rows of a table
    pub fn format_preview(table: &Table, rows: &[Row]) -> String {
        let mut display = new_display_table();
        display.set_header(table.columns().iter().map(|c| c.name.as_str()));
        add_rows(&mut display, rows);
        format!(
            "Showing the first {} of {} rows of table '{}'\n{}",
            rows.len(),
            table.row_count(),
            table.identifier(),
            display
        )
    }

    /// Column details and quick insights
    pub fn format_profile(profile: &TableProfile) -> String {
        let mut table = new_display_table();
        table.set_header(vec![
            "Column Name",
            "Data Type",
            "Non-Null Values",
            "Missing Values",
            "Sample Values",
        ]);
        for column in &profile.columns {
            table.add_row(vec![
                column.name.clone(),
                column.data_type.to_string(),
                column.non_null.to_string(),
                column.missing.to_string(),
                column.sample.clone(),
            ]);
        }
        format!(
            "{}\nTotal Rows: {}  Columns: {}  Missing Values: {}  Numeric Columns: {}",
            table,
            profile.rows,
            profile.column_count(),
            profile.missing_values,
            profile.numeric_columns
        )
    }

    /// History, newest first
    pub fn format_history<'a>(records: impl DoubleEndedIterator<Item = &'a QueryRecord> + ExactSizeIterator) -> String {
        let total = records.len();
        if total == 0 {
            return "No queries run yet".to_string();
        }
        let mut table = new_display_table();
        table.set_header(vec!["#", "Time", "Query", "Outcome"]);
        for (offset, record) in records.rev().enumerate() {
            let outcome = if record.success {
                format!("Success: {} rows", record.row_count.unwrap_or(0))
            } else {
                format!("Error: {}", truncate(record.error.as_deref().unwrap_or(""), HISTORY_ERROR_WIDTH))
            };
            table.add_row(vec![
                Cell::new(total - offset),
                Cell::new(record.display_time()),
                Cell::new(&record.query),
                Cell::new(outcome),
            ]);
        }
        table.to_string()
    }
}

fn new_display_table() -> DisplayTable {
    let mut table = DisplayTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn add_rows(table: &mut DisplayTable, rows: &[Row]) {
    for row in rows {
        table.add_row(row.iter().map(|value| value.to_string()));
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
