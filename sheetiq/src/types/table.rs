// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Immutable named tables

use super::infer::infer_column_type;
use super::value::{DataType, Value};
use crate::error::{Result, SheetiqError};
use crate::ingest::is_valid_identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column header with its inferred type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// One row, one value per column
pub type Row = Vec<Value>;

/// A named, rectangular dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    identifier: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from already typed columns.
    ///
    /// Fails when the identifier is not a valid relation name, when column
    /// names repeat, when a row is ragged, or when a cell does not match its
    /// column type.
    pub fn new(identifier: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        let identifier = identifier.into();
        if !is_valid_identifier(&identifier) {
            return Err(SheetiqError::Table(format!(
                "'{}' is not a valid table identifier",
                identifier
            )));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SheetiqError::Table(format!(
                    "duplicate column name '{}' in table '{}'",
                    column.name, identifier
                )));
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SheetiqError::Table(format!(
                    "row {} of table '{}' has {} values, expected {}",
                    row_idx + 1,
                    identifier,
                    row.len(),
                    columns.len()
                )));
            }
            for (value, column) in row.iter().zip(&columns) {
                if let Some(value_type) = value.data_type() {
                    if value_type != column.data_type {
                        return Err(SheetiqError::Table(format!(
                            "row {} column '{}' holds a {} value in a {} column",
                            row_idx + 1,
                            column.name,
                            value_type,
                            column.data_type
                        )));
                    }
                }
            }
        }

        Ok(Self {
            identifier,
            columns,
            rows,
        })
    }

    /// Build a table from loosely typed cells, inferring column types.
    ///
    /// Short rows are padded with nulls, blank or repeated headers are
    /// renamed so every column name is unique, and cells are converted to
    /// their column's inferred type.
    pub fn from_values(identifier: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let identifier = identifier.into();
        let width = headers.len();

        let mut rows = rows;
        for (row_idx, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                if row[width..].iter().any(|v| !v.is_null()) {
                    return Err(SheetiqError::Table(format!(
                        "row {} of table '{}' has {} values but only {} headers",
                        row_idx + 1,
                        identifier,
                        row.len(),
                        width
                    )));
                }
                row.truncate(width);
            }
            row.resize(width, Value::Null);
        }

        let names = unique_column_names(headers);
        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = infer_column_type(rows.iter().map(|row| &row[idx]));
                Column::new(name, data_type)
            })
            .collect();

        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&columns)
                    .map(|(value, column)| value.coerce_to(column.data_type))
                    .collect()
            })
            .collect();

        Self::new(identifier, columns, rows)
    }

    /// Same data under another identifier
    pub fn with_identifier(self, identifier: impl Into<String>) -> Result<Self> {
        Self::new(identifier, self.columns, self.rows)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First `n` rows, for previews
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate one column's cells top to bottom
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Approximate in-memory size in bytes
    pub fn size_bytes(&self) -> usize {
        let header: usize = self.columns.iter().map(|c| c.name.len()).sum();
        let cells: usize = self
            .rows
            .iter()
            .flat_map(|row| row.iter())
            .map(Value::size_bytes)
            .sum();
        header + cells
    }
}

/// Make header names unique and non-blank
fn unique_column_names(headers: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = match header.trim() {
            "" => format!("column_{}", idx + 1),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while used.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}
