// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Named table registry for a session
//!
//! Identifiers are unique and the first table loaded under an identifier
//! wins. The engine resolves unquoted relation names case-insensitively, so
//! the registry does too: `Sales` and `sales` name the same entry.

use crate::error::Result;
use crate::types::Table;
use serde::Serialize;
use std::sync::Arc;

/// What `register` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The table was added
    Added,
    /// A table with this identifier already exists; nothing changed
    AlreadyPresent,
}

/// Per-table overview for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub identifier: String,
    pub rows: usize,
    pub columns: usize,
    pub size_bytes: usize,
}

impl TableSummary {
    /// Approximate size in megabytes
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// The session's tables, in load order
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: Vec<Arc<Table>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `table` under `identifier` unless the identifier is taken.
    ///
    /// Fails only when `identifier` is not a valid relation name.
    pub fn register(&mut self, identifier: &str, table: Table) -> Result<RegisterOutcome> {
        if self.contains(identifier) {
            log::warn!("Table '{}' already registered, keeping the existing one", identifier);
            return Ok(RegisterOutcome::AlreadyPresent);
        }

        let table = if table.identifier() == identifier {
            table
        } else {
            table.with_identifier(identifier)?
        };

        log::info!(
            "Registered table '{}' ({} rows x {} columns)",
            identifier,
            table.row_count(),
            table.column_count()
        );
        self.tables.push(Arc::new(table));
        Ok(RegisterOutcome::Added)
    }

    /// Remove a table. Returns whether it was present.
    pub fn remove(&mut self, identifier: &str) -> bool {
        match self.position(identifier) {
            Some(idx) => {
                let removed = self.tables.remove(idx);
                log::info!("Removed table '{}'", removed.identifier());
                true
            }
            None => false,
        }
    }

    /// Drop every table
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.position(identifier).is_some()
    }

    pub fn get(&self, identifier: &str) -> Option<Arc<Table>> {
        self.position(identifier).map(|idx| Arc::clone(&self.tables[idx]))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Read-only view of the current tables
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            tables: self.tables.clone(),
        }
    }

    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .map(|table| TableSummary {
                identifier: table.identifier().to_string(),
                rows: table.row_count(),
                columns: table.column_count(),
                size_bytes: table.size_bytes(),
            })
            .collect()
    }

    fn position(&self, identifier: &str) -> Option<usize> {
        self.tables
            .iter()
            .position(|t| t.identifier().eq_ignore_ascii_case(identifier))
    }
}

/// Immutable view of the registry at one point in time.
///
/// Shares the tables with the registry; later registry changes do not show
/// up in an existing snapshot.
#[derive(Debug, Clone, Default)]
pub struct TableSnapshot {
    tables: Vec<Arc<Table>>,
}

impl TableSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables.iter().map(|t| t.as_ref())
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.identifier()).collect()
    }

    pub fn get(&self, identifier: &str) -> Option<&Table> {
        self.iter()
            .find(|t| t.identifier().eq_ignore_ascii_case(identifier))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total cell count across all tables
    pub fn total_cells(&self) -> usize {
        self.iter().map(|t| t.row_count() * t.column_count()).sum()
    }
}
