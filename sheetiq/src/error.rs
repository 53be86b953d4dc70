// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for Sheetiq

use thiserror::Error;

/// Result type alias for Sheetiq operations
pub type Result<T> = std::result::Result<T, SheetiqError>;

/// Main error type for Sheetiq operations
///
/// Every variant is recoverable: callers report it and carry on with the
/// same session.
#[derive(Error, Debug)]
pub enum SheetiqError {
    /// Source could not be read as a table
    #[error("{0}")]
    Load(String),

    /// Query rejected by the query guard
    #[error("{0}")]
    Validation(String),

    /// The engine failed while running a query
    #[error("{0}")]
    Execution(String),

    /// Result could not be serialized for download
    #[error("Export error: {0}")]
    Export(String),

    /// Table data violates the table invariants (ragged rows, bad names)
    #[error("Invalid table: {0}")]
    Table(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetiqError {
    /// Short label for the error kind, used in history and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            SheetiqError::Load(_) => "load",
            SheetiqError::Validation(_) => "validation",
            SheetiqError::Execution(_) => "execution",
            SheetiqError::Export(_) => "export",
            SheetiqError::Table(_) => "table",
            SheetiqError::Config(_) => "config",
            SheetiqError::Io(_) => "io",
            SheetiqError::Json(_) => "json",
        }
    }
}
