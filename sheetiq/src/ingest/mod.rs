// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Table ingestion
//!
//! Turns source files into [`Table`]s named after the file:
//! - Spreadsheets (first sheet only) via calamine
//! - Comma or tab delimited text via csv
//!
//! Loading never touches a registry; callers register the table.

mod sanitize;
mod spreadsheet;
mod delimited;

pub use sanitize::{is_valid_identifier, sanitize_table_name};
pub use spreadsheet::{load_spreadsheet, load_spreadsheet_from_bytes};
pub use delimited::{load_delimited, load_delimited_from_bytes};

use crate::error::Result;
use crate::types::Table;
use std::path::Path;

/// Load a file, choosing the reader from its extension.
///
/// `.csv` and `.tsv` go through the delimited reader, everything else is
/// treated as a spreadsheet.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "tsv" => load_delimited(path),
        _ => load_spreadsheet(path),
    }
}

/// File name component of a path, used to derive the table identifier
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
