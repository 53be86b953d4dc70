// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session configuration

use crate::error::{Result, SheetiqError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of history records kept. `None` keeps every record.
    pub history_limit: Option<usize>,
    /// Rows shown by table previews
    pub preview_rows: usize,
    /// Worksheet name used by the spreadsheet exporter
    pub result_sheet_name: String,
    /// File name prefix for exported results
    pub export_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            preview_rows: 10,
            result_sheet_name: "Query Result".to_string(),
            export_prefix: "sheetiq_results".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create with a capped history ring
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: Some(limit),
            ..Default::default()
        }
    }

    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: SessionConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the session unusable
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == Some(0) {
            return Err(SheetiqError::Config(
                "history_limit must be at least 1 (omit it for unbounded history)".to_string(),
            ));
        }
        if self.result_sheet_name.trim().is_empty() || self.result_sheet_name.chars().count() > 31 {
            return Err(SheetiqError::Config(format!(
                "result_sheet_name '{}' must be 1 to 31 characters",
                self.result_sheet_name
            )));
        }
        Ok(())
    }
}
