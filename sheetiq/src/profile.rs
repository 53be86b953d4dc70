// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Column details and quick statistics for a loaded table

use crate::types::{DataType, Table};
use serde::Serialize;

/// Per-column details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub non_null: usize,
    pub missing: usize,
    /// First non-null value, or `N/A`
    pub sample: String,
}

/// Column details plus table-wide totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub identifier: String,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    pub missing_values: usize,
    pub numeric_columns: usize,
}

impl TableProfile {
    pub fn of(table: &Table) -> Self {
        let columns: Vec<ColumnProfile> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let non_null = table.column_values(idx).filter(|v| !v.is_null()).count();
                let sample = table
                    .column_values(idx)
                    .find(|v| !v.is_null())
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                ColumnProfile {
                    name: column.name.clone(),
                    data_type: column.data_type,
                    non_null,
                    missing: table.row_count() - non_null,
                    sample,
                }
            })
            .collect();

        Self {
            identifier: table.identifier().to_string(),
            rows: table.row_count(),
            missing_values: columns.iter().map(|c| c.missing).sum(),
            numeric_columns: columns.iter().filter(|c| c.data_type.is_numeric()).count(),
            columns,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_profile_counts() {
        let table = Table::from_values(
            "people",
            vec!["name".into(), "age".into(), "score".into(), "nickname".into()],
            vec![
                vec!["ann".into(), Value::Integer(31), Value::Float(1.5), Value::Null],
                vec!["bob".into(), Value::Null, Value::Float(2.0), Value::Null],
            ],
        )
        .unwrap();

        let profile = TableProfile::of(&table);
        assert_eq!(profile.rows, 2);
        assert_eq!(profile.column_count(), 4);
        assert_eq!(profile.missing_values, 3);
        assert_eq!(profile.numeric_columns, 2);

        let age = &profile.columns[1];
        assert_eq!(age.non_null, 1);
        assert_eq!(age.missing, 1);
        assert_eq!(age.sample, "31");
        assert_eq!(profile.columns[3].sample, "N/A");
    }
}
