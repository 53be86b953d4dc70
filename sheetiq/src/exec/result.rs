// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Materialized query results

use crate::types::{Column, Row, Value};

/// Output of one executed query. Owned by the caller; never shared with the
/// engine after materialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell by row position and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c.name == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_json_rows(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.name.clone(), value.to_json()))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn test_get_by_column_name() {
        let result = QueryResult::new(
            vec![Column::new("n", DataType::Integer)],
            vec![vec![Value::Integer(2)]],
        );
        assert_eq!(result.get(0, "n"), Some(&Value::Integer(2)));
        assert_eq!(result.get(0, "missing"), None);
        assert_eq!(result.get(1, "n"), None);
    }

    #[test]
    fn test_to_json_rows() {
        let result = QueryResult::new(
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
            ],
            vec![vec![Value::Integer(1), Value::Null]],
        );
        assert_eq!(
            result.to_json_rows(),
            serde_json::json!([{"id": 1, "name": null}])
        );
    }
}
