// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor over an ephemeral DataFusion instance

use super::bind::table_to_batch;
use super::materialize::materialize;
use super::result::QueryResult;
use crate::error::{Result, SheetiqError};
use crate::registry::{TableRegistry, TableSnapshot};
use datafusion::datasource::MemTable;
use datafusion::execution::context::SessionContext;
use std::sync::Arc;

/// Error text when a query is submitted with nothing to query
pub const NO_TABLES_MESSAGE: &str = "No tables available. Please load at least one table.";

/// Runs guarded queries against the registry's tables.
///
/// Callers must have passed the query through
/// [`QueryGuard`](crate::QueryGuard) first; the executor does not check the
/// statement kind again.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `query` against the registry's current tables
    pub fn execute(&self, registry: &TableRegistry, query: &str) -> Result<QueryResult> {
        self.execute_snapshot(&registry.snapshot(), query)
    }

    /// Run `query` against an explicit set of tables.
    ///
    /// A fresh engine instance is created for this call and dropped before
    /// returning, whether the query succeeds or not.
    pub fn execute_snapshot(&self, tables: &TableSnapshot, query: &str) -> Result<QueryResult> {
        if tables.is_empty() {
            return Err(SheetiqError::Execution(NO_TABLES_MESSAGE.to_string()));
        }

        log::debug!(
            "Binding {} table(s), {} cells in total",
            tables.len(),
            tables.total_cells()
        );

        // The engine API is async; drive it on a runtime owned by this call
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(execution_error)?;

        let result = runtime.block_on(run_query(tables, query));
        drop(runtime);

        match &result {
            Ok(result) => log::debug!(
                "Query returned {} rows x {} columns",
                result.row_count(),
                result.column_count()
            ),
            Err(e) => log::debug!("Query failed: {}", e),
        }
        result
    }
}

async fn run_query(tables: &TableSnapshot, query: &str) -> Result<QueryResult> {
    let ctx = SessionContext::new();

    for table in tables.iter() {
        let batch = table_to_batch(table).map_err(execution_error)?;
        let provider = MemTable::try_new(batch.schema(), vec![vec![batch]]).map_err(execution_error)?;
        ctx.register_table(table.identifier(), Arc::new(provider))
            .map_err(execution_error)?;
        log::debug!("Bound table '{}'", table.identifier());
    }

    let frame = ctx.sql(query).await.map_err(execution_error)?;
    // Taken before collecting so an empty result still has its columns
    let schema = frame.schema().as_arrow().clone();
    let batches = frame.collect().await.map_err(execution_error)?;

    materialize(&schema, &batches).map_err(execution_error)
}

fn execution_error(cause: impl std::fmt::Display) -> SheetiqError {
    SheetiqError::Execution(format!("SQL execution error: {}", cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DataType, Table, Value};

    fn orders_registry() -> TableRegistry {
        let mut registry = TableRegistry::new();
        let orders = Table::new(
            "orders",
            vec![
                Column::new("id", DataType::Integer),
                Column::new("amount", DataType::Float),
            ],
            vec![
                vec![Value::Integer(1), Value::Float(10.0)],
                vec![Value::Integer(2), Value::Float(20.0)],
            ],
        )
        .unwrap();
        registry.register("orders", orders).unwrap();
        registry
    }

    #[test]
    fn test_empty_registry_fails_fast() {
        let err = QueryExecutor::new()
            .execute(&TableRegistry::new(), "SELECT 1")
            .unwrap_err();
        assert!(matches!(err, SheetiqError::Execution(_)));
        assert!(err.to_string().to_lowercase().contains("no tables available"));
    }

    #[test]
    fn test_count() {
        let result = QueryExecutor::new()
            .execute(&orders_registry(), "SELECT COUNT(*) AS n FROM orders")
            .unwrap();
        assert_eq!(result.column_names(), vec!["n"]);
        assert_eq!(result.rows, vec![vec![Value::Integer(2)]]);
    }

    #[test]
    fn test_unknown_relation() {
        let err = QueryExecutor::new()
            .execute(&orders_registry(), "SELECT * FROM missing_table")
            .unwrap_err();
        assert!(matches!(err, SheetiqError::Execution(_)));
        assert!(err.to_string().contains("missing_table"));
    }

    #[test]
    fn test_no_state_survives_between_calls() {
        let executor = QueryExecutor::new();
        let mut registry = orders_registry();
        assert!(executor.execute(&registry, "SELECT * FROM orders").is_ok());

        registry.remove("orders");
        let other = Table::new(
            "other",
            vec![Column::new("x", DataType::Integer)],
            vec![vec![Value::Integer(9)]],
        )
        .unwrap();
        registry.register("other", other).unwrap();

        assert!(executor.execute(&registry, "SELECT * FROM orders").is_err());
        assert!(executor.execute(&registry, "SELECT x FROM other").is_ok());
    }
}
