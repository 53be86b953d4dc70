// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! End-to-end query behaviour through a session

#[path = "testutils/mod.rs"]
mod testutils;

use chrono::NaiveDate;
use sheetiq::{
    Column, DataType, QueryExecutor, QueryGuard, RegisterOutcome, Session, SheetiqError, Table,
    TableRegistry, Value,
};
use testutils::{customers_table, orders_table, shop_session};

#[test]
fn test_count_scenario() {
    let mut session = Session::new();
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
    session.load_table("orders.xlsx", orders).unwrap();

    let result = session.run_query("SELECT COUNT(*) AS n FROM orders").result.unwrap();
    assert_eq!(result.column_names(), vec!["n"]);
    assert_eq!(result.rows, vec![vec![Value::Integer(2)]]);
}

#[test]
fn test_missing_table_scenario() {
    let mut session = shop_session();
    let err = session.run_query("SELECT * FROM missing_table").result.unwrap_err();

    assert!(matches!(err, SheetiqError::Execution(_)));
    assert!(err.to_string().contains("missing_table"));

    let record = session.history().last().unwrap();
    assert!(!record.success);
    assert!(record.error.as_deref().unwrap().contains("missing_table"));
}

#[test]
fn test_drop_scenario_leaves_table_queryable() {
    let mut session = shop_session();

    let err = session.run_query("DROP TABLE orders").result.unwrap_err();
    assert!(matches!(err, SheetiqError::Validation(_)));
    assert!(session.registry().contains("orders"));

    let result = session.run_query("SELECT * FROM orders").result.unwrap();
    assert_eq!(result.row_count(), 3);
}

#[test]
fn test_select_star_matches_source_table() {
    let timestamp = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_micro_opt(13, 45, 10, 250_000)
        .unwrap();
    let source = Table::new(
        "mixed",
        vec![
            Column::new("flag", DataType::Boolean),
            Column::new("count", DataType::Integer),
            Column::new("ratio", DataType::Float),
            Column::new("label", DataType::Text),
            Column::new("day", DataType::Date),
            Column::new("at", DataType::Timestamp),
        ],
        vec![
            vec![
                Value::Boolean(true),
                Value::Integer(-7),
                Value::Float(0.25),
                Value::Text("first".into()),
                Value::Date(timestamp.date()),
                Value::Timestamp(timestamp),
            ],
            vec![
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ],
            vec![
                Value::Boolean(false),
                Value::Integer(i64::MAX),
                Value::Float(-1.5),
                Value::Text("last, with comma".into()),
                Value::Date(NaiveDate::from_ymd_opt(1969, 7, 20).unwrap()),
                Value::Timestamp(timestamp),
            ],
        ],
    )
    .unwrap();

    let mut registry = TableRegistry::new();
    registry.register("mixed", source.clone()).unwrap();

    let result = QueryExecutor::new().execute(&registry, "SELECT * FROM mixed").unwrap();
    assert_eq!(result.columns, source.columns());
    assert_eq!(result.rows, source.rows());
}

#[test]
fn test_duplicate_identifier_keeps_first_table() {
    let mut session = Session::new();
    session.load_table("orders.xlsx", orders_table()).unwrap();

    // Sanitizes to the same identifier
    let (identifier, outcome) = session.load_table("orders.csv", customers_table()).unwrap();
    assert_eq!(identifier, "orders");
    assert_eq!(outcome, RegisterOutcome::AlreadyPresent);

    let result = session.run_query("SELECT * FROM orders").result.unwrap();
    assert_eq!(result.column_names(), vec!["id", "customer_id", "amount"]);
    assert_eq!(result.row_count(), 3);
}

#[test]
fn test_empty_registry_has_no_result() {
    let mut session = Session::new();
    let outcome = session.run_query("SELECT * FROM orders");
    let err = outcome.result.unwrap_err();
    assert!(err.to_string().to_lowercase().contains("no tables available"));
}

#[test]
fn test_zero_rows_is_success_with_columns() {
    let mut session = shop_session();
    let result = session
        .run_query("SELECT id, amount FROM orders WHERE amount > 1000")
        .result
        .unwrap();

    assert_eq!(result.column_names(), vec!["id", "amount"]);
    assert_eq!(result.columns[1].data_type, DataType::Float);
    assert!(result.is_empty());
    assert_eq!(session.history().last().unwrap().row_count, Some(0));
}

#[test]
fn test_join_across_tables() {
    let mut session = shop_session();
    let query = "
        -- revenue per customer
        SELECT c.name, SUM(o.amount) AS total
        FROM orders o
        JOIN customers c ON o.customer_id = c.id
        GROUP BY c.name
        ORDER BY c.name";
    let result = session.run_query(query).result.unwrap();

    assert_eq!(
        result.rows,
        vec![
            vec![Value::Text("Acme".into()), Value::Float(15.5)],
            vec![Value::Text("Globex".into()), Value::Float(20.0)],
        ]
    );
}

#[test]
fn test_union_across_tables() {
    let mut session = shop_session();
    let result = session
        .run_query("SELECT id FROM orders UNION ALL SELECT id FROM customers ORDER BY id")
        .result
        .unwrap();

    let ids: Vec<&Value> = result.rows.iter().map(|r| &r[0]).collect();
    assert_eq!(
        ids,
        vec![
            &Value::Integer(1),
            &Value::Integer(2),
            &Value::Integer(3),
            &Value::Integer(10),
            &Value::Integer(20),
            &Value::Integer(30),
        ]
    );
}

#[test]
fn test_window_function_output_is_integer() {
    let mut session = shop_session();
    let result = session
        .run_query("SELECT id, ROW_NUMBER() OVER (ORDER BY amount DESC) AS rn FROM orders ORDER BY id")
        .result
        .unwrap();

    assert_eq!(result.columns[1].data_type, DataType::Integer);
    let ranks: Vec<&Value> = result.rows.iter().map(|r| &r[1]).collect();
    assert_eq!(ranks, vec![&Value::Integer(2), &Value::Integer(1), &Value::Integer(3)]);
}

#[test]
fn test_date_filter() {
    let mut session = shop_session();
    let result = session
        .run_query("SELECT name FROM customers WHERE since >= DATE '2022-01-01'")
        .result
        .unwrap();
    assert_eq!(result.rows, vec![vec![Value::Text("Globex".into())]]);
}

#[test]
fn test_mixed_case_columns_need_quotes() {
    let mut session = Session::new();
    let sales = Table::from_values(
        "sales",
        vec!["Region".into(), "Units".into()],
        vec![vec!["north".into(), Value::Integer(4)]],
    )
    .unwrap();
    session.load_table("sales.xlsx", sales).unwrap();

    let result = session.run_query(r#"SELECT "Region", "Units" FROM sales"#).result.unwrap();
    assert_eq!(result.column_names(), vec!["Region", "Units"]);
    assert!(session.run_query("SELECT Region FROM sales").result.is_err());
}

#[test]
fn test_guard_over_blocks_literals() {
    let mut session = shop_session();
    assert!(!QueryGuard::is_allowed("SELECT 'DROP' AS x"));

    let err = session.run_query("SELECT 'DROP' AS x FROM orders").result.unwrap_err();
    assert!(matches!(err, SheetiqError::Validation(_)));
}

#[test]
fn test_removed_table_is_gone_for_next_query() {
    let mut session = shop_session();
    assert!(session.run_query("SELECT * FROM customers").is_success());

    assert!(session.remove_table("customers"));
    let err = session.run_query("SELECT * FROM customers").result.unwrap_err();
    assert!(err.to_string().contains("customers"));
}

#[test]
fn test_history_is_chronological() {
    let mut session = shop_session();
    session.run_query("SELECT 1 AS one FROM orders LIMIT 1");
    session.run_query("DELETE FROM orders");
    session.run_query("SELECT * FROM nowhere");

    let outcomes: Vec<bool> = session.history().all().map(|r| r.success).collect();
    assert_eq!(outcomes, vec![true, false, false]);
    assert_eq!(session.history().all().next().unwrap().row_count, Some(1));
}

#[test]
fn test_sessions_are_independent() {
    let mut first = shop_session();
    let mut second = Session::new();

    assert!(first.run_query("SELECT * FROM orders").is_success());
    assert!(second.run_query("SELECT * FROM orders").result.is_err());
    assert!(second.history().len() == 1 && first.history().len() == 1);
}
