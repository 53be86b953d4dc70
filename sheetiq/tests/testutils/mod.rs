// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use sheetiq::{Column, DataType, Session, Table, Value};
use std::path::{Path, PathBuf};

/// `orders(id INTEGER, customer_id INTEGER, amount FLOAT)`
pub fn orders_table() -> Table {
    Table::new(
        "orders",
        vec![
            Column::new("id", DataType::Integer),
            Column::new("customer_id", DataType::Integer),
            Column::new("amount", DataType::Float),
        ],
        vec![
            vec![Value::Integer(1), Value::Integer(10), Value::Float(10.0)],
            vec![Value::Integer(2), Value::Integer(20), Value::Float(20.0)],
            vec![Value::Integer(3), Value::Integer(10), Value::Float(5.5)],
        ],
    )
    .expect("valid orders table")
}

/// `customers(id INTEGER, name TEXT, since DATE)`
pub fn customers_table() -> Table {
    let date = |y, m, d| Value::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"));
    Table::new(
        "customers",
        vec![
            Column::new("id", DataType::Integer),
            Column::new("name", DataType::Text),
            Column::new("since", DataType::Date),
        ],
        vec![
            vec![Value::Integer(10), Value::Text("Acme".into()), date(2021, 4, 1)],
            vec![Value::Integer(20), Value::Text("Globex".into()), date(2023, 11, 15)],
            vec![Value::Integer(30), Value::Text("Initech".into()), Value::Null],
        ],
    )
    .expect("valid customers table")
}

/// Session holding `orders` and `customers`
pub fn shop_session() -> Session {
    let mut session = Session::new();
    session.load_table("orders.xlsx", orders_table()).expect("register orders");
    session.load_table("customers.xlsx", customers_table()).expect("register customers");
    session
}

/// Write a one-sheet workbook with a header row and typed cells
pub fn write_workbook(dir: &Path, file_name: &str, headers: &[&str], rows: &[Vec<Value>]) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let timestamp_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("write header");
    }
    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, value) in row.iter().enumerate() {
            let c = c as u16;
            match value {
                Value::Null => {}
                Value::Boolean(b) => {
                    sheet.write_boolean(r, c, *b).expect("write bool");
                }
                Value::Integer(i) => {
                    sheet.write_number(r, c, *i as f64).expect("write int");
                }
                Value::Float(f) => {
                    sheet.write_number(r, c, *f).expect("write float");
                }
                Value::Text(s) => {
                    sheet.write_string(r, c, s).expect("write text");
                }
                Value::Date(d) => {
                    sheet.write_datetime_with_format(r, c, d, &date_format).expect("write date");
                }
                Value::Timestamp(ts) => {
                    sheet
                        .write_datetime_with_format(r, c, ts, &timestamp_format)
                        .expect("write timestamp");
                }
            }
        }
    }

    let path = dir.join(file_name);
    workbook.save(&path).expect("save workbook");
    path
}
