// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Delimited text reader

use super::{file_name_of, sanitize_table_name};
use crate::error::{Result, SheetiqError};
use crate::types::{Row, Table, Value};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Load a `.csv` (comma) or `.tsv` (tab) file
pub fn load_delimited(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file_name = file_name_of(path);
    log::debug!("Loading delimited file {:?}", path);

    let file = std::fs::File::open(path).map_err(load_error)?;
    read_delimited(&file_name, file)
}

/// Load delimited text held in memory
pub fn load_delimited_from_bytes(file_name: &str, bytes: &[u8]) -> Result<Table> {
    read_delimited(file_name, bytes)
}

fn read_delimited<R: Read>(file_name: &str, source: R) -> Result<Table> {
    let delimiter = if file_name.to_ascii_lowercase().ends_with(".tsv") {
        b'\t'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(load_error)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(load_error("file is empty"));
    }

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(load_error)?;
        rows.push(record.iter().map(parse_field).collect());
    }

    Table::from_values(sanitize_table_name(file_name), headers, rows)
        .map_err(|e| load_error(e.to_string()))
}

/// Best typed reading of a text field
fn parse_field(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Integer(i);
    }
    if trimmed.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Value::Date(date);
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Value::Timestamp(ts);
        }
    }
    Value::Text(field.to_string())
}

fn load_error(cause: impl std::fmt::Display) -> SheetiqError {
    SheetiqError::Load(format!("Error reading delimited file: {}", cause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(""), Value::Null);
        assert_eq!(parse_field("42"), Value::Integer(42));
        assert_eq!(parse_field("4.5"), Value::Float(4.5));
        assert_eq!(parse_field("TRUE"), Value::Boolean(true));
        assert_eq!(parse_field("inf"), Value::Text("inf".into()));
        assert_eq!(
            parse_field("2024-02-29"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn test_reads_typed_table() {
        let csv = b"id,amount,note\n1,10.5,first\n2,20,\"with, comma\"\n3,,\n";
        let table = load_delimited_from_bytes("orders.csv", csv).unwrap();

        assert_eq!(table.identifier(), "orders");
        assert_eq!(table.row_count(), 3);
        let types: Vec<DataType> = table.columns().iter().map(|c| c.data_type).collect();
        assert_eq!(types, vec![DataType::Integer, DataType::Float, DataType::Text]);
        assert_eq!(table.rows()[1][1], Value::Float(20.0));
        assert_eq!(table.rows()[1][2], Value::Text("with, comma".into()));
        assert_eq!(table.rows()[2][1], Value::Null);
    }

    #[test]
    fn test_tab_separated() {
        let tsv = b"a\tb\nx\t1\n";
        let table = load_delimited_from_bytes("pairs.tsv", tsv).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows()[0][1], Value::Integer(1));
    }

    #[test]
    fn test_empty_input_is_load_error() {
        let err = load_delimited_from_bytes("empty.csv", b"").unwrap_err();
        assert!(matches!(err, SheetiqError::Load(_)));
    }
}
