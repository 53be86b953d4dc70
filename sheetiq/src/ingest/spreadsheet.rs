// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Spreadsheet reader (first sheet only)

use super::{file_name_of, sanitize_table_name};
use crate::error::{Result, SheetiqError};
use crate::types::{Row, Table, Value};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Load the first sheet of a workbook on disk
pub fn load_spreadsheet(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let identifier = sanitize_table_name(&file_name_of(path));
    log::debug!("Loading spreadsheet {:?} as '{}'", path, identifier);

    let mut workbook = open_workbook_auto(path).map_err(load_error)?;
    read_first_sheet(&mut workbook, identifier)
}

/// Load the first sheet of an in-memory workbook, e.g. an upload
pub fn load_spreadsheet_from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Table> {
    let identifier = sanitize_table_name(file_name);
    log::debug!("Loading uploaded spreadsheet '{}' as '{}'", file_name, identifier);

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(load_error)?;
    read_first_sheet(&mut workbook, identifier)
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, identifier: String) -> Result<Table> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error("workbook has no sheets"))?
        .map_err(load_error)?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|cell| matches!(cell, Data::Empty)));

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| load_error("first sheet is empty"))?
        .iter()
        .map(header_text)
        .collect();

    let data: Vec<Row> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    log::debug!("Read {} rows x {} columns from first sheet", data.len(), headers.len());

    Table::from_values(identifier, headers, data).map_err(|e| load_error(e.to_string()))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Integer(*i),
        // Whole numbers are stored as floats in xlsx; read them back as integers
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::Integer(*f as i64),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Boolean(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) if dt.is_duration() => Value::Float(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) => datetime_value(ts),
            None => Value::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

fn datetime_value(ts: NaiveDateTime) -> Value {
    if ts.time() == NaiveTime::MIN {
        Value::Date(ts.date())
    } else {
        Value::Timestamp(ts)
    }
}

fn parse_iso(s: &str) -> Value {
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime_value(ts);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Value::Date(date);
    }
    Value::Text(s.to_string())
}

fn load_error(cause: impl std::fmt::Display) -> SheetiqError {
    SheetiqError::Load(format!("Error reading spreadsheet: {}", cause))
}
