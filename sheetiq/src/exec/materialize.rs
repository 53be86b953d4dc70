// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Arrow batches to [`QueryResult`]
//!
//! Engine output types are folded onto the semantic types: every integer
//! width becomes Integer, floats and decimals become Float, string encodings
//! become Text, dates become Date and any timestamp becomes Timestamp.
//! Everything else is rendered with Arrow's display formatter as Text.

use super::result::QueryResult;
use crate::types::{Column, DataType, Row, Value};
use datafusion::arrow::array::{Array, ArrayRef, AsArray};
use datafusion::arrow::compute::cast;
use datafusion::arrow::datatypes::{
    DataType as ArrowType, Date32Type, Float64Type, Int64Type, Schema, TimeUnit,
    TimestampMicrosecondType,
};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::arrow::util::display::{ArrayFormatter, FormatOptions};

/// Semantic type of an engine output column
pub(crate) fn semantic_type(arrow: &ArrowType) -> DataType {
    match arrow {
        ArrowType::Boolean => DataType::Boolean,
        ArrowType::Int8
        | ArrowType::Int16
        | ArrowType::Int32
        | ArrowType::Int64
        | ArrowType::UInt8
        | ArrowType::UInt16
        | ArrowType::UInt32
        | ArrowType::UInt64 => DataType::Integer,
        ArrowType::Float16
        | ArrowType::Float32
        | ArrowType::Float64
        | ArrowType::Decimal128(_, _)
        | ArrowType::Decimal256(_, _) => DataType::Float,
        ArrowType::Date32 | ArrowType::Date64 => DataType::Date,
        ArrowType::Timestamp(_, _) => DataType::Timestamp,
        _ => DataType::Text,
    }
}

/// Collect all batches into rows, keeping column and row order
pub(crate) fn materialize(schema: &Schema, batches: &[RecordBatch]) -> Result<QueryResult, ArrowError> {
    let columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|field| Column::new(field.name().as_str(), semantic_type(field.data_type())))
        .collect();

    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    let mut rows: Vec<Row> = Vec::with_capacity(total_rows);

    for batch in batches {
        let column_values = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(array, column)| array_values(array, column.data_type))
            .collect::<Result<Vec<Vec<Value>>, ArrowError>>()?;

        let mut iters: Vec<_> = column_values.into_iter().map(Vec::into_iter).collect();
        for _ in 0..batch.num_rows() {
            rows.push(iters.iter_mut().map(|it| it.next().unwrap_or(Value::Null)).collect());
        }
    }

    Ok(QueryResult::new(columns, rows))
}

fn array_values(array: &ArrayRef, target: DataType) -> Result<Vec<Value>, ArrowError> {
    let len = array.len();
    if array.data_type() == &ArrowType::Null {
        return Ok(vec![Value::Null; len]);
    }

    let values = match target {
        DataType::Boolean => {
            let arr = array.as_boolean();
            (0..len)
                .map(|i| if arr.is_null(i) { Value::Null } else { Value::Boolean(arr.value(i)) })
                .collect()
        }
        DataType::Integer => {
            let casted = cast(array, &ArrowType::Int64)?;
            let arr = casted.as_primitive::<Int64Type>();
            (0..len)
                .map(|i| if arr.is_null(i) { Value::Null } else { Value::Integer(arr.value(i)) })
                .collect()
        }
        DataType::Float => {
            let casted = cast(array, &ArrowType::Float64)?;
            let arr = casted.as_primitive::<Float64Type>();
            (0..len)
                .map(|i| if arr.is_null(i) { Value::Null } else { Value::Float(arr.value(i)) })
                .collect()
        }
        DataType::Date => {
            let casted = cast(array, &ArrowType::Date32)?;
            let arr = casted.as_primitive::<Date32Type>();
            (0..len)
                .map(|i| {
                    if arr.is_null(i) {
                        return Value::Null;
                    }
                    arr.value_as_date(i).map(Value::Date).unwrap_or(Value::Null)
                })
                .collect()
        }
        DataType::Timestamp => {
            let casted = cast(array, &ArrowType::Timestamp(TimeUnit::Microsecond, None))?;
            let arr = casted.as_primitive::<TimestampMicrosecondType>();
            (0..len)
                .map(|i| {
                    if arr.is_null(i) {
                        return Value::Null;
                    }
                    arr.value_as_datetime(i).map(Value::Timestamp).unwrap_or(Value::Null)
                })
                .collect()
        }
        DataType::Text => text_values(array)?,
    };

    Ok(values)
}

fn text_values(array: &ArrayRef) -> Result<Vec<Value>, ArrowError> {
    let len = array.len();

    if matches!(
        array.data_type(),
        ArrowType::Utf8 | ArrowType::LargeUtf8 | ArrowType::Utf8View
    ) {
        let casted = cast(array, &ArrowType::Utf8)?;
        let arr = casted.as_string::<i32>();
        return Ok((0..len)
            .map(|i| if arr.is_null(i) { Value::Null } else { Value::Text(arr.value(i).to_string()) })
            .collect());
    }

    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    Ok((0..len)
        .map(|i| {
            if array.is_null(i) {
                Value::Null
            } else {
                Value::Text(formatter.value(i).to_string())
            }
        })
        .collect())
}
