// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Table to Arrow conversion for engine binding

use crate::types::{DataType, Table, Value};
use chrono::NaiveDate;
use datafusion::arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use datafusion::arrow::datatypes::{DataType as ArrowType, Field, Schema, TimeUnit};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::sync::Arc;

/// Arrow type a column is bound as
pub(crate) fn arrow_type(data_type: DataType) -> ArrowType {
    match data_type {
        DataType::Boolean => ArrowType::Boolean,
        DataType::Integer => ArrowType::Int64,
        DataType::Float => ArrowType::Float64,
        DataType::Text => ArrowType::Utf8,
        DataType::Date => ArrowType::Date32,
        DataType::Timestamp => ArrowType::Timestamp(TimeUnit::Microsecond, None),
    }
}

/// One record batch holding the whole table
pub(crate) fn table_to_batch(table: &Table) -> Result<RecordBatch, ArrowError> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.name.as_str(), arrow_type(c.data_type), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| column_array(table.column_values(idx), column.data_type))
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(table.row_count()));
    RecordBatch::try_new_with_options(schema, arrays, &options)
}

fn column_array<'a>(cells: impl Iterator<Item = &'a Value>, data_type: DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => Arc::new(
            cells
                .map(|v| match v {
                    Value::Boolean(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        DataType::Integer => Arc::new(
            cells
                .map(|v| match v {
                    Value::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect::<Int64Array>(),
        ),
        DataType::Float => Arc::new(
            cells
                .map(|v| match v {
                    Value::Float(f) => Some(*f),
                    Value::Integer(i) => Some(*i as f64),
                    _ => None,
                })
                .collect::<Float64Array>(),
        ),
        DataType::Text => Arc::new(
            cells
                .map(|v| match v {
                    Value::Null => None,
                    Value::Text(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect::<StringArray>(),
        ),
        DataType::Date => Arc::new(
            cells
                .map(|v| match v {
                    Value::Date(d) => Some(days_since_epoch(*d)),
                    _ => None,
                })
                .collect::<Date32Array>(),
        ),
        DataType::Timestamp => Arc::new(
            cells
                .map(|v| match v {
                    Value::Timestamp(ts) => Some(ts.and_utc().timestamp_micros()),
                    Value::Date(d) => Some(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_micros()),
                    _ => None,
                })
                .collect::<TimestampMicrosecondArray>(),
        ),
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;
    use datafusion::arrow::array::{Array, AsArray};
    use datafusion::arrow::datatypes::Int64Type;

    #[test]
    fn test_batch_shape_and_nulls() {
        let table = Table::new(
            "t",
            vec![
                Column::new("id", DataType::Integer),
                Column::new("label", DataType::Text),
            ],
            vec![
                vec![Value::Integer(1), Value::Text("a".into())],
                vec![Value::Null, Value::Null],
            ],
        )
        .unwrap();

        let batch = table_to_batch(&table).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "label");

        let ids = batch.column(0).as_primitive::<Int64Type>();
        assert_eq!(ids.value(0), 1);
        assert!(ids.is_null(1));
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }
}
