// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Column type inference

use super::value::{DataType, Value};

/// Infer the semantic type of a column from its cells.
///
/// Nulls are ignored. Integers mixed with floats widen to Float and dates
/// mixed with timestamps widen to Timestamp; any other mix is Text. A column
/// with no non-null cell is Text.
pub fn infer_column_type<'a>(cells: impl IntoIterator<Item = &'a Value>) -> DataType {
    let mut inferred: Option<DataType> = None;

    for cell in cells {
        let Some(cell_type) = cell.data_type() else {
            continue;
        };
        inferred = Some(match inferred {
            None => cell_type,
            Some(current) => unify(current, cell_type),
        });
        if inferred == Some(DataType::Text) {
            break;
        }
    }

    inferred.unwrap_or(DataType::Text)
}

fn unify(a: DataType, b: DataType) -> DataType {
    use DataType::*;
    match (a, b) {
        (x, y) if x == y => x,
        (Integer, Float) | (Float, Integer) => Float,
        (Date, Timestamp) | (Timestamp, Date) => Timestamp,
        _ => Text,
    }
}
