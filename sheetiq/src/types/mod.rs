// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Tabular data model
//!
//! This module provides:
//! - Cell values and semantic column types
//! - Immutable, rectangular tables with inferred column types
//! - Column type inference for loosely typed sources

pub mod value;
pub mod table;
mod infer;

pub use value::{DataType, Value};
pub use table::{Column, Row, Table};
pub use infer::infer_column_type;
