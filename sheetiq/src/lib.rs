// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Sheetiq - read-only SQL across spreadsheet tables
//!
//! Load several spreadsheets (or CSV files) as named tables and run
//! read-only SQL over them, including joins, unions and window functions,
//! without a standing database.
//!
//! # Quick Start
//!
//! ```no_run
//! use sheetiq::{Session, SheetiqError};
//!
//! # fn main() -> Result<(), SheetiqError> {
//! let mut session = Session::new();
//! session.load_file("orders.xlsx")?;
//!
//! let outcome = session.run_query("SELECT COUNT(*) AS n FROM orders");
//! let result = outcome.result?;
//! println!("{:?}", result.get(0, "n"));
//!
//! let csv = session.exporter().to_delimited_bytes(&result)?;
//! # let _ = csv;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   register    ┌───────────────┐
//! │   ingest     │ ────────────▶ │ TableRegistry │
//! └──────────────┘               └───────────────┘
//!                                        │ snapshot
//! query ─▶ QueryGuard ─▶ QueryExecutor ◀─┘
//!                              │
//!                 ┌────────────┴───────────┐
//!                 ▼                        ▼
//!            HistoryLog             ResultExporter
//! ```
//!
//! [`Session`] ties the pieces together for one user.

pub mod assist;
pub mod config;
pub mod error;
pub mod exec;
pub mod export;
pub mod guard;
pub mod history;
pub mod ingest;
pub mod profile;
pub mod registry;
pub mod session;
pub mod types;

// Re-export the main types for convenience
pub use assist::{example_queries, format_query, ExampleQuery};
pub use config::SessionConfig;
pub use error::{Result, SheetiqError};
pub use exec::{QueryExecutor, QueryResult};
pub use export::{export_file_name, ExportFormat, ResultExporter};
pub use guard::{GuardVerdict, QueryGuard};
pub use history::{HistoryLog, QueryRecord};
pub use ingest::{load_table, sanitize_table_name};
pub use profile::{ColumnProfile, TableProfile};
pub use registry::{RegisterOutcome, TableRegistry, TableSnapshot, TableSummary};
pub use session::{QueryOutcome, Session};
pub use types::{Column, DataType, Row, Table, Value};
