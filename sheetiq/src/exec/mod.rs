// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution
//!
//! Every call binds the registry's tables into a brand-new embedded engine
//! instance, runs one query and materializes the full result. Nothing is
//! cached between calls, so table changes are always visible to the next
//! query.

pub mod result;
pub mod executor;
mod bind;
mod materialize;

pub use result::QueryResult;
pub use executor::{QueryExecutor, NO_TABLES_MESSAGE};
