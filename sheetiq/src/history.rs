// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Append-only query history

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;

/// One execution attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRecord {
    pub timestamp: DateTime<Local>,
    pub query: String,
    /// Rows returned, for successful attempts
    pub row_count: Option<usize>,
    /// Error text, for failed attempts
    pub error: Option<String>,
    pub success: bool,
}

impl QueryRecord {
    /// Timestamp as shown to users
    pub fn display_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Chronological record of execution attempts.
///
/// Unbounded unless built with a limit, in which case the oldest records
/// are evicted first. Records are never edited.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: VecDeque<QueryRecord>,
    limit: Option<usize>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` records (the newest ones)
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Append an attempt. A record is successful exactly when `error` is `None`.
    pub fn record(&mut self, query: &str, row_count: Option<usize>, error: Option<String>) {
        let success = error.is_none();
        self.records.push_back(QueryRecord {
            timestamp: Local::now(),
            query: query.to_string(),
            row_count: if success { row_count } else { None },
            error,
            success,
        });

        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    /// Records oldest first; use `.rev()` for newest first
    pub fn all(&self) -> std::collections::vec_deque::Iter<'_, QueryRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&QueryRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record; only used when the session ends
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut history = HistoryLog::new();
        history.record("SELECT 1", Some(1), None);
        history.record("SELECT nope", None, Some("boom".into()));
        history.record("SELECT 1", Some(1), None);

        let queries: Vec<&str> = history.all().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["SELECT 1", "SELECT nope", "SELECT 1"]);

        let failed = history.all().nth(1).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert_eq!(failed.row_count, None);
        assert!(history.all().next().unwrap().timestamp <= history.last().unwrap().timestamp);
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut history = HistoryLog::new();
        for i in 0..1000 {
            history.record(&format!("SELECT {}", i), Some(1), None);
        }
        assert_eq!(history.len(), 1000);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = HistoryLog::with_limit(Some(2));
        history.record("SELECT 1", Some(1), None);
        history.record("SELECT 2", Some(1), None);
        history.record("SELECT 3", Some(1), None);

        let queries: Vec<&str> = history.all().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["SELECT 2", "SELECT 3"]);
    }

    #[test]
    fn test_newest_first_view() {
        let mut history = HistoryLog::new();
        history.record("first", Some(0), None);
        history.record("second", Some(0), None);
        assert_eq!(history.all().rev().next().unwrap().query, "second");
    }
}
