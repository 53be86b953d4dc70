// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Read-only query gate
//!
//! A lexical check, not a parser. After removing `--` line comments and
//! `/* */` block comments the query must start with `SELECT` and must not
//! contain any blocked keyword anywhere, including inside string literals
//! and identifiers. So `SELECT 'DROP' AS x` and a column named
//! `last_update` are rejected, while statements the engine would treat as
//! writes but that avoid every blocked word are let through. Both are known
//! limits of the gate; it is the only place statement kind is checked.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)--.*$").expect("static regex"));
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("static regex"));

/// Keywords that reject a query wherever they appear
pub const BLOCKED_KEYWORDS: [&str; 12] = [
    "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "TRUNCATE", "REPLACE", "MERGE",
    "EXEC", "EXECUTE", "CALL",
];

/// Message shown for every rejected statement kind
pub const SELECT_ONLY_MESSAGE: &str = "Only SELECT statements are allowed for security reasons.";

/// Outcome of [`QueryGuard::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardVerdict {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl GuardVerdict {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// The query gate. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryGuard;

impl QueryGuard {
    /// Decide whether `query` may run. The query text itself is not changed.
    pub fn validate(query: &str) -> GuardVerdict {
        let cleaned = strip_comments(query);
        let cleaned = cleaned.trim();

        if cleaned.is_empty() {
            return GuardVerdict::reject(format!("{} The query is empty.", SELECT_ONLY_MESSAGE));
        }

        let upper = cleaned.to_uppercase();
        if !upper.starts_with("SELECT") {
            log::warn!("Rejected query that does not start with SELECT");
            return GuardVerdict::reject(format!(
                "{} The query must start with SELECT.",
                SELECT_ONLY_MESSAGE
            ));
        }

        if let Some(keyword) = BLOCKED_KEYWORDS.iter().find(|kw| upper.contains(*kw)) {
            log::warn!("Rejected query containing blocked keyword {}", keyword);
            return GuardVerdict::reject(format!(
                "{} Blocked keyword found: {}.",
                SELECT_ONLY_MESSAGE, keyword
            ));
        }

        GuardVerdict::allow()
    }

    /// Shorthand for `validate(query).allowed`
    pub fn is_allowed(query: &str) -> bool {
        Self::validate(query).allowed
    }
}

/// Remove line comments first, then block comments
pub fn strip_comments(query: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(query, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}
