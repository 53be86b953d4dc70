// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query helpers for the presentation layer: starter examples and a light
//! keyword formatter

use crate::guard::QueryGuard;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// A ready-to-run starter query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleQuery {
    pub title: &'static str,
    pub query: String,
    pub description: &'static str,
}

/// Starter queries for the given tables, in load order.
///
/// Join and union examples need two tables; nothing is suggested without
/// tables. Examples the query guard would reject, e.g. for a table named
/// `updates`, are left out.
pub fn example_queries<S: AsRef<str>>(identifiers: &[S]) -> Vec<ExampleQuery> {
    let Some(first) = identifiers.first().map(AsRef::as_ref) else {
        return Vec::new();
    };

    let mut examples = vec![
        ExampleQuery {
            title: "Basic Selection",
            query: format!("SELECT * FROM {} LIMIT 5;", first),
            description: "Select first 5 rows from a table",
        },
        ExampleQuery {
            title: "Count Records",
            query: format!("SELECT COUNT(*) AS total_rows FROM {};", first),
            description: "Count total rows in table",
        },
    ];

    if let Some(second) = identifiers.get(1).map(AsRef::as_ref) {
        examples.push(ExampleQuery {
            title: "Join Tables",
            query: format!(
                "SELECT * FROM {} AS a JOIN {} AS b ON a.id = b.id LIMIT 10;",
                first, second
            ),
            description: "Join two tables (adjust column names)",
        });
        examples.push(ExampleQuery {
            title: "Union Tables",
            query: format!("SELECT * FROM {} UNION ALL SELECT * FROM {};", first, second),
            description: "Combine data from multiple tables",
        });
    }

    examples.push(ExampleQuery {
        title: "Window Functions",
        query: format!(
            "SELECT *, ROW_NUMBER() OVER (ORDER BY column_name) AS rank FROM {};",
            first
        ),
        description: "Add row numbers (replace column_name)",
    });

    examples.retain(|example| QueryGuard::is_allowed(&example.query));
    examples
}

// Literals and quoted identifiers are matched first so their text is left alone
static KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)'(?:[^']|'')*'|"(?:[^"]|"")*"|\b(select|from|where|group\s+by|order\s+by)\b"#)
        .expect("static regex")
});

/// Trim the query and uppercase its main clause keywords.
///
/// Only `SELECT`, `FROM`, `WHERE`, `GROUP BY` and `ORDER BY` are touched,
/// and only outside single-quoted literals and double-quoted identifiers.
pub fn format_query(query: &str) -> String {
    KEYWORDS
        .replace_all(query.trim(), |caps: &Captures| match caps.get(1) {
            Some(keyword) => keyword.as_str().to_uppercase(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
