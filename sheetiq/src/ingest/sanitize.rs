// Copyright (c) 2024-2025 Sheetiq Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Table identifiers derived from file names

use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));

/// Derive a table identifier from a file name.
///
/// Drops the text after the last `.`, replaces every character outside
/// `[A-Za-z0-9_]` with `_`, prefixes `table_` when the result does not start
/// with a letter or underscore, and falls back to `unnamed_table` when
/// nothing is left.
pub fn sanitize_table_name(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(dot) => &filename[..dot],
        None => filename,
    };

    let name = INVALID_CHARS.replace_all(stem, "_").into_owned();

    match name.chars().next() {
        None => "unnamed_table".to_string(),
        Some(first) if first.is_ascii_alphabetic() || first == '_' => name,
        Some(_) => format!("table_{}", name),
    }
}

/// Whether `name` can be used unquoted as a relation name
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
