//! Structural pattern: the shape of a query with literal values erased.

use std::sync::LazyLock;

use regex::Regex;

static INTEGER_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").ok());
static STRING_LITERAL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"'[^']*'").ok());
static WHITESPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Collapse `sql` into its structural pattern.
///
/// Integer literals then single-quoted strings become `?`, whitespace runs
/// become one space, and the result is trimmed and lowercased. Literals are
/// replaced before whitespace is collapsed so quoted text is never rewritten.
pub fn structural_pattern(sql: &str) -> String {
    let normalized = replace_all(&INTEGER_LITERAL, sql, "?");
    let normalized = replace_all(&STRING_LITERAL, &normalized, "?");
    let normalized = replace_all(&WHITESPACE_RUN, &normalized, " ");
    normalized.trim().to_lowercase()
}

fn replace_all(re: &LazyLock<Option<Regex>>, text: &str, replacement: &str) -> String {
    match LazyLock::force(re) {
        Some(re) => re.replace_all(text, replacement).into_owned(),
        None => text.to_string(),
    }
}
