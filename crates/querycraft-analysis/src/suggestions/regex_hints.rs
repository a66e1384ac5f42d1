//! Regex-based `SqlHints`.

use std::sync::LazyLock;

use querycraft_core::types::collections::SmallVec4;
use regex::Regex;

use super::SqlHints;

static FROM_TABLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\s+`?(\w+)`?").ok());
static WHERE_COLUMN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:where|and|or)\s+(?:`?\w+`?\.)?`?(\w+)`?\s*(?:=|<|>|!=)").ok()
});
static ORDER_BY_COLUMN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\border\s+by\s+(?:`?\w+`?\.)?`?(\w+)`?").ok());

/// Relation name used when no table can be read from the SQL.
const PLACEHOLDER_RELATION: &str = "relation";

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexHints;

impl SqlHints for RegexHints {
    fn slow_query_hint(&self, sql: &str) -> String {
        let sql = sql.to_lowercase();
        let hint = if sql.contains("select *") {
            "Use specific columns instead of SELECT *"
        } else if sql.contains("order by") && !sql.contains("limit") {
            "Add LIMIT to ORDER BY query"
        } else if sql.contains("like") {
            "LIKE queries are slow - consider full-text search or a different approach"
        } else if sql.contains("count(*)") {
            "COUNT(*) on large tables is slow - consider caching or approximation"
        } else {
            "Consider adding an index or optimizing this query"
        };
        hint.to_string()
    }

    fn eager_load_hint(&self, sql: &str) -> String {
        let relation = table_name(sql)
            .map(|table| singularize(&table))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_RELATION.to_string());
        format!("Add eager loading: ->with('{relation}')")
    }

    fn index_hint(&self, sql: &str) -> String {
        let columns = index_columns(sql);
        match columns.len() {
            0 => "Consider adding an index".to_string(),
            1 => format!("Add index: $table->index('{}')", columns[0]),
            _ => {
                let list = columns
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Add composite index: $table->index([{list}])")
            }
        }
    }
}

/// First identifier after `FROM`, backticks stripped.
pub fn table_name(sql: &str) -> Option<String> {
    let re = LazyLock::force(&FROM_TABLE).as_ref()?;
    re.captures(sql)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Columns compared in the WHERE clause, then ORDER BY columns, each once,
/// in first-seen order.
pub fn index_columns(sql: &str) -> SmallVec4<String> {
    let mut columns = SmallVec4::new();
    for re in [&WHERE_COLUMN, &ORDER_BY_COLUMN] {
        let Some(re) = LazyLock::force(re) else {
            continue;
        };
        for caps in re.captures_iter(sql) {
            if let Some(m) = caps.get(1) {
                let column = m.as_str().to_string();
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
    }
    columns
}

/// Drop one trailing `s`: `posts` → `post`.
fn singularize(table: &str) -> String {
    table.strip_suffix('s').unwrap_or(table).to_string()
}
