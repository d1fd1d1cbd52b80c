//! Line patterns for backtick-quoted MySQL dumps.

use crate::catalog::{ColumnSpec, NO_DEFAULT};
use once_cell::sync::Lazy;
use regex::Regex;

static TABLE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?`(\w+)`")
        .expect("table start pattern")
});

// Groups: 1 name, 2 type, 3 NOT NULL, 4 AUTO_INCREMENT, 5 PRIMARY KEY,
// 6 default, 7 extra, 8 comment.
// `extra` is lazy-optional so COMMENT is tried before free text.
// Runs on the definition with its terminator already stripped.
static COLUMN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*`(\w+)`\s+",
        r"([\w(),']+?(?:\s+(?:UNSIGNED|SIGNED|ZEROFILL|PRECISION)\b)*)",
        r"(\s+NOT\s+NULL)?",
        r"(\s+AUTO_INCREMENT)?",
        r"(\s+PRIMARY\s+KEY)?",
        r"(?:\s+DEFAULT\s+(.*?))?",
        r"(?:\s+(.*?))??",
        r"(?:\s+COMMENT\s+(.*?))?",
        r"\s*$",
    ))
    .expect("column pattern")
});

/// Name of the table a `CREATE TABLE` line opens, if any.
pub fn match_table_start(line: &str) -> Option<&str> {
    TABLE_START
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Drop the `,`, `)` or `);` that ends a column definition.
///
/// A `)` only counts as the table's closing paren when it leaves the
/// definition unbalanced, so `varchar(255)` keeps its own.
fn strip_terminator(line: &str) -> &str {
    let trimmed = line.trim_end();
    if let Some(body) = trimmed.strip_suffix(',') {
        return body;
    }

    let body = match trimmed.strip_suffix(';') {
        Some(body) => body.trim_end(),
        None => trimmed,
    };
    match body.strip_suffix(')') {
        Some(inner) if inner.matches('(').count() < inner.matches(')').count() + 1 => inner,
        _ => body,
    }
}

/// Parse a column definition line.
pub fn match_column(line: &str) -> Option<ColumnSpec> {
    let caps = COLUMN.captures(strip_terminator(line))?;
    let text = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let mut column = ColumnSpec::new(caps.get(1)?.as_str(), caps.get(2)?.as_str().trim());
    column.nullable = caps.get(3).is_none();
    column.auto_increment = caps.get(4).is_some();
    column.is_primary_key = caps.get(5).is_some();
    column.default_value = text(6).unwrap_or(NO_DEFAULT).to_string();
    column.extra = text(7).unwrap_or_default().to_string();
    column.comment = text(8).unwrap_or_default().to_string();
    Some(column)
}

/// Whether a line terminates the current statement.
pub fn ends_statement(line: &str) -> bool {
    line.trim_end().ends_with(';')
}
