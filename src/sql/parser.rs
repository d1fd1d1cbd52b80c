//! Line-oriented parser for `CREATE TABLE` statements in SQL dumps.
//!
//! The parser never fails: lines it does not recognize are skipped, so a
//! dump in an unexpected format simply yields fewer columns.

use super::patterns::{ends_statement, match_column, match_table_start};
use crate::catalog::{ColumnSpec, TableCatalog};
use tracing::{debug, trace, warn};

/// Which table, if any, the parser is inside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Idle,
    InTable(String),
}

/// What a single line does to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Start a table. `replaced` names a table left open without its `;`.
    OpenTable {
        name: String,
        replaced: Option<String>,
    },
    /// Append a column to the open table.
    Column(ColumnSpec),
    /// Inside a table, but not a column definition.
    Unmatched,
    /// Outside any table.
    Ignored,
}

/// Result of feeding one line to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: ParserState,
    pub action: LineAction,
}

/// Pure transition function for one line.
pub fn step(state: &ParserState, line: &str) -> Step {
    if let Some(name) = match_table_start(line) {
        let replaced = match state {
            ParserState::InTable(open) => Some(open.clone()),
            ParserState::Idle => None,
        };
        return Step {
            next: ParserState::InTable(name.to_string()),
            action: LineAction::OpenTable {
                name: name.to_string(),
                replaced,
            },
        };
    }

    match state {
        ParserState::Idle => Step {
            next: ParserState::Idle,
            action: LineAction::Ignored,
        },
        ParserState::InTable(table) => {
            let action = match match_column(line) {
                Some(column) => LineAction::Column(column),
                None => LineAction::Unmatched,
            };
            let next = if ends_statement(line) {
                ParserState::Idle
            } else {
                ParserState::InTable(table.clone())
            };
            Step { next, action }
        }
    }
}

/// Catalog plus what the parser noticed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub catalog: TableCatalog,
    pub lines: usize,
    /// In-table lines that were not column definitions.
    pub unmatched_lines: usize,
    /// Tables whose statement was cut short by another `CREATE TABLE`.
    pub implicitly_closed: Vec<String>,
    /// Table still open when input ran out.
    pub unterminated: Option<String>,
}

/// Incremental dump parser.
#[derive(Debug, Default)]
pub struct DumpParser {
    state: ParserState,
    report: ParseReport,
}

impl DumpParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_line(&mut self, line: &str) {
        self.report.lines += 1;
        let Step { next, action } = step(&self.state, line);

        match action {
            LineAction::OpenTable { name, replaced } => {
                if let Some(prev) = replaced {
                    warn!(
                        "line {}: `{}` opened before `{}` was terminated",
                        self.report.lines, name, prev
                    );
                    self.report.implicitly_closed.push(prev);
                }
                debug!("line {}: table `{}`", self.report.lines, name);
                self.report.catalog.open_table(&name);
            }
            LineAction::Column(column) => {
                if let ParserState::InTable(table) = &self.state {
                    trace!("{}.{} {}", table, column.name, column.data_type);
                    self.report.catalog.push_column(table, column);
                }
            }
            LineAction::Unmatched => {
                self.report.unmatched_lines += 1;
                trace!("line {}: skipped {:?}", self.report.lines, line.trim_end());
            }
            LineAction::Ignored => {}
        }

        self.state = next;
    }

    pub fn finish(mut self) -> ParseReport {
        if let ParserState::InTable(table) = self.state {
            debug!("input ended inside `{}`", table);
            self.report.unterminated = Some(table);
        }
        self.report
    }
}

/// Parse dump lines into a catalog.
pub fn parse<I, S>(lines: I) -> TableCatalog
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_with_report(lines).catalog
}

/// Parse dump lines, keeping diagnostics.
pub fn parse_with_report<I, S>(lines: I) -> ParseReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DumpParser::new();
    for line in lines {
        parser.feed_line(line.as_ref());
    }
    let report = parser.finish();
    debug!(
        "parsed {} lines: {} tables, {} columns",
        report.lines,
        report.catalog.len(),
        report.catalog.column_count()
    );
    report
}

/// Parse a whole dump held in memory.
pub fn parse_str(input: &str) -> TableCatalog {
    parse(input.lines())
}
