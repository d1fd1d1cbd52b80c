//! Browsing state for one loaded dump.
//!
//! Everything derived from a dump (catalog, preview selection) is dropped
//! as soon as the dump itself is cleared or replaced.

use crate::catalog::{ColumnSpec, TableCatalog};
use crate::error::SessionError;
use crate::export::{catalog_to_csv, table_to_csv};
use crate::sql::{Dialect, ParseReport, parse_with_report};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct Loaded {
    source: String,
    report: ParseReport,
    dialect: Dialect,
}

#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<Loaded>,
    query: String,
    preview: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` as the dump named `source`.
    ///
    /// Reloading the source that is already loaded keeps the cached catalog.
    pub fn load_dump(&mut self, source: &str, text: &str) -> &TableCatalog {
        let loaded = match self.loaded.take() {
            Some(loaded) if loaded.source == source => {
                debug!("{} already loaded", source);
                loaded
            }
            _ => {
                self.preview = None;
                Self::parse_source(source, text)
            }
        };
        &self.loaded.insert(loaded).report.catalog
    }

    fn parse_source(source: &str, text: &str) -> Loaded {
        let dialect = Dialect::detect(text.lines());
        if !dialect.is_supported() {
            warn!(
                "{} looks like a {} dump; only MySQL-style dumps are recognized",
                source, dialect
            );
        }

        let report = parse_with_report(text.lines());
        info!(
            "loaded {}: {} tables, {} columns",
            source,
            report.catalog.len(),
            report.catalog.column_count()
        );
        Loaded {
            source: source.to_string(),
            report,
            dialect,
        }
    }

    /// Forget the dump and everything derived from it.
    pub fn clear_source(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            debug!("cleared {}", loaded.source);
        }
        self.preview = None;
    }

    pub fn source(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.source.as_str())
    }

    pub fn dialect(&self) -> Option<Dialect> {
        self.loaded.as_ref().map(|l| l.dialect)
    }

    pub fn catalog(&self) -> Option<&TableCatalog> {
        self.loaded.as_ref().map(|l| &l.report.catalog)
    }

    pub fn report(&self) -> Option<&ParseReport> {
        self.loaded.as_ref().map(|l| &l.report)
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Tables matching the current search query.
    pub fn visible_tables(&self) -> TableCatalog {
        self.catalog()
            .map(|c| c.filter(&self.query))
            .unwrap_or_default()
    }

    pub fn select_preview(&mut self, table: &str) -> Result<&[ColumnSpec], SessionError> {
        let catalog = self.catalog().ok_or(SessionError::NoSource)?;
        if !catalog.contains(table) {
            return Err(SessionError::UnknownTable(table.to_string()));
        }
        self.preview = Some(table.to_string());
        self.columns(table)
    }

    /// The selected preview table and its columns.
    pub fn preview(&self) -> Option<(&str, &[ColumnSpec])> {
        let table = self.preview.as_deref()?;
        let columns = self.catalog()?.get(table)?;
        Some((table, columns))
    }

    pub fn columns(&self, table: &str) -> Result<&[ColumnSpec], SessionError> {
        let catalog = self.catalog().ok_or(SessionError::NoSource)?;
        catalog
            .get(table)
            .ok_or_else(|| SessionError::UnknownTable(table.to_string()))
    }

    pub fn table_csv(&self, table: &str) -> Result<String, SessionError> {
        Ok(table_to_csv(self.columns(table)?))
    }

    /// Every table's columns, regardless of the search query.
    pub fn all_csv(&self) -> Result<String, SessionError> {
        let catalog = self.catalog().ok_or(SessionError::NoSource)?;
        catalog_to_csv(catalog).ok_or(SessionError::NothingToExport)
    }
}
