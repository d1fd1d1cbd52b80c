//! SQL dialect sniffing.
//!
//! Only backtick-quoted MySQL dumps are understood by the line patterns;
//! detection lets callers warn when a dump is clearly something else.

/// SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Nothing dialect-specific found
    Generic,
    /// PostgreSQL
    PostgreSQL,
    /// MySQL / MariaDB
    MySQL,
    /// SQLite
    SQLite,
}

impl Dialect {
    /// Detect dialect from dump lines.
    pub fn detect<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keyword_hint = None;

        for line in lines {
            let lower = line.as_ref().to_lowercase();

            // Header comments are decisive
            if lower.contains("postgresql database dump") || lower.contains("pg_dump") {
                return Self::PostgreSQL;
            }
            if lower.contains("mysql dump")
                || lower.contains("mysqldump")
                || lower.contains("mariadb dump")
            {
                return Self::MySQL;
            }
            if lower.contains("pragma foreign_keys") || lower.contains("sqlite_sequence") {
                return Self::SQLite;
            }

            if keyword_hint.is_none() {
                keyword_hint = Self::keyword_hint(&lower);
            }
        }

        keyword_hint.unwrap_or(Self::Generic)
    }

    fn keyword_hint(lower: &str) -> Option<Self> {
        if lower.contains("auto_increment")
            || lower.contains("engine=")
            || lower.contains("unsigned")
            || lower.contains("create table `")
        {
            return Some(Self::MySQL);
        }
        if lower.contains("serial")
            || lower.contains("::text")
            || lower.contains("timestamptz")
            || lower.contains("create table public.")
        {
            return Some(Self::PostgreSQL);
        }
        if lower.contains("autoincrement") {
            return Some(Self::SQLite);
        }
        None
    }

    /// Whether the line patterns are expected to recognize this dialect.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::MySQL | Self::Generic)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Generic => "generic SQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_postgres() {
        let sql = ["-- PostgreSQL database dump", "CREATE TABLE users (id SERIAL);"];
        assert_eq!(Dialect::detect(sql), Dialect::PostgreSQL);
        assert!(!Dialect::PostgreSQL.is_supported());
    }

    #[test]
    fn test_detect_mysql() {
        let sql = ["-- MySQL dump 10.13", "CREATE TABLE `users` ("];
        assert_eq!(Dialect::detect(sql), Dialect::MySQL);

        let sql = ["CREATE TABLE `users` (", "  `id` int NOT NULL AUTO_INCREMENT,"];
        assert_eq!(Dialect::detect(sql), Dialect::MySQL);
    }

    #[test]
    fn test_header_beats_keyword_hint() {
        let sql = ["CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT);", "-- MySQL dump"];
        assert_eq!(Dialect::detect(sql), Dialect::MySQL);
    }

    #[test]
    fn test_detect_sqlite_and_generic() {
        let sql = ["CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT);"];
        assert_eq!(Dialect::detect(sql), Dialect::SQLite);

        let sql = ["CREATE TABLE users (id INTEGER PRIMARY KEY);"];
        assert_eq!(Dialect::detect(sql), Dialect::Generic);
        assert!(Dialect::Generic.is_supported());
    }
}
