//! Column catalog produced by the dump parser.

use serde::Serialize;
use std::collections::HashMap;

/// Sentinel stored in `default_value` when no `DEFAULT` clause was found.
pub const NO_DEFAULT: &str = "NULL";

/// One recognized column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub name: String,
    /// Raw declared type text, e.g. `int(11)`.
    pub data_type: String,
    pub nullable: bool,
    pub auto_increment: bool,
    pub is_primary_key: bool,
    pub default_value: String,
    pub extra: String,
    pub comment: String,
}

impl ColumnSpec {
    /// A column with every optional modifier absent.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            auto_increment: false,
            is_primary_key: false,
            default_value: NO_DEFAULT.to_string(),
            extra: String::new(),
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

/// Tables keyed by name, iterated in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCatalog {
    tables: Vec<Table>,
    index: HashMap<String, usize>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with an empty column list.
    ///
    /// A name seen before keeps its position but loses its columns.
    pub fn open_table(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&i) => self.tables[i].columns.clear(),
            None => {
                self.index.insert(name.to_string(), self.tables.len());
                self.tables.push(Table {
                    name: name.to_string(),
                    columns: Vec::new(),
                });
            }
        }
    }

    /// Append a column to a registered table. Unknown tables are ignored.
    pub fn push_column(&mut self, table: &str, column: ColumnSpec) {
        if let Some(&i) = self.index.get(table) {
            self.tables[i].columns.push(column);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[ColumnSpec]> {
        self.index
            .get(name)
            .map(|&i| self.tables[i].columns.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Tables whose name contains `query`, ignoring case.
    pub fn filter(&self, query: &str) -> TableCatalog {
        let needle = query.to_lowercase();
        let mut filtered = TableCatalog::new();
        for table in self
            .tables
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
        {
            filtered
                .index
                .insert(table.name.clone(), filtered.tables.len());
            filtered.tables.push(table.clone());
        }
        filtered
    }
}

impl Serialize for TableCatalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(&table.name, &table.columns)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableCatalog {
        let mut catalog = TableCatalog::new();
        catalog.open_table("users");
        catalog.push_column("users", ColumnSpec::new("id", "int(11)"));
        catalog.open_table("user_roles");
        catalog.open_table("orders");
        catalog.push_column("orders", ColumnSpec::new("total", "decimal(10,2)"));
        catalog
    }

    #[test]
    fn test_new_column_defaults() {
        let col = ColumnSpec::new("name", "varchar(255)");
        assert!(col.nullable);
        assert!(!col.auto_increment);
        assert!(!col.is_primary_key);
        assert_eq!(col.default_value, "NULL");
        assert_eq!(col.extra, "");
        assert_eq!(col.comment, "");
    }

    #[test]
    fn test_reopen_keeps_position_and_clears_columns() {
        let mut catalog = sample();
        catalog.open_table("users");

        let names: Vec<&str> = catalog.table_names().collect();
        assert_eq!(names, vec!["users", "user_roles", "orders"]);
        assert_eq!(catalog.get("users").map(|c| c.len()), Some(0));
        assert_eq!(catalog.column_count(), 1);
    }

    #[test]
    fn test_push_to_unknown_table_is_ignored() {
        let mut catalog = sample();
        catalog.push_column("missing", ColumnSpec::new("x", "int"));
        assert!(!catalog.contains("missing"));
        assert_eq!(catalog.column_count(), 2);
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let catalog = sample();

        let filtered = catalog.filter("USER");
        let names: Vec<&str> = filtered.table_names().collect();
        assert_eq!(names, vec!["users", "user_roles"]);
        assert_eq!(filtered.get("users").map(|c| c.len()), Some(1));

        assert_eq!(catalog.filter("").len(), 3);
        assert!(catalog.filter("invoice").is_empty());
    }

    #[test]
    fn test_serialize_json_shape() {
        let catalog = sample();
        let json = serde_json::to_value(&catalog).unwrap();

        assert_eq!(json["users"][0]["name"], "id");
        assert_eq!(json["users"][0]["dataType"], "int(11)");
        assert_eq!(json["users"][0]["isPrimaryKey"], false);
        assert_eq!(json["users"][0]["defaultValue"], "NULL");
        assert_eq!(json["user_roles"].as_array().map(|a| a.len()), Some(0));
    }
}
