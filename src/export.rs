//! CSV export of column catalogs.

use crate::catalog::{ColumnSpec, TableCatalog};

/// Header for a single table's columns.
pub const COLUMN_HEADER: [&str; 8] = [
    "Column Name",
    "Data Type",
    "Not Null",
    "Auto Increment",
    "Key",
    "Default",
    "Extra",
    "Comment",
];

pub const TABLE_NAME_HEADER: &str = "Table Name";

/// File name used for the all-tables export.
pub const ALL_COLUMNS_FILE: &str = "all_sql_columns.csv";

/// File name used for one table's export.
pub fn table_file_name(table: &str) -> String {
    format!("{}_columns.csv", table)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}

/// Display values for a column, in `COLUMN_HEADER` order.
pub fn column_row(col: &ColumnSpec) -> [&str; 8] {
    [
        col.name.as_str(),
        col.data_type.as_str(),
        yes_no(!col.nullable),
        yes_no(col.auto_increment),
        if col.is_primary_key { "PRIMARY" } else { "NO" },
        col.default_value.as_str(),
        col.extra.as_str(),
        col.comment.as_str(),
    ]
}

/// Serialize one table's columns to CSV.
pub fn table_to_csv(columns: &[ColumnSpec]) -> String {
    let mut output = String::new();
    write_record(&mut output, COLUMN_HEADER);
    for col in columns {
        write_record(&mut output, column_row(col));
    }
    output
}

/// Serialize every table to one CSV with a leading `Table Name` column.
///
/// Returns `None` when the catalog holds no columns at all.
pub fn catalog_to_csv(catalog: &TableCatalog) -> Option<String> {
    if catalog.column_count() == 0 {
        return None;
    }

    let mut output = String::new();
    write_record(
        &mut output,
        std::iter::once(TABLE_NAME_HEADER).chain(COLUMN_HEADER),
    );
    for table in catalog.tables() {
        for col in &table.columns {
            write_record(
                &mut output,
                std::iter::once(table.name.as_str()).chain(column_row(col)),
            );
        }
    }
    Some(output)
}

fn write_record<'a>(output: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_field(output, field);
    }
    output.push('\n');
}

fn write_field(output: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        output.push('"');
        output.push_str(&field.replace('"', "\"\""));
        output.push('"');
    } else {
        output.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parse_str;

    const DUMP: &str = "CREATE TABLE `users` (
`id` int(11) NOT NULL AUTO_INCREMENT PRIMARY KEY,
`name` varchar(255) DEFAULT NULL COMMENT 'display name, shown \"as is\"',
) ENGINE=InnoDB;
CREATE TABLE `roles` (
`code` char(8) NOT NULL,
) ENGINE=InnoDB;";

    #[test]
    fn test_table_csv() {
        let catalog = parse_str(DUMP);
        let csv = table_to_csv(catalog.get("users").unwrap());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Column Name,Data Type,Not Null,Auto Increment,Key,Default,Extra,Comment"
        );
        assert_eq!(lines[1], "id,int(11),YES,YES,PRIMARY,NULL,,");
        assert_eq!(
            lines[2],
            r#"name,varchar(255),NO,NO,NO,NULL,,"'display name, shown ""as is""'""#
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_catalog_csv() {
        let catalog = parse_str(DUMP);
        let csv = catalog_to_csv(&catalog).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[0].starts_with("Table Name,Column Name,Data Type"));
        assert!(lines[1].starts_with("users,id,"));
        assert!(lines[2].starts_with("users,name,"));
        assert_eq!(lines[3], "roles,code,char(8),YES,NO,NO,NULL,,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_catalog_csv_without_columns() {
        assert_eq!(catalog_to_csv(&TableCatalog::new()), None);

        let catalog = parse_str("CREATE TABLE `empty` (\n);");
        assert_eq!(catalog_to_csv(&catalog), None);
        assert_eq!(table_to_csv(catalog.get("empty").unwrap()).lines().count(), 1);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(table_file_name("users"), "users_columns.csv");
        assert_eq!(ALL_COLUMNS_FILE, "all_sql_columns.csv");
    }
}
