pub mod catalog;
pub mod error;
pub mod export;
pub mod preview;
pub mod session;
pub mod sql;

use wasm_bindgen::prelude::*;

use catalog::TableCatalog;
use session::Session;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn parse_filtered(source: &str, filter: Option<String>) -> TableCatalog {
    let catalog = sql::parse_str(source);
    match filter.as_deref() {
        Some(query) => catalog.filter(query),
        None => catalog,
    }
}

/// Parse a SQL dump and return every column as CSV
#[wasm_bindgen(js_name = "dumpToCsv")]
pub fn dump_to_csv(source: &str, filter: Option<String>) -> Option<String> {
    export::catalog_to_csv(&parse_filtered(source, filter))
}

/// Parse a SQL dump and return the catalog as JSON
#[wasm_bindgen(js_name = "dumpToJson")]
pub fn dump_to_json(source: &str, filter: Option<String>) -> Result<String, String> {
    serde_json::to_string(&parse_filtered(source, filter)).map_err(|e| e.to_string())
}

/// Browser-side handle on a [`Session`].
#[wasm_bindgen]
pub struct DumpSession {
    inner: Session,
}

#[wasm_bindgen]
impl DumpSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Session::new(),
        }
    }

    /// Returns the number of tables found.
    #[wasm_bindgen(js_name = "loadDump")]
    pub fn load_dump(&mut self, name: &str, text: &str) -> usize {
        self.inner.load_dump(name, text).len()
    }

    #[wasm_bindgen(js_name = "clearSource")]
    pub fn clear_source(&mut self) {
        self.inner.clear_source();
    }

    #[wasm_bindgen(js_name = "setQuery")]
    pub fn set_query(&mut self, query: &str) {
        self.inner.set_query(query);
    }

    #[wasm_bindgen(js_name = "visibleTables")]
    pub fn visible_tables(&self) -> js_sys::Array {
        self.inner
            .visible_tables()
            .table_names()
            .map(JsValue::from_str)
            .collect()
    }

    /// Select a table for preview and return its columns as JSON.
    #[wasm_bindgen(js_name = "selectPreview")]
    pub fn select_preview(&mut self, table: &str) -> Result<String, String> {
        let columns = self.inner.select_preview(table).map_err(|e| e.to_string())?;
        serde_json::to_string(columns).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "previewTable")]
    pub fn preview_table(&self) -> Option<String> {
        self.inner.preview().map(|(table, _)| table.to_string())
    }

    #[wasm_bindgen(js_name = "tableCsv")]
    pub fn table_csv(&self, table: &str) -> Result<String, String> {
        self.inner.table_csv(table).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "allCsv")]
    pub fn all_csv(&self) -> Result<String, String> {
        self.inner.all_csv().map_err(|e| e.to_string())
    }
}

impl Default for DumpSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "CREATE TABLE `users` (\n`id` int(11) NOT NULL,\n);\nCREATE TABLE `orders` (\n`id` int(11) NOT NULL,\n);";

    #[test]
    fn test_dump_to_csv_with_filter() {
        let csv = dump_to_csv(DUMP, Some("ORD".to_string())).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("orders,id,int(11),YES"));

        assert_eq!(dump_to_csv(DUMP, Some("nothing".to_string())), None);
    }

    #[test]
    fn test_dump_to_json() {
        let json = dump_to_json(DUMP, None).unwrap();
        assert!(json.starts_with(r#"{"users":[{"name":"id","dataType":"int(11)","nullable":false"#));
        assert!(json.contains(r#""orders":"#));
    }
}
