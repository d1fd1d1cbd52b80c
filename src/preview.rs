//! Fixed-width text preview of a table's columns.

use crate::catalog::ColumnSpec;
use crate::export::{COLUMN_HEADER, column_row};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

pub struct PreviewRenderer {
    /// Cells wider than this are truncated with an ellipsis.
    pub max_cell_width: usize,
    pub column_gap: usize,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self {
            max_cell_width: 40,
            column_gap: 2,
        }
    }
}

impl PreviewRenderer {
    pub fn render(&self, table: &str, columns: &[ColumnSpec]) -> String {
        let rows: Vec<Vec<String>> = columns
            .iter()
            .map(|col| column_row(col).iter().map(|v| self.clip(v)).collect())
            .collect();

        let mut widths: Vec<usize> = COLUMN_HEADER.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }

        let mut out = String::new();
        writeln!(&mut out, "{} ({} columns)", table, columns.len()).unwrap();

        let header: Vec<String> = COLUMN_HEADER.iter().map(|h| h.to_string()).collect();
        self.write_row(&mut out, &header, &widths);

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        self.write_row(&mut out, &rule, &widths);

        for row in &rows {
            self.write_row(&mut out, row, &widths);
        }
        out
    }

    fn write_row(&self, out: &mut String, cells: &[String], widths: &[usize]) {
        let mut line = String::new();
        for (i, (cell, &w)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(self.column_gap));
            }
            line.push_str(cell);
            line.push_str(&" ".repeat(w.saturating_sub(cell.width())));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    /// Shorten `text` to at most `max_cell_width` display columns.
    fn clip(&self, text: &str) -> String {
        if text.width() <= self.max_cell_width {
            return text.to_string();
        }

        let budget = self.max_cell_width.saturating_sub(1);
        let mut clipped = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            clipped.push(c);
        }
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_alignment() {
        let mut id = ColumnSpec::new("id", "int(11)");
        id.nullable = false;
        id.is_primary_key = true;
        let columns = vec![id, ColumnSpec::new("email", "varchar(255)")];

        let out = PreviewRenderer::default().render("users", &columns);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "users (2 columns)");
        assert!(lines[1].starts_with("Column Name  Data Type     Not Null"));
        assert!(lines[2].starts_with("-----------  ------------  --------"));
        assert!(lines[3].starts_with("id           int(11)       YES"));
        assert!(lines[4].starts_with("email        varchar(255)  NO"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_wide_characters_measured_by_display_width() {
        let mut col = ColumnSpec::new("名前", "varchar(10)");
        col.comment = "'表示名'".to_string();
        let out = PreviewRenderer::default().render("t", &[col]);
        let lines: Vec<&str> = out.lines().collect();

        // "名前" is 4 columns wide, padded to the 11-wide header
        assert!(lines[3].starts_with("名前         varchar(10)"));
    }

    #[test]
    fn test_clip_long_cells() {
        let renderer = PreviewRenderer {
            max_cell_width: 8,
            column_gap: 1,
        };
        assert_eq!(renderer.clip("short"), "short");
        assert_eq!(renderer.clip("ON UPDATE CURRENT_TIMESTAMP"), "ON UPDA…");
        assert_eq!(renderer.clip("全角文字列です"), "全角文…");
    }
}
