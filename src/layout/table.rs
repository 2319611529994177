//! Fixed-column table formatting.
//!
//! A receipt table becomes a block of monospace lines: the first column
//! (the item description) is word-wrapped, the others are justified into
//! fixed widths and separated by single spaces.
//!
//! ```text
//! Coffee                      2     3.50     7.00
//! Large Iced Caramel          1     5.25     5.25
//!   Macchiato
//! ```

use serde::{Deserialize, Serialize};

use super::wrap::{justify_left, justify_right, wrap_and_indent};
use crate::markup::{Node, decode_entities};

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub const fn left(width: usize) -> Self {
        Self {
            width,
            align: Align::Left,
        }
    }

    pub const fn right(width: usize) -> Self {
        Self {
            width,
            align: Align::Right,
        }
    }
}

/// Column layout for receipt tables: item, quantity, rate, amount.
pub const RECEIPT_COLUMNS: [Column; 4] = [
    Column::left(24),
    Column::right(4),
    Column::right(8),
    Column::right(8),
];

/// Separator between columns.
pub const COLUMN_SEPARATOR: &str = " ";

/// Default hanging indent for wrapped item names.
pub const DEFAULT_ITEM_INDENT: usize = 2;

/// How tables are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Columns in order; the first one wraps
    pub columns: Vec<Column>,
    /// Spaces prefixed to continuation lines of the item column
    pub item_indent: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            columns: RECEIPT_COLUMNS.to_vec(),
            item_indent: DEFAULT_ITEM_INDENT,
        }
    }
}

impl TableLayout {
    /// Width of a full row: all columns plus separators.
    pub fn row_width(&self) -> usize {
        let columns: usize = self.columns.iter().map(|c| c.width).sum();
        columns + self.columns.len().saturating_sub(1) * COLUMN_SEPARATOR.len()
    }

    /// Format one row of cell texts.
    ///
    /// Missing cells are empty and extra cells are ignored. Returns the
    /// first line (all columns) followed by any continuation lines of the
    /// wrapped item column.
    pub fn format_row(&self, cells: &[String]) -> Vec<String> {
        let Some((item_column, rest)) = self.columns.split_first() else {
            return Vec::new();
        };
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

        let indent = " ".repeat(self.item_indent);
        let mut item_lines = wrap_and_indent(cell(0), item_column.width, &indent).into_iter();

        let mut first = item_lines.next().unwrap_or_default();
        for (i, column) in rest.iter().enumerate() {
            first.push_str(COLUMN_SEPARATOR);
            let text = cell(i + 1);
            first.push_str(&match column.align {
                Align::Left => justify_left(text, column.width),
                Align::Right => justify_right(text, column.width),
            });
        }

        let mut lines = vec![first];
        lines.extend(item_lines);
        lines
    }

    /// Format a `table` element into pre-formatted lines.
    ///
    /// Rows are the `tr` elements of the table; rows of nested tables are
    /// not rows of this table (their text ends up inside the enclosing cell).
    pub fn format_table(&self, table: &Node) -> Vec<String> {
        let mut lines = Vec::new();
        for row in table.find_all("tr", &["table"]) {
            let mut cells = Vec::new();
            collect_cells(row, &mut cells);
            let cells: Vec<String> = cells.into_iter().map(cell_text).collect();
            lines.extend(self.format_row(&cells));
        }
        lines
    }
}

/// Cell text with tags stripped and whitespace runs collapsed.
fn cell_text(cell: &Node) -> String {
    decode_entities(&cell.text_content())
        .split(|c: char| c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `td` and `th` cells of a row, in document order.
fn collect_cells<'a>(node: &'a Node, cells: &mut Vec<&'a Node>) {
    for child in node.children() {
        match child.tag() {
            Some("td") | Some("th") => cells.push(child),
            Some("table") => {}
            Some(_) => collect_cells(child, cells),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn first_table(markup_text: &str) -> Node {
        markup::parse(markup_text).children()[0].clone()
    }

    #[test]
    fn test_receipt_row_width() {
        assert_eq!(TableLayout::default().row_width(), 47);
    }

    #[test]
    fn test_single_line_row() {
        let lines = TableLayout::default().format_row(&cells(&["Coffee", "2", "3.50", "7.00"]));
        assert_eq!(
            lines,
            vec!["Coffee                      2     3.50     7.00"]
        );
        assert_eq!(lines[0].len(), 47);
    }

    #[test]
    fn test_missing_cells_default_to_empty() {
        let lines = TableLayout::default().format_row(&cells(&["Tea"]));
        assert_eq!(lines, vec![format!("{:<24}{}", "Tea", " ".repeat(23))]);
    }

    #[test]
    fn test_extra_cells_ignored() {
        let lines =
            TableLayout::default().format_row(&cells(&["Tea", "1", "2.00", "2.00", "extra"]));
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("extra"));
    }

    #[test]
    fn test_long_item_wraps_under_item_column() {
        let lines = TableLayout::default().format_row(&cells(&[
            "Large Iced Caramel Macchiato with Oat Milk",
            "1",
            "5.25",
            "5.25",
        ]));
        assert_eq!(
            lines,
            vec![
                "Large Iced Caramel          1     5.25     5.25",
                "  Macchiato with Oat    ",
                "  Milk                  ",
            ]
        );
    }

    #[test]
    fn test_full_column_indent_is_accepted() {
        let layout = TableLayout {
            item_indent: 24,
            ..Default::default()
        };
        let lines = layout.format_row(&cells(&["Extra Long Item Name To Wrap", "1", "1.00", "1.00"]));
        assert!(lines[0].starts_with("Extra Long Item Name To "));
        assert!(lines.len() > 1);
        assert!(lines[1..].iter().all(|l| l.len() == 24));
        // The indent fills the column, so continuation text is cut off
        assert!(lines[1..].iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_left_aligned_extra_column() {
        let layout = TableLayout {
            columns: vec![Column::left(6), Column::left(4)],
            item_indent: 0,
        };
        assert_eq!(layout.format_row(&cells(&["ab", "c"])), vec!["ab     c   "]);
        assert_eq!(layout.row_width(), 11);
    }

    #[test]
    fn test_format_table_from_markup() {
        let table = first_table(
            "<table>
                <tr><th>Item</th><th>Qty</th><th>Rate</th><th>Amount</th></tr>
                <tr><td>Coffee</td><td>2</td><td>3.50</td><td>7.00</td></tr>
            </table>",
        );
        let lines = TableLayout::default().format_table(&table);
        assert_eq!(
            lines,
            vec![
                "Item                      Qty     Rate   Amount",
                "Coffee                      2     3.50     7.00",
            ]
        );
    }

    #[test]
    fn test_cell_markup_is_stripped() {
        let table = first_table(
            "<table><tr><td> <b>Bagel</b>\n  with  cream cheese </td><td>1</td></tr></table>",
        );
        let lines = TableLayout::default().format_table(&table);
        assert!(lines[0].starts_with("Bagel with cream cheese "));
    }

    #[test]
    fn test_nested_table_rows_stay_in_cell() {
        let table = first_table(
            "<table><tr><td>Combo<table><tr><td>side</td></tr></table></td><td>1</td></tr></table>",
        );
        let lines = TableLayout::default().format_table(&table);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Comboside"));
    }

    #[test]
    fn test_table_without_rows() {
        let table = first_table("<table></table>");
        assert!(TableLayout::default().format_table(&table).is_empty());
    }
}
