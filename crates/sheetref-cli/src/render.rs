//! Plain-text rendering of sheets.

use sheetref_core::{Sheet, Table};

/// Render a sheet as an aligned text table.
///
/// The first column holds 1-based row numbers starting at `first_row`, the
/// header line holds column headers (or letters when the sheet has none).
pub fn render_sheet(sheet: &Sheet, first_row: usize) -> String {
    let (n_rows, n_cols) = sheet.shape();

    let header: Vec<String> = (0..n_cols).map(|c| sheet.column_name(c)).collect();
    let body: Vec<Vec<String>> = sheet
        .rows()
        .map(|row| row.iter().map(|v| v.as_text()).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }
    let index_width = (first_row + n_rows.saturating_sub(1)).to_string().len();

    let mut out = String::new();
    push_line(&mut out, &" ".repeat(index_width), &header, &widths);
    for (i, row) in body.iter().enumerate() {
        push_line(&mut out, &format!("{:>index_width$}", first_row + i), row, &widths);
    }
    out
}

fn push_line(out: &mut String, index: &str, cells: &[String], widths: &[usize]) {
    let mut line = index.to_string();
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str("  ");
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(width - cell.chars().count()));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_with_headers() {
        let sheet = Sheet::from_text_rows("t", [["Ada", "36"], ["Grace", "45"]])
            .with_headers(["name", "age"]);
        assert_eq!(
            render_sheet(&sheet, 1),
            "   name   age\n1  Ada    36\n2  Grace  45\n"
        );
    }

    #[test]
    fn test_render_letters_and_offset() {
        let sheet = Sheet::from_text_rows("t", [["x", "y"]]);
        assert_eq!(render_sheet(&sheet, 9), "   A  B\n9  x  y\n");

        let sheet = Sheet::from_text_rows("t", [["x"], ["y"]]);
        assert_eq!(render_sheet(&sheet, 9), "    A\n 9  x\n10  y\n");
    }
}
