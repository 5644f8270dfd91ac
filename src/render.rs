//! Fixed-width table rendering of an evaluated sheet.

use crate::config::DisplayConfig;
use tally_core::Sheet;
use tally_engine::engine::{CellRef, align_center, align_right, render_cell};

/// Render the occupied area of `sheet` as text, one line per row plus a
/// header of column letters. An empty sheet renders as nothing.
pub fn render_table(sheet: &Sheet, config: &DisplayConfig) -> String {
    if sheet.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut header = " ".repeat(config.row_header_width);
    for col in 0..sheet.width() {
        header.push_str(&align_center(
            &CellRef::col_to_letters(col),
            config.column_width,
        ));
    }
    push_line(&mut out, &header);

    for row in 0..sheet.height() {
        let mut line = align_right(&(row + 1).to_string(), config.row_header_width);
        for col in 0..sheet.width() {
            let value = sheet.get_value(&CellRef::new(col, row));
            line.push_str(&render_cell(&value, config.column_width));
        }
        push_line(&mut out, &line);
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
