use super::Sheet;
use tally_engine::engine::{
    Cell, CellRange, CellRef, Delta, FORMULA_MARKER, parse, shift, unparse,
};
use tracing::trace;

/// Raw cell text captured by [`Sheet::copy_range`].
#[derive(Clone, Debug, PartialEq)]
pub struct Clipboard {
    /// Top-left corner of the copied rectangle.
    pub origin: CellRef,
    /// Raw text, one inner vector per row.
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Set cell contents from input text. Empty text deletes the cell.
    pub fn set(&mut self, cell: CellRef, raw: &str) {
        self.invalidate();
        match Cell::from_input(raw) {
            Some(new_cell) => {
                self.cells.insert(cell, new_cell);
                self.grow_bounds(&cell);
            }
            None => {
                if self.cells.remove(&cell).is_some() {
                    self.recompute_bounds();
                }
            }
        }
    }

    /// Delete a cell. Same as setting it to empty text.
    pub fn delete(&mut self, cell: CellRef) {
        self.set(cell, "");
    }

    /// Store `raw` at `cell`, moving the relative references of a formula
    /// by `delta`. Non-formula text, and formulas that fail to parse, are
    /// stored unchanged. Returns the text actually stored.
    pub fn set_shifted(&mut self, cell: CellRef, raw: &str, delta: Delta) -> String {
        let text = match raw.strip_prefix(FORMULA_MARKER) {
            Some(formula) => match parse(formula) {
                Ok(expr) => format!("{}{}", FORMULA_MARKER, unparse(&shift(&expr, delta))),
                Err(_) => raw.to_string(),
            },
            None => raw.to_string(),
        };
        self.set(cell, &text);
        text
    }

    /// Drag-fill: copy the raw text of `source` over the rectangle spanned by
    /// `source` and `target`, shifting formulas by each cell's offset from `source`.
    pub fn fill(&mut self, source: CellRef, target: CellRef) {
        let raw = self.get_raw(&source);
        for cell in CellRange::new(source, target).iter() {
            self.set_shifted(cell, &raw, Delta::between(&source, &cell));
        }
    }

    /// Capture the raw text of the rectangle between `a` and `b`.
    pub fn copy_range(&self, a: CellRef, b: CellRef) -> Clipboard {
        let range = CellRange::new(a, b);
        let origin = range.top_left();
        let rows = (0..range.height())
            .map(|dy| {
                (0..range.width())
                    .map(|dx| self.get_raw(&CellRef::new(origin.col + dx, origin.row + dy)))
                    .collect()
            })
            .collect();
        Clipboard { origin, rows }
    }

    /// Write a clipboard with its top-left corner at `at`. Formulas move by
    /// the offset between `at` and the clipboard origin; empty entries delete.
    pub fn paste(&mut self, at: CellRef, clipboard: &Clipboard) {
        let delta = Delta::between(&clipboard.origin, &at);
        for (dy, row) in clipboard.rows.iter().enumerate() {
            for (dx, raw) in row.iter().enumerate() {
                self.set_shifted(CellRef::new(at.col + dx, at.row + dy), raw, delta);
            }
        }
    }

    /// Delete every cell in the rectangle between `a` and `b`.
    pub fn clear_range(&mut self, a: CellRef, b: CellRef) {
        let range = CellRange::new(a, b);
        let doomed: Vec<CellRef> = self
            .cells
            .iter()
            .map(|entry| *entry.key())
            .filter(|cell| range.contains(cell))
            .collect();
        for cell in doomed {
            self.delete(cell);
        }
    }

    /// Forget every computed value.
    pub(crate) fn invalidate(&mut self) {
        if !self.value_cache.is_empty() {
            trace!(entries = self.value_cache.len(), "invalidating value cache");
            self.value_cache.clear();
        }
    }
}
