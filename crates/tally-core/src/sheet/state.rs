use std::cell::Cell as Counter;
use tally_engine::engine::{CellContent, CellRef, Grid, ValueCache};

/// Formula cells that may be mid-evaluation at once before reads give up
/// with `EvalError::DepthExceeded`.
pub const MAX_EVAL_DEPTH: usize = 256;

/// The cell store: raw and parsed cell contents plus the value cache.
///
/// The cache holds the values computed since the last edit. Every write
/// clears it in full, so a read after an edit recomputes from scratch.
#[derive(Debug)]
pub struct Sheet {
    /// Occupied cells only; empty input removes the entry.
    pub(crate) cells: Grid,
    /// Values computed in the current edit cycle, cycle sentinels included.
    pub(crate) value_cache: ValueCache,
    /// One past the rightmost occupied column.
    pub(crate) width: usize,
    /// One past the lowest occupied row.
    pub(crate) height: usize,
    /// Formula evaluations currently on the stack.
    pub(crate) eval_depth: Counter<usize>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Sheet {
            cells: Grid::new(),
            value_cache: ValueCache::new(),
            width: 0,
            height: 0,
            eval_depth: Counter::new(0),
        }
    }

    /// Raw text of a cell; empty when the cell is absent.
    pub fn get_raw(&self, cell: &CellRef) -> String {
        self.cells
            .get(cell)
            .map(|c| c.raw.clone())
            .unwrap_or_default()
    }

    /// Parsed form of a cell, if present.
    pub fn get_parsed(&self, cell: &CellRef) -> Option<CellContent> {
        self.cells.get(cell).map(|c| c.content.clone())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied coordinates in row-major order.
    pub fn cells(&self) -> Vec<CellRef> {
        let mut out: Vec<CellRef> = self.cells.iter().map(|entry| *entry.key()).collect();
        out.sort();
        out
    }

    /// Drop every cell and cached value.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.value_cache.clear();
        self.width = 0;
        self.height = 0;
    }

    pub(crate) fn grow_bounds(&mut self, cell: &CellRef) {
        self.width = self.width.max(cell.col + 1);
        self.height = self.height.max(cell.row + 1);
    }

    /// Recompute width/height from the live cell set.
    pub(crate) fn recompute_bounds(&mut self) {
        let (width, height) = self.cells.iter().fold((0, 0), |(w, h), entry| {
            let cell = entry.key();
            (w.max(cell.col + 1), h.max(cell.row + 1))
        });
        self.width = width;
        self.height = height;
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
