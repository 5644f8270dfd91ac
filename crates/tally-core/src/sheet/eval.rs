use super::Sheet;
use super::state::MAX_EVAL_DEPTH;
use tally_engine::engine::{CellRef, CellValues, EvalError, Value, evaluate};
use tracing::{debug, trace};

impl Sheet {
    /// Evaluated value of a cell.
    ///
    /// Formula results are memoized until the next edit. Before a formula is
    /// evaluated a `ReferenceCycle` sentinel is stored under its coordinate,
    /// so a formula that reads itself, directly or through other cells, sees
    /// the sentinel instead of recursing.
    ///
    /// Each formula read while another is being evaluated nests one level
    /// deeper. Past [`MAX_EVAL_DEPTH`] levels the innermost read returns
    /// `DepthExceeded`, which then propagates and is cached like any error.
    pub fn get_value(&self, cell: &CellRef) -> Value {
        if let Some(cached) = self.value_cache.get(cell) {
            if let Value::Error(EvalError::ReferenceCycle(origin)) = cached.value() {
                debug!(cell = %cell, origin = %origin, "reference cycle");
            }
            return cached.value().clone();
        }

        let Some(content) = self.cells.get(cell).map(|c| c.content.clone()) else {
            return Value::Empty;
        };
        if let Some(value) = content.literal_value() {
            return value;
        }
        let Some(expr) = content.formula() else {
            return Value::Empty;
        };

        let depth = self.eval_depth.get();
        if depth >= MAX_EVAL_DEPTH {
            debug!(cell = %cell, depth, "formula chain too deep");
            return Value::Error(EvalError::DepthExceeded(MAX_EVAL_DEPTH));
        }

        self.value_cache
            .insert(*cell, Value::Error(EvalError::ReferenceCycle(*cell)));
        self.eval_depth.set(depth + 1);
        let value: Value = evaluate(expr, self).into();
        self.eval_depth.set(depth);
        trace!(cell = %cell, ?value, "cache fill");
        self.value_cache.insert(*cell, value.clone());
        value
    }
}

impl CellValues for Sheet {
    fn cell_value(&self, cell: &CellRef) -> Value {
        self.get_value(cell)
    }
}
