//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellContent`] - What the raw text parsed into (number, text, or formula)
//! - [`Cell`] - Raw source text plus its parsed form
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)
//! - [`ValueCache`] - Memoized evaluation results for formula cells

use dashmap::DashMap;
use std::sync::Arc;

use super::ast::Expr;
use super::cell_ref::CellRef;
use super::parser::parse_formula;
use super::value::Value;

/// Leading character that marks cell text as a formula.
pub const FORMULA_MARKER: char = '=';

/// What a cell's raw text parsed into.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Int(i64),
    Float(f64),
    Text(String),
    Formula(Arc<Expr>),
}

impl CellContent {
    /// Classify raw input.
    /// - Starts with '=' -> Formula (parsed from the text after '=')
    /// - Integer, surrounding whitespace allowed -> Int
    /// - Float, surrounding whitespace allowed -> Float
    /// - Otherwise -> Text
    pub fn parse(raw: &str) -> CellContent {
        if let Some(formula) = raw.strip_prefix(FORMULA_MARKER) {
            return CellContent::Formula(Arc::new(parse_formula(formula)));
        }

        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return CellContent::Int(n);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return CellContent::Float(n);
        }
        CellContent::Text(raw.to_string())
    }

    /// The value of a literal cell; None for formulas, which need evaluating.
    pub fn literal_value(&self) -> Option<Value> {
        match self {
            CellContent::Int(n) => Some(Value::Int(*n)),
            CellContent::Float(n) => Some(Value::Float(*n)),
            CellContent::Text(s) => Some(Value::Str(s.clone())),
            CellContent::Formula(_) => None,
        }
    }

    pub fn formula(&self) -> Option<&Arc<Expr>> {
        match self {
            CellContent::Formula(expr) => Some(expr),
            _ => None,
        }
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub raw: String,
    pub content: CellContent,
}

impl Cell {
    /// Build a cell from user input. Empty input means "no cell".
    pub fn from_input(raw: &str) -> Option<Cell> {
        if raw.is_empty() {
            return None;
        }
        Some(Cell {
            raw: raw.to_string(),
            content: CellContent::parse(raw),
        })
    }
}

/// Sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;

/// Computed values of formula cells for the current edit cycle.
pub type ValueCache = DashMap<CellRef, Value>;
