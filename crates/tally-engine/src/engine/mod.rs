//! Spreadsheet engine API.
//!
//! This module provides the formula language and its evaluation:
//!
//! - [`CellRef`], [`Reference`], [`CellRange`] - A1 notation codec and shifting
//! - [`parse`], [`parse_formula`] - Recursive-descent formula parser
//! - [`shift`] - Relative reference adjustment for copy/fill
//! - [`unparse`] - Canonical formula text from an [`Expr`]
//! - [`evaluate`] - Tree-walking evaluation over any [`CellValues`]
//! - [`Cell`], [`Grid`], [`ValueCache`] - Data structures for cell storage
//! - [`format_value`], [`render_cell`] - Value display

mod ast;
mod cell;
mod cell_ref;
mod error;
mod eval;
mod format;
mod parser;
mod shift;
#[cfg(test)]
mod strategies;
mod unparse;
mod value;

pub use ast::{BinaryOp, Expr};
pub use cell::{Cell, CellContent, FORMULA_MARKER, Grid, ValueCache};
pub use cell_ref::{
    AbsFlags, CellRange, CellRef, Delta, Reference, column_to_index, index_to_column,
    parse_reference,
};
pub use error::{EvalError, InvalidReference, ParseError};
pub use eval::{CellValues, evaluate, evaluate_number};
pub(crate) use eval::resolve;
pub use format::{
    OVERFLOW, align_center, align_left, align_right, format_float, format_general, format_value,
    render_cell,
};
pub use parser::{INVALID_REF, ParseResult, Parser, parse, parse_formula};
pub use shift::shift;
pub use unparse::unparse;
pub use value::{BAR_BLOCKS, Bar, Number, Value};
