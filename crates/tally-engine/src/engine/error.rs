//! Error types for parsing and evaluating formulas.
//!
//! Errors are ordinary values: a failed parse is kept inside the AST and a
//! failed evaluation is cached as the cell's value, so every type here is
//! `Clone + PartialEq`.

use thiserror::Error;

use super::cell_ref::CellRef;

/// Formula text did not match the grammar.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{message}{}", tail_suffix(.tail))]
pub struct ParseError {
    pub message: String,
    /// Unconsumed input at the point of failure.
    pub tail: String,
}

fn tail_suffix(tail: &str) -> String {
    if tail.is_empty() {
        String::new()
    } else {
        format!(": {}", tail)
    }
}

impl ParseError {
    pub fn new(message: impl Into<String>, tail: &str) -> ParseError {
        ParseError {
            message: message.into(),
            tail: tail.to_string(),
        }
    }
}

/// Malformed reference text handed to the reference codec.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid reference: {0}")]
pub struct InvalidReference(pub String);

/// Why a cell could not be evaluated.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum EvalError {
    #[error("#PARSE! {0}")]
    Parse(ParseError),

    /// The cycle sentinel: evaluation of this cell reached itself.
    #[error("#CYCLE! {0}")]
    ReferenceCycle(CellRef),

    /// A chain of formula references nested deeper than the evaluator allows.
    #[error("#DEPTH! references nested more than {0} cells deep")]
    DepthExceeded(usize),

    #[error("#TYPE! expected a number, found {0:?}")]
    Type(String),

    #[error("#ARITY! {function} takes {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("#NAME? {0}")]
    UnknownFunction(String),

    #[error("#REF! {0}")]
    InvalidReference(String),

    #[error("#VALUE! {0} expects a range")]
    ExpectedRange(String),

    #[error("#VALUE! range outside of a range function")]
    UnexpectedRange,

    #[error("#DIV/0!")]
    DivisionByZero,
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        EvalError::Parse(err)
    }
}

impl From<InvalidReference> for EvalError {
    fn from(err: InvalidReference) -> Self {
        EvalError::InvalidReference(err.0)
    }
}
