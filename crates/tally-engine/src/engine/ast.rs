//! Formula abstract syntax tree.

use super::cell_ref::Reference;
use super::error::ParseError;

/// Binary arithmetic operators, in two precedence tiers.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<BinaryOp> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

/// A parsed formula.
///
/// Number literals keep their source spelling so that unparsing an unshifted
/// formula reproduces it byte for byte.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Int {
        value: i64,
        text: String,
    },
    Float {
        value: f64,
        text: String,
    },
    Str(String),
    Ref(Reference),
    Range(Reference, Reference),
    BinOp {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `separators[i]` is the text between `args[i]` and `args[i + 1]`.
    Call {
        name: String,
        args: Vec<Expr>,
        separators: Vec<String>,
    },
    Group(Box<Expr>),
    /// `#REF!`: a reference that was shifted off the grid.
    InvalidRef,
    /// Formula text that failed to parse; evaluating it yields the error.
    ParseFailure {
        source: String,
        error: ParseError,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Expr::ParseFailure { .. })
    }

    /// All references in the expression, range corners included, in source order.
    pub fn references(&self) -> Vec<Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<Reference>) {
        match self {
            Expr::Ref(reference) => out.push(*reference),
            Expr::Range(a, b) => {
                out.push(*a);
                out.push(*b);
            }
            Expr::BinOp { lhs, rhs, .. } => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_references(out);
                }
            }
            Expr::Group(inner) => inner.collect_references(out),
            Expr::Int { .. }
            | Expr::Float { .. }
            | Expr::Str(_)
            | Expr::InvalidRef
            | Expr::ParseFailure { .. } => {}
        }
    }
}
