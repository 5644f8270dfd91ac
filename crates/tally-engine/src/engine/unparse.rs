//! Render an AST back to formula text.
//!
//! Literals use their source spelling, references their `$` anchors, calls
//! their captured separators and groups their parentheses. Operators are
//! written without surrounding whitespace.

use std::fmt;

use super::ast::Expr;
use super::parser::INVALID_REF;

/// Formula text for `expr`, without the leading `=`.
pub fn unparse(expr: &Expr) -> String {
    expr.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int { text, .. } | Expr::Float { text, .. } => f.write_str(text),
            Expr::Str(s) => write!(f, "\"{}\"", s),
            Expr::Ref(reference) => write!(f, "{}", reference),
            Expr::Range(start, end) => write!(f, "{}:{}", start, end),
            Expr::BinOp { op, lhs, rhs } => write!(f, "{}{}{}", lhs, op.symbol(), rhs),
            Expr::Call {
                name,
                args,
                separators,
            } => {
                write!(f, "{}(", name)?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(separators.get(idx - 1).map_or(",", String::as_str))?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Group(inner) => write!(f, "({})", inner),
            Expr::InvalidRef => f.write_str(INVALID_REF),
            Expr::ParseFailure { source, .. } => f.write_str(source),
        }
    }
}
