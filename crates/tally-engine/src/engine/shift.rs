//! Reference shifting for fill, copy and paste.
//!
//! Every relative axis of every reference moves by the delta; `$`-anchored
//! axes stay put. Dragging `=A2` from B2 to B3 gives `=A3`, `=$A$2` stays
//! `=$A$2`, and `=$A2` becomes `=$A3`.
//!
//! Rules:
//! - a reference pushed left of column A or above row 1 becomes `#REF!`
//! - a range with either corner pushed off the grid becomes `#REF!`
//! - operators, function names and literals are never altered

use super::ast::Expr;
use super::cell_ref::Delta;

/// Return a copy of `expr` with all relative references offset by `delta`.
pub fn shift(expr: &Expr, delta: Delta) -> Expr {
    match expr {
        Expr::Ref(reference) => reference
            .shifted(delta)
            .map_or(Expr::InvalidRef, Expr::Ref),
        Expr::Range(start, end) => match (start.shifted(delta), end.shifted(delta)) {
            (Some(start), Some(end)) => Expr::Range(start, end),
            _ => Expr::InvalidRef,
        },
        Expr::BinOp { op, lhs, rhs } => Expr::binary(*op, shift(lhs, delta), shift(rhs, delta)),
        Expr::Call {
            name,
            args,
            separators,
        } => Expr::Call {
            name: name.clone(),
            args: args.iter().map(|arg| shift(arg, delta)).collect(),
            separators: separators.clone(),
        },
        Expr::Group(inner) => Expr::Group(Box::new(shift(inner, delta))),
        Expr::Int { .. }
        | Expr::Float { .. }
        | Expr::Str(_)
        | Expr::InvalidRef
        | Expr::ParseFailure { .. } => expr.clone(),
    }
}
