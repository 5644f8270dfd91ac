//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Function names are matched case-insensitively (`sum`, `SUM`, `Sum`).
//! - Arity is checked before any argument is evaluated.
//! - If you add a new built-in, add it to [`Builtin`] and [`BUILTINS`] and
//!   dispatch it in [`call`].

use crate::engine::{CellRange, CellValues, EvalError, Expr, Number, Value, evaluate_number};
use crate::engine::{Bar, BinaryOp, evaluate, resolve};

/// The fixed set of functions formulas can call.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Builtin {
    Sum,
    Power,
    Bar,
}

pub struct BuiltinSpec {
    pub builtin: Builtin,
    pub name: &'static str,
    pub arity: usize,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const BUILTINS: &[BuiltinSpec] = &[
    BuiltinSpec {
        builtin: Builtin::Sum,
        name: "SUM",
        arity: 1,
        usage: "SUM(A1:B5)",
        description: "Sum of a cell range; empty cells count as 0",
    },
    BuiltinSpec {
        builtin: Builtin::Power,
        name: "POWER",
        arity: 2,
        usage: "POWER(base, exponent)",
        description: "base raised to exponent",
    },
    BuiltinSpec {
        builtin: Builtin::Bar,
        name: "BAR",
        arity: 1,
        usage: "BAR(value)",
        description: "Bar gauge filled to value (0..1)",
    },
];

impl Builtin {
    /// Resolve a function name, ignoring case.
    pub fn lookup(name: &str) -> Option<&'static BuiltinSpec> {
        BUILTINS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

/// Evaluate a call of `name` with unevaluated `args`.
pub(crate) fn call<C: CellValues + ?Sized>(
    name: &str,
    args: &[Expr],
    cells: &C,
) -> Result<Value, EvalError> {
    let spec = Builtin::lookup(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
    if args.len() != spec.arity {
        return Err(EvalError::Arity {
            function: spec.name.to_string(),
            expected: spec.arity,
            found: args.len(),
        });
    }

    match spec.builtin {
        Builtin::Sum => sum_range(spec.name, &args[0], cells),
        Builtin::Power => {
            let base = evaluate_number(&args[0], cells)?;
            let exponent = evaluate_number(&args[1], cells)?;
            Ok(base.pow(exponent)?.into())
        }
        Builtin::Bar => Ok(Value::Bar(Bar(evaluate_number(&args[0], cells)?.as_f64()))),
    }
}

fn sum_range<C: CellValues + ?Sized>(
    name: &str,
    arg: &Expr,
    cells: &C,
) -> Result<Value, EvalError> {
    let Expr::Range(start, end) = arg else {
        // Surface the argument's own error (e.g. `#REF!`) before the shape error.
        evaluate(arg, cells)?;
        return Err(EvalError::ExpectedRange(name.to_string()));
    };

    let mut total = Number::Int(0);
    for cell in CellRange::new(start.cell, end.cell).iter() {
        let n = resolve(cells, &cell)?.to_number()?;
        total = total.apply(BinaryOp::Add, n)?;
    }
    Ok(total.into())
}
