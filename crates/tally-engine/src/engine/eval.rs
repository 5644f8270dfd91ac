//! Tree-walking formula evaluation.
//!
//! The evaluator is pure: every cell lookup goes through [`CellValues`], so
//! memoization and cycle handling live with whoever owns the grid.

use super::ast::Expr;
use super::cell_ref::CellRef;
use super::error::EvalError;
use super::value::{Number, Value};

/// Source of cell values during evaluation.
pub trait CellValues {
    fn cell_value(&self, cell: &CellRef) -> Value;
}

/// Evaluate `expr`. Errors from any sub-expression propagate unchanged.
pub fn evaluate<C: CellValues + ?Sized>(expr: &Expr, cells: &C) -> Result<Value, EvalError> {
    match expr {
        Expr::Int { value, .. } => Ok(Value::Int(*value)),
        Expr::Float { value, .. } => Ok(Value::Float(*value)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Ref(reference) => resolve(cells, &reference.cell),
        Expr::Range(..) => Err(EvalError::UnexpectedRange),
        Expr::Group(inner) => evaluate(inner, cells),
        Expr::InvalidRef => Err(EvalError::InvalidReference(
            super::parser::INVALID_REF.to_string(),
        )),
        Expr::ParseFailure { error, .. } => Err(EvalError::Parse(error.clone())),
        Expr::BinOp { op, lhs, rhs } => {
            let lhs = evaluate_number(lhs, cells)?;
            let rhs = evaluate_number(rhs, cells)?;
            Ok(lhs.apply(*op, rhs)?.into())
        }
        Expr::Call { name, args, .. } => crate::builtins::call(name, args, cells),
    }
}

/// Evaluate and coerce to a number.
pub fn evaluate_number<C: CellValues + ?Sized>(
    expr: &Expr,
    cells: &C,
) -> Result<Number, EvalError> {
    evaluate(expr, cells)?.to_number()
}

/// Look up a cell, turning a stored error value back into an error.
pub(crate) fn resolve<C: CellValues + ?Sized>(
    cells: &C,
    cell: &CellRef,
) -> Result<Value, EvalError> {
    match cells.cell_value(cell) {
        Value::Error(err) => Err(err),
        value => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::{parse, parse_formula};
    use std::collections::HashMap;

    struct Fixed(HashMap<CellRef, Value>);

    impl CellValues for Fixed {
        fn cell_value(&self, cell: &CellRef) -> Value {
            self.0.get(cell).cloned().unwrap_or(Value::Empty)
        }
    }

    fn eval_with(formula: &str, cells: &[(&str, Value)]) -> Result<Value, EvalError> {
        let map = cells
            .iter()
            .map(|(name, value)| (name.parse::<CellRef>().unwrap(), value.clone()))
            .collect();
        evaluate(&parse(formula).unwrap(), &Fixed(map))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_with("1+2*3", &[]), Ok(Value::Int(7)));
        assert_eq!(eval_with("(1+2)*3", &[]), Ok(Value::Int(9)));
        assert_eq!(eval_with("10-4-3", &[]), Ok(Value::Int(3)));
        assert_eq!(eval_with("7/2", &[]), Ok(Value::Float(3.5)));
        assert_eq!(eval_with("1/0", &[]), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_references_and_absent_cells() {
        let cells = [("A1", Value::Int(5)), ("B1", Value::Float(0.5))];
        assert_eq!(eval_with("A1+B1", &cells), Ok(Value::Float(5.5)));
        assert_eq!(eval_with("Z9+1", &cells), Ok(Value::Int(1)));
        assert_eq!(eval_with("Z9", &cells), Ok(Value::Empty));
    }

    #[test]
    fn test_strings_in_arithmetic_are_type_errors() {
        let cells = [("A1", Value::Str("abc".to_string()))];
        assert_eq!(eval_with("A1", &cells), Ok(Value::Str("abc".to_string())));
        assert_eq!(
            eval_with("A1*2", &cells),
            Err(EvalError::Type("abc".to_string()))
        );
        assert_eq!(
            eval_with("\"x\"+1", &[]),
            Err(EvalError::Type("x".to_string()))
        );
    }

    #[test]
    fn test_cell_errors_propagate() {
        let cells = [("A1", Value::Error(EvalError::DivisionByZero))];
        assert_eq!(eval_with("A1", &cells), Err(EvalError::DivisionByZero));
        assert_eq!(eval_with("(A1)+1", &cells), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_special_nodes() {
        assert_eq!(eval_with("A1:A2", &[]), Err(EvalError::UnexpectedRange));
        assert_eq!(
            eval_with("#REF!+1", &[]),
            Err(EvalError::InvalidReference("#REF!".to_string()))
        );
        let failure = parse_formula("1+");
        assert!(matches!(
            evaluate(&failure, &Fixed(HashMap::new())),
            Err(EvalError::Parse(_))
        ));
    }
}
