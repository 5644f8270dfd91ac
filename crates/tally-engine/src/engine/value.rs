//! Evaluated cell values and numeric coercion.

use super::ast::BinaryOp;
use super::error::EvalError;

/// Eighth-block glyphs used to draw bar gauges, emptiest first.
pub const BAR_BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// A gauge value. Clamped to [0, 1] only when rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar(pub f64);

impl Bar {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Draw the gauge `width` characters wide.
    pub fn render(&self, width: usize) -> String {
        let steps = BAR_BLOCKS.len() - 1;
        let value = if self.0.is_nan() { 0.0 } else { self.0.clamp(0.0, 1.0) };
        let x = (value * (width * steps) as f64).round_ties_even() as usize;
        let (full, partial) = (x / steps, x % steps);
        let full_block = BAR_BLOCKS[steps];

        let mut out: String = std::iter::repeat_n(full_block, full).collect();
        if full < width {
            out.push(BAR_BLOCKS[partial]);
            out.extend(std::iter::repeat_n(BAR_BLOCKS[0], width - full - 1));
        }
        out
    }
}

/// What a cell resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bar(Bar),
    /// No cell at this coordinate.
    Empty,
    Error(EvalError),
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Coerce for arithmetic: absent is 0, strings are a type error and
    /// error values are re-raised.
    pub fn to_number(&self) -> Result<Number, EvalError> {
        match self {
            Value::Int(n) => Ok(Number::Int(*n)),
            Value::Float(n) => Ok(Number::Float(*n)),
            Value::Bar(bar) => Ok(Number::Float(bar.value())),
            Value::Empty => Ok(Number::Int(0)),
            Value::Str(s) => Err(EvalError::Type(s.clone())),
            Value::Error(err) => Err(err.clone()),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(n) => Value::Int(n),
            Number::Float(n) => Value::Float(n),
        }
    }
}

impl From<Result<Value, EvalError>> for Value {
    fn from(result: Result<Value, EvalError>) -> Self {
        result.unwrap_or_else(Value::Error)
    }
}

/// A numeric operand. Integer arithmetic stays integral until it overflows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(n) => *n,
        }
    }

    pub fn apply(self, op: BinaryOp, rhs: Number) -> Result<Number, EvalError> {
        match op {
            BinaryOp::Add => Ok(self.int_or_float(rhs, i64::checked_add, |a, b| a + b)),
            BinaryOp::Sub => Ok(self.int_or_float(rhs, i64::checked_sub, |a, b| a - b)),
            BinaryOp::Mul => Ok(self.int_or_float(rhs, i64::checked_mul, |a, b| a * b)),
            BinaryOp::Div => {
                let divisor = rhs.as_f64();
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(Number::Float(self.as_f64() / divisor))
            }
        }
    }

    pub fn pow(self, exponent: Number) -> Result<Number, EvalError> {
        if let (Number::Int(base), Number::Int(exp)) = (self, exponent)
            && exp >= 0
        {
            let exact = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e));
            return Ok(exact.map_or_else(
                || Number::Float((base as f64).powf(exp as f64)),
                Number::Int,
            ));
        }

        let (base, exp) = (self.as_f64(), exponent.as_f64());
        if base == 0.0 && exp < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Float(base.powf(exp)))
    }

    fn int_or_float(
        self,
        rhs: Number,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, rhs)
            && let Some(n) = int_op(a, b)
        {
            return Number::Int(n);
        }
        Number::Float(float_op(self.as_f64(), rhs.as_f64()))
    }
}
