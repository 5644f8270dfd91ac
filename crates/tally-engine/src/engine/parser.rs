//! Recursive-descent formula parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     --> term ( \s*[+-]\s* term )*
//! term    --> primary ( \s*[*/]\s* primary )*
//! primary --> STRING | FLOAT | INT | range | reference | "#REF!"
//!           | call | "(" sum ")"
//! range   --> reference ":" reference
//! call    --> IDENT "(" ( sum ( ",\s*" sum )* )? ")"
//! ```
//!
//! Primary alternatives are tried in the order listed and the first success
//! wins. FLOAT is tried before INT so `12.5` never stops after `12`. Operator
//! chains are folded into left-leaning trees, so `1-2-3` is `(1-2)-3`.

use regex::Regex;
use std::sync::OnceLock;

use super::ast::{BinaryOp, Expr};
use super::cell_ref::parse_reference;
use super::error::ParseError;

pub type ParseResult<T> = Result<T, ParseError>;

/// Text of the `#REF!` marker left behind by an invalid shift.
pub const INVALID_REF: &str = "#REF!";

macro_rules! anchored_re {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("parser regex must compile"))
        }
    };
}

anchored_re!(string_re, r#"^"[^"]*""#);
anchored_re!(float_re, r"^[0-9]+\.[0-9]+");
anchored_re!(int_re, r"^[0-9]+");
anchored_re!(ident_re, r"^[a-zA-Z][a-zA-Z0-9]*");
anchored_re!(sum_op_re, r"^\s*[-+]\s*");
anchored_re!(term_op_re, r"^\s*[*/]\s*");
anchored_re!(separator_re, r"^,\s*");

/// Parse formula text (without the leading `=`).
pub fn parse(text: &str) -> ParseResult<Expr> {
    Parser::new(text).parse()
}

/// Parse formula text, folding any failure into an [`Expr::ParseFailure`]
/// node so the error surfaces when the cell is evaluated.
pub fn parse_formula(text: &str) -> Expr {
    parse(text).unwrap_or_else(|error| Expr::ParseFailure {
        source: text.to_string(),
        error,
    })
}

pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input, pos: 0 }
    }

    /// Parse the whole input; an unconsumed suffix is an error.
    pub fn parse(mut self) -> ParseResult<Expr> {
        if self.input.is_empty() {
            return Err(ParseError::new("empty formula", ""));
        }
        let expr = self.parse_sum()?;
        if !self.rest().is_empty() {
            return Err(self.error("unexpected tail"));
        }
        Ok(expr)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.rest())
    }

    /// Consume a match of an anchored regex.
    fn eat_re(&mut self, re: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let m = re.find(rest)?;
        self.pos += m.end();
        Some(&rest[..m.end()])
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_operator(&mut self, re: &Regex) -> Option<BinaryOp> {
        let start = self.pos;
        let op = self
            .eat_re(re)
            .and_then(|text| text.trim().chars().next())
            .and_then(BinaryOp::from_symbol);
        if op.is_none() {
            self.pos = start;
        }
        op
    }

    fn parse_sum(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_term()?;
        while let Some(op) = self.eat_operator(sum_op_re()) {
            let rhs = self.parse_term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary()?;
        while let Some(op) = self.eat_operator(term_op_re()) {
            let rhs = self.parse_primary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let alternatives: [fn(&mut Self) -> ParseResult<Expr>; 8] = [
            Self::parse_string,
            Self::parse_float,
            Self::parse_int,
            Self::parse_range,
            Self::parse_ref,
            Self::parse_invalid_ref,
            Self::parse_call,
            Self::parse_group,
        ];

        let start = self.pos;
        // Report the failure that got furthest into the input.
        let mut deepest: Option<ParseError> = None;
        for alternative in alternatives {
            match alternative(self) {
                Ok(expr) => return Ok(expr),
                Err(err) => {
                    self.pos = start;
                    if deepest
                        .as_ref()
                        .is_none_or(|best| err.tail.len() < best.tail.len())
                    {
                        deepest = Some(err);
                    }
                }
            }
        }

        match deepest {
            Some(err) if err.tail.len() < self.rest().len() => Err(err),
            _ => Err(self.error("expected an expression")),
        }
    }

    fn parse_string(&mut self) -> ParseResult<Expr> {
        let text = self
            .eat_re(string_re())
            .ok_or_else(|| self.error("expected a string"))?;
        Ok(Expr::Str(text[1..text.len() - 1].to_string()))
    }

    fn parse_float(&mut self) -> ParseResult<Expr> {
        let text = self
            .eat_re(float_re())
            .ok_or_else(|| self.error("expected a float"))?;
        let value = text
            .parse::<f64>()
            .map_err(|_| ParseError::new("invalid float literal", text))?;
        Ok(Expr::Float {
            value,
            text: text.to_string(),
        })
    }

    fn parse_int(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let text = self
            .eat_re(int_re())
            .ok_or_else(|| self.error("expected an integer"))?;
        let value = text
            .parse::<i64>()
            .map_err(|_| ParseError::new("integer literal out of range", &self.input[start..]))?;
        Ok(Expr::Int {
            value,
            text: text.to_string(),
        })
    }

    fn parse_ref(&mut self) -> ParseResult<Expr> {
        let (reference, consumed) = parse_reference(self.rest())?;
        self.pos += consumed;
        Ok(Expr::Ref(reference))
    }

    fn parse_range(&mut self) -> ParseResult<Expr> {
        let (start, consumed) = parse_reference(self.rest())?;
        self.pos += consumed;
        if !self.eat_char(':') {
            return Err(self.error("expected ':'"));
        }
        let (end, consumed) = parse_reference(self.rest())?;
        self.pos += consumed;
        Ok(Expr::Range(start, end))
    }

    fn parse_invalid_ref(&mut self) -> ParseResult<Expr> {
        if self.rest().starts_with(INVALID_REF) {
            self.pos += INVALID_REF.len();
            Ok(Expr::InvalidRef)
        } else {
            Err(self.error("expected #REF!"))
        }
    }

    fn parse_call(&mut self) -> ParseResult<Expr> {
        let name = self
            .eat_re(ident_re())
            .ok_or_else(|| self.error("expected a function name"))?
            .to_string();
        if !self.eat_char('(') {
            return Err(self.error("expected '('"));
        }

        let mut args = Vec::new();
        let mut separators = Vec::new();
        if self.eat_char(')') {
            return Ok(Expr::Call {
                name,
                args,
                separators,
            });
        }
        loop {
            args.push(self.parse_sum()?);
            if self.eat_char(')') {
                return Ok(Expr::Call {
                    name,
                    args,
                    separators,
                });
            }
            let separator = self
                .eat_re(separator_re())
                .ok_or_else(|| self.error("expected ',' or ')'"))?;
            separators.push(separator.to_string());
        }
    }

    fn parse_group(&mut self) -> ParseResult<Expr> {
        if !self.eat_char('(') {
            return Err(self.error("expected '('"));
        }
        let inner = self.parse_sum()?;
        if !self.eat_char(')') {
            return Err(self.error("expected ')'"));
        }
        Ok(Expr::Group(Box::new(inner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cell_ref::{AbsFlags, CellRef, Reference};

    fn int(value: i64) -> Expr {
        Expr::Int {
            value,
            text: value.to_string(),
        }
    }

    fn cell(col: usize, row: usize) -> Reference {
        Reference::relative(CellRef::new(col, row))
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse("12").unwrap(), int(12));
        assert_eq!(
            parse("12.5").unwrap(),
            Expr::Float {
                value: 12.5,
                text: "12.5".to_string()
            }
        );
        assert_eq!(parse("\"hi there\"").unwrap(), Expr::Str("hi there".to_string()));
        assert_eq!(
            parse("007").unwrap(),
            Expr::Int {
                value: 7,
                text: "007".to_string()
            }
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expected = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Sub, int(1), int(2)),
            int(3),
        );
        assert_eq!(parse("1-2-3").unwrap(), expected);
        assert_eq!(parse("1 - 2 - 3").unwrap(), expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expected = Expr::binary(
            BinaryOp::Add,
            int(1),
            Expr::binary(
                BinaryOp::Div,
                Expr::binary(BinaryOp::Mul, int(2), int(3)),
                int(4),
            ),
        );
        assert_eq!(parse("1+2*3/4").unwrap(), expected);
    }

    #[test]
    fn test_parse_references_and_ranges() {
        assert_eq!(parse("B2").unwrap(), Expr::Ref(cell(1, 1)));
        assert_eq!(
            parse("$A2").unwrap(),
            Expr::Ref(Reference::new(
                CellRef::new(0, 1),
                AbsFlags {
                    col: true,
                    row: false
                }
            ))
        );
        assert_eq!(
            parse("A3:A1").unwrap(),
            Expr::Range(cell(0, 2), cell(0, 0))
        );
        assert_eq!(parse("#REF!").unwrap(), Expr::InvalidRef);
    }

    #[test]
    fn test_parse_calls() {
        assert_eq!(
            parse("SUM(A1:A3)").unwrap(),
            Expr::Call {
                name: "SUM".to_string(),
                args: vec![Expr::Range(cell(0, 0), cell(0, 2))],
                separators: vec![],
            }
        );
        assert_eq!(
            parse("power(2,  10)").unwrap(),
            Expr::Call {
                name: "power".to_string(),
                args: vec![int(2), int(10)],
                separators: vec![",  ".to_string()],
            }
        );
        assert_eq!(
            parse("now()").unwrap(),
            Expr::Call {
                name: "now".to_string(),
                args: vec![],
                separators: vec![],
            }
        );
    }

    #[test]
    fn test_group_is_preserved() {
        assert_eq!(
            parse("(1+2)*3").unwrap(),
            Expr::binary(
                BinaryOp::Mul,
                Expr::Group(Box::new(Expr::binary(BinaryOp::Add, int(1), int(2)))),
                int(3),
            )
        );
    }

    #[test]
    fn test_unconsumed_tail_is_an_error() {
        let err = parse("1+2)").unwrap_err();
        assert_eq!(err.message, "unexpected tail");
        assert_eq!(err.tail, ")");

        assert!(parse("").is_err());
        assert!(parse(" 1").is_err());
        assert!(parse("1 +").is_err());
        assert!(parse("SUM(1,").is_err());
        assert!(parse("(1").is_err());
        assert!(parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_formula_defers_failure() {
        let expr = parse_formula("1+*2");
        assert!(expr.is_parse_failure());
        match expr {
            Expr::ParseFailure { source, .. } => assert_eq!(source, "1+*2"),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }
}
