//! Left-to-right arithmetic over whitespace-separated tokens.
//!
//! This is not an expression parser: there is no precedence and no grouping.
//! `4 + 1 - 3 / 2 * 2 ** 2 % 3` is folded as
//! `(((((4 + 1) - 3) / 2) * 2) ** 2) % 3`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{parse_number, resolve, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Rem,
}

impl Operator {
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
            Operator::Pow => lhs.powf(rhs),
            // integer modulo; a zero divisor gives NaN rather than a panic
            Operator::Rem => lhs.trunc() % rhs.trunc(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "**",
            Operator::Rem => "%",
        }
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "**" => Operator::Pow,
            "%" => Operator::Rem,
            _ => return Err(EvalError::UnknownOperator(s.to_owned())),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A non-numeric token was used as an operator.
    UnknownOperator(String),
}

impl std::error::Error for EvalError {}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownOperator(op) => write!(f, "unknown operator {op:?}"),
        }
    }
}

/// Evaluates `expression` against `context`.
///
/// Each token is first looked up in the context; numeric tokens are folded
/// into the accumulator with the pending operator (initially `+`), any other
/// token replaces the pending operator. An operator token is only validated
/// once a number is applied with it, so a trailing operator is ignored.
pub fn evaluate(expression: &str, context: &Context) -> Result<f64, EvalError> {
    let mut accumulator = 0.0;
    let mut pending = Cow::Borrowed("+");

    for token in expression.split_whitespace() {
        let resolved = resolve(token, context);
        match parse_number(&resolved) {
            Some(operand) => {
                let op: Operator = pending.parse()?;
                accumulator = op.apply(accumulator, operand);
            }
            None => pending = resolved,
        }
    }

    Ok(accumulator)
}
