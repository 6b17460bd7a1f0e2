#![deny(unreachable_pub)]
#![deny(elided_lifetimes_in_paths)]

//! Lexical building blocks shared by the `tagloc` directive layer.
//!
//! Nothing in here knows about locales. The crate recognizes numeric
//! literals, folds whitespace-separated arithmetic over a [`Context`] and
//! reads and writes the `[%name%](%value%)` placeholder format.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use nom::combinator::{all_consuming, map_res};
use nom::number::complete::recognize_float;
use nom::IResult;

#[cfg(feature = "serde")]
use serde::Deserialize;

pub mod eval;
pub use eval::{evaluate, EvalError, Operator};
pub mod placeholder;
pub use placeholder::{Placeholder, PlaceholderKind};

/// Variables visible to a directive while it is evaluated.
pub type Context = HashMap<String, Value>;

/// A single context value: either text or a number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(untagged))]
pub enum Value {
    Num(f64),
    Str(String),
}

impl Value {
    /// Numeric view of the value. Text counts as numeric when the whole
    /// (trimmed) string is a float literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => parse_number(s),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Num(n) => Cow::Owned(n.to_string()),
            Value::Str(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => n.fmt(f),
            Value::Str(s) => s.fmt(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

/// Looks `token` up in `context` by exact name and falls back to the raw text.
pub fn resolve<'a>(token: &'a str, context: &'a Context) -> Cow<'a, str> {
    match context.get(token) {
        Some(value) => value.as_text(),
        None => Cow::Borrowed(token),
    }
}

/// Parses `s` as a number if the whole trimmed string is a float literal.
///
/// Accepts an optional sign, digits with an optional fraction (`1.`, `.5`)
/// and an optional exponent. `inf`, `NaN`, hex and digit separators are
/// rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let parsed: IResult<&str, f64> =
        all_consuming(map_res(recognize_float, |lit: &str| lit.parse::<f64>()))(s.trim());
    parsed.ok().map(|(_, value)| value)
}

/// Splits a comma-separated argument list and trims every argument.
///
/// A blank list has no arguments at all.
pub fn split_args(csv: &str) -> Vec<&str> {
    if csv.trim().is_empty() {
        return Vec::new();
    }
    csv.split(',').map(str::trim).collect()
}

/// Splits a directive argument list at its first comma.
///
/// `"bus, count"` gives `("bus", Some("count"))`; whatever follows the first
/// comma is returned untouched apart from trimming, so nested lists survive.
pub fn split_first_arg(args: &str) -> (&str, Option<&str>) {
    match args.split_once(',') {
        Some((first, rest)) => (first.trim(), Some(rest.trim())),
        None => (args.trim(), None),
    }
}
