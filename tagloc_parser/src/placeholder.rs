//! The deferred-substitution format emitted by function directives.
//!
//! A function directive cannot write its final text while the outer
//! substitution pass is still running, so it emits
//! `[%<name>%](%<value>%)` instead and the engine unwraps it afterwards.

use std::borrow::Cow;

use nom::bytes::complete::{tag, take_until};
use nom::combinator::map;
use nom::sequence::{delimited, pair};
use nom::IResult;

const NAME_START: &str = "[%";
const NAME_END: &str = "%]";
const VALUE_START: &str = "(%";
const VALUE_END: &str = "%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Number,
    Currency,
    Date,
    Time,
}

impl PlaceholderKind {
    /// The name written between `[%` and `%]`.
    pub fn name(self) -> &'static str {
        match self {
            PlaceholderKind::Number => "number-value",
            PlaceholderKind::Currency => "currency-value",
            PlaceholderKind::Date => "date-value",
            PlaceholderKind::Time => "time-value",
        }
    }

    pub fn wrap(self, value: &str) -> String {
        wrap(self.name(), value)
    }
}

/// A placeholder found in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Placeholder<'a> {
    pub fn parse(i: &'a str) -> IResult<&'a str, Self> {
        map(
            pair(
                delimited(tag(NAME_START), take_until(NAME_END), tag(NAME_END)),
                delimited(tag(VALUE_START), take_until(VALUE_END), tag(VALUE_END)),
            ),
            |(name, value)| Placeholder { name, value },
        )(i)
    }
}

pub fn wrap(name: &str, value: &str) -> String {
    format!("{NAME_START}{name}{NAME_END}{VALUE_START}{value}{VALUE_END}")
}

/// Replaces every well-formed placeholder in `text` by its value.
///
/// Text that merely starts like a placeholder is copied through unchanged.
pub fn unwrap_all(text: &str) -> Cow<'_, str> {
    if !text.contains(NAME_START) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(NAME_START) {
        let (before, candidate) = rest.split_at(start);
        out.push_str(before);
        match Placeholder::parse(candidate) {
            Ok((after, placeholder)) => {
                out.push_str(placeholder.value);
                rest = after;
            }
            Err(_) => {
                out.push_str(NAME_START);
                rest = &candidate[NAME_START.len()..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
