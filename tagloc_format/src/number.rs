//! Fixed-point splitting and digit grouping shared by both formatters.

use crate::currency::Grouping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fixed {
    pub(crate) negative: bool,
    pub(crate) integer: String,
    pub(crate) fraction: String,
}

impl Fixed {
    /// Rounds `value` to `digits` fraction digits.
    pub(crate) fn new(value: f64, digits: usize) -> Self {
        let text = format!("{:.*}", digits, value.abs());
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        // -0.001 rounds to 0.00 and loses its sign
        let negative =
            value.is_sign_negative() && text.bytes().any(|b| matches!(b, b'1'..=b'9'));
        Self {
            negative,
            integer: integer.to_owned(),
            fraction: fraction.to_owned(),
        }
    }

    pub(crate) fn trim_fraction(mut self) -> Self {
        let len = self.fraction.trim_end_matches('0').len();
        self.fraction.truncate(len);
        self
    }

    /// Joins the grouped integer part and the fraction, without sign.
    pub(crate) fn join(&self, grouped: &str, decimal_separator: &str) -> String {
        if self.fraction.is_empty() {
            grouped.to_owned()
        } else {
            format!("{grouped}{decimal_separator}{}", self.fraction)
        }
    }
}

/// Inserts `separator` between digit groups, counted from the right.
pub(crate) fn group(integer: &str, separator: &str, grouping: Grouping) -> String {
    let len = integer.chars().count();
    if grouping == Grouping::MinTwo && len < 5 {
        return integer.to_owned();
    }
    let breaks_before = |i: usize| {
        let from_right = len - i;
        match grouping {
            Grouping::Indian => from_right == 3 || (from_right > 3 && (from_right - 3) % 2 == 0),
            Grouping::Thousands | Grouping::MinTwo => from_right % 3 == 0,
        }
    };
    let mut out = String::with_capacity(integer.len() + len / 2 * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && breaks_before(i) {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
