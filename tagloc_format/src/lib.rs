#![deny(unreachable_pub)]
#![deny(elided_lifetimes_in_paths)]

//! Locale formatting with graceful degradation.
//!
//! ```
//! use tagloc_format::{Category, FormatterEngine};
//!
//! let engine = FormatterEngine::builder("de-DE").backend(None).build();
//! let number = engine.format(Category::Number).into_number().unwrap();
//! assert_eq!(number(1234.5), "1.234,50");
//! ```
//!
//! With the `intl` feature (on by default) [`FormatterEngine::new`] uses the
//! built-in [`CldrBackend`]; without it, or when `None` is passed to
//! [`FormatterBuilder::backend`], it falls back to the rules in
//! [`CurrencyTable`].

use std::fmt;

pub mod backend;
pub mod currency;
pub mod formatter;
pub mod locale;
mod number;
pub mod pattern;
pub mod timezone;

#[cfg(feature = "intl")]
pub use backend::CldrBackend;
pub use backend::{default_backend, IntlBackend};
pub use chrono_tz::Tz;
pub use currency::{CurrencyInfo, CurrencyTable, Grouping, SymbolPosition};
pub use formatter::{
    Category, CurrencyFn, FormatFn, FormatterBuilder, FormatterEngine, InstantFn,
    LocaleFormatter, NumberFn,
};
pub use locale::{LocaleDescriptor, PatternKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// `format` was asked for a category it does not know.
    UnknownCategory(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCategory(name) => write!(f, "unknown format category {name:?}"),
        }
    }
}
