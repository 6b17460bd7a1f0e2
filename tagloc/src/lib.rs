//! Locale-aware directives for server-rendered HTML templates.
//!
//! tagloc does not parse HTML. It installs a set of directives into a host
//! template engine through the [`TemplateEngine`] trait and answers the
//! engine's calls:
//!
//! | directive                         | function form                    | attribute form       |
//! |-----------------------------------|----------------------------------|----------------------|
//! | `t`                               | `t(key, count)`                  |                      |
//! | `i18n-number`                     | `i18n-number(expression)`        | element text         |
//! | `i18n-currency`                   | `i18n-currency(expression, ISO)` | value is the ISO code |
//! | `i18n-date`, `i18n-date-local`    | `i18n-date(text, pattern)`       | value is the pattern |
//! | `i18n-time`, `i18n-time-local`    | `i18n-time(text, pattern)`       | value is the pattern |
//! | `i18n-evaluate`                   | `i18n-evaluate(name, a, b)`      |                      |
//!
//! Function directives return placeholders such as
//! `[%number-value%](%12,30%)` which the engine replaces by their value
//! once substitution is done; see [`placeholder::unwrap_all`].
//!
//! Marked phrases (`<t>hello</t>` by default) are replaced through
//! [`Translate::translate`].
//!
//! # Feature Flags
//!
//! * `config` (default) reads [`Config`] and translation tables from TOML
//! * `intl` (default) compiles in the native formatting backend
//! * `serde-json` reads translation tables from JSON

#![deny(unreachable_pub)]
#![deny(elided_lifetimes_in_paths)]

mod config;
pub mod dates;
mod dispatch;
pub mod engine;
mod error;
pub mod store;
mod translate;

pub use config::{Config, Markers};
pub use dates::{DateParser, NaturalDateParser};
pub use dispatch::{Clock, DirectiveDispatcher};
pub use engine::{Delimiters, DelimiterGuard, DirectiveCallback, TemplateEngine};
pub use error::{Error, Result};
pub use store::{Entry, TranslationInput, TranslationStore};
pub use tagloc_format::{Category, FormatterEngine, IntlBackend, Tz};
pub use tagloc_parser::{placeholder, split_args, split_first_arg, Context, Value};
pub use translate::{Translate, TranslateBuilder};
