use std::error::Error as ErrorTrait;
use std::fmt::{self, Display};

pub type Result<I, E = Error> = ::std::result::Result<I, E>;

/// tagloc error type
///
/// Missing translations are not errors: they are resolved through the
/// fallback chain of [`TranslationStore`](crate::TranslationStore).
///
/// # Feature Interaction
///
/// If the feature `serde-json` is enabled an
/// additional error variant `Json` is added.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// an arithmetic directive used a token that is not an operator
    Eval(tagloc_parser::EvalError),

    /// the formatter was asked for a category it does not know
    Format(tagloc_format::Error),

    /// a date/time directive got text the date parser does not understand
    DateParse(String),

    /// `i18n-evaluate` named an entry that does not exist
    MissingFunction(String),

    /// `i18n-evaluate` named an entry that holds text, not a function
    NotCallable(String),

    /// the template engine was already borrowed, e.g. by a nested `translate`
    EngineBusy,

    /// invalid configuration
    Config(String),

    /// translation source that could not be loaded
    Translations(String),

    /// error raised by the template engine while rendering
    Engine(String),

    /// json conversion error
    #[cfg(feature = "serde-json")]
    Json(::serde_json::Error),
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::Eval(ref err) => Some(err),
            Error::Format(ref err) => Some(err),
            #[cfg(feature = "serde-json")]
            Error::Json(ref err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Eval(ref err) => write!(formatter, "arithmetic error: {err}"),
            Error::Format(ref err) => write!(formatter, "{err}"),
            Error::DateParse(ref text) => write!(formatter, "unable to parse date {text:?}"),
            Error::MissingFunction(ref name) => {
                write!(formatter, "no translation function named {name:?}")
            }
            Error::NotCallable(ref name) => {
                write!(formatter, "translation entry {name:?} is not a function")
            }
            Error::EngineBusy => write!(formatter, "template engine is already in use"),
            Error::Config(ref msg) => write!(formatter, "invalid configuration: {msg}"),
            Error::Translations(ref msg) => write!(formatter, "invalid translations: {msg}"),
            Error::Engine(ref msg) => write!(formatter, "template engine error: {msg}"),
            #[cfg(feature = "serde-json")]
            Error::Json(ref err) => write!(formatter, "json conversion error: {err}"),
        }
    }
}

impl From<tagloc_parser::EvalError> for Error {
    fn from(err: tagloc_parser::EvalError) -> Self {
        Error::Eval(err)
    }
}

impl From<tagloc_format::Error> for Error {
    fn from(err: tagloc_format::Error) -> Self {
        Error::Format(err)
    }
}

#[cfg(feature = "serde-json")]
impl From<::serde_json::Error> for Error {
    fn from(err: ::serde_json::Error) -> Self {
        Error::Json(err)
    }
}
