//! Formatter construction.
//!
//! A [`FormatterEngine`] picks its [`LocaleFormatter`] once, when it is
//! built: [`NativeFormatter`] if an [`IntlBackend`] is available and
//! [`FallbackFormatter`] otherwise. Both hand out the same closure shapes, so
//! callers never need to know which one they got.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono_tz::Tz;
use log::debug;

use crate::backend::{default_backend, IntlBackend};
use crate::locale::{LocaleDescriptor, PatternKind};
use crate::timezone::server_timezone;
use crate::Error;

mod fallback;
mod native;

pub use fallback::FallbackFormatter;
pub use native::NativeFormatter;

/// `(value) -> text`
pub type NumberFn = Box<dyn Fn(f64) -> String>;
/// `(amount, currency code) -> text`; no code means the region's currency.
pub type CurrencyFn = Box<dyn Fn(f64, Option<&str>) -> String>;
/// `(epoch seconds, pattern) -> text`; no pattern means the locale default.
pub type InstantFn = Box<dyn Fn(i64, Option<&str>) -> String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Number,
    Currency,
    Date,
    DateLocal,
    Time,
    TimeLocal,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Number => "number",
            Category::Currency => "currency",
            Category::Date => "date",
            Category::DateLocal => "date-local",
            Category::Time => "time",
            Category::TimeLocal => "time-local",
        }
    }

    /// Whether the category renders in the client's zone.
    pub fn is_local(self) -> bool {
        matches!(self, Category::DateLocal | Category::TimeLocal)
    }

    pub fn pattern_kind(self) -> Option<PatternKind> {
        match self {
            Category::Date | Category::DateLocal => Some(PatternKind::Date),
            Category::Time | Category::TimeLocal => Some(PatternKind::Time),
            Category::Number | Category::Currency => None,
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "number" => Category::Number,
            "currency" => Category::Currency,
            "date" => Category::Date,
            "date-local" => Category::DateLocal,
            "time" => Category::Time,
            "time-local" => Category::TimeLocal,
            _ => return Err(Error::UnknownCategory(s.to_owned())),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The formatting function handed out by [`FormatterEngine::format`].
pub enum FormatFn {
    Number(NumberFn),
    Currency(CurrencyFn),
    Instant(InstantFn),
}

impl FormatFn {
    pub fn into_number(self) -> Option<NumberFn> {
        match self {
            FormatFn::Number(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_currency(self) -> Option<CurrencyFn> {
        match self {
            FormatFn::Currency(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_instant(self) -> Option<InstantFn> {
        match self {
            FormatFn::Instant(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Debug for FormatFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FormatFn::Number(_) => "Number",
            FormatFn::Currency(_) => "Currency",
            FormatFn::Instant(_) => "Instant",
        };
        f.debug_tuple(kind).finish()
    }
}

/// One implementation of the public formatting contract.
pub trait LocaleFormatter {
    fn number(&self) -> NumberFn;

    fn currency(&self) -> CurrencyFn;

    /// Date or time formatter; `local` selects the client's zone.
    fn instant(&self, kind: PatternKind, local: bool) -> InstantFn;

    /// Whether this formatter is backed by a native backend.
    fn is_native(&self) -> bool;
}

/// Everything a formatter needs to know about where it runs.
#[derive(Debug, Clone)]
pub struct FormatterSettings {
    pub locale: LocaleDescriptor,
    pub client_timezone: Option<String>,
    pub server_timezone: Tz,
}

pub struct FormatterEngine {
    formatter: Box<dyn LocaleFormatter>,
    settings: FormatterSettings,
}

impl FormatterEngine {
    /// Builds an engine with the default backend for this build.
    pub fn new(locale: &str, client_timezone: Option<&str>) -> Self {
        Self::builder(locale).client_timezone(client_timezone).build()
    }

    pub fn builder(locale: &str) -> FormatterBuilder {
        FormatterBuilder {
            locale: LocaleDescriptor::new(locale),
            client_timezone: None,
            server_timezone: None,
            backend: default_backend(),
        }
    }

    pub fn locale(&self) -> &LocaleDescriptor {
        &self.settings.locale
    }

    pub fn settings(&self) -> &FormatterSettings {
        &self.settings
    }

    pub fn is_native(&self) -> bool {
        self.formatter.is_native()
    }

    /// Builds a fresh formatting function for `category`.
    ///
    /// Nothing is cached; keep the returned function to reuse it.
    pub fn format(&self, category: Category) -> FormatFn {
        match category {
            Category::Number => FormatFn::Number(self.formatter.number()),
            Category::Currency => FormatFn::Currency(self.formatter.currency()),
            Category::Date | Category::DateLocal | Category::Time | Category::TimeLocal => {
                let kind = category.pattern_kind().unwrap_or(PatternKind::Date);
                FormatFn::Instant(self.formatter.instant(kind, category.is_local()))
            }
        }
    }

    pub fn number(&self) -> NumberFn {
        self.formatter.number()
    }

    pub fn currency(&self) -> CurrencyFn {
        self.formatter.currency()
    }

    pub fn instant(&self, kind: PatternKind, local: bool) -> InstantFn {
        self.formatter.instant(kind, local)
    }
}

impl fmt::Debug for FormatterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterEngine")
            .field("settings", &self.settings)
            .field("native", &self.is_native())
            .finish()
    }
}

pub struct FormatterBuilder {
    locale: LocaleDescriptor,
    client_timezone: Option<String>,
    server_timezone: Option<Tz>,
    backend: Option<Rc<dyn IntlBackend>>,
}

impl FormatterBuilder {
    pub fn client_timezone(mut self, zone: Option<&str>) -> Self {
        self.client_timezone = zone.map(str::to_owned);
        self
    }

    /// Overrides the process default zone used by `date` and `time`.
    pub fn server_timezone(mut self, zone: Tz) -> Self {
        self.server_timezone = Some(zone);
        self
    }

    /// Selects the native backend; `None` forces the fallback formatter.
    pub fn backend(mut self, backend: Option<Rc<dyn IntlBackend>>) -> Self {
        self.backend = backend;
        self
    }

    pub fn build(self) -> FormatterEngine {
        let settings = FormatterSettings {
            locale: self.locale,
            client_timezone: self.client_timezone,
            server_timezone: self.server_timezone.unwrap_or_else(server_timezone),
        };
        let formatter: Box<dyn LocaleFormatter> = match self.backend {
            Some(backend) => {
                debug!("formatting {} with the native backend", settings.locale);
                Box::new(NativeFormatter::new(backend, settings.clone()))
            }
            None => {
                debug!("formatting {} with fallback rules", settings.locale);
                Box::new(FallbackFormatter::new(settings.clone()))
            }
        };
        FormatterEngine {
            formatter,
            settings,
        }
    }
}
