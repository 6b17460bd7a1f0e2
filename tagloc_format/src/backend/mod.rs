//! The native internationalization backend seam.
//!
//! A [`NativeFormatter`](crate::formatter::NativeFormatter) delegates all
//! locale knowledge to an [`IntlBackend`]. Whether one is available is decided
//! by whoever builds the [`FormatterEngine`](crate::FormatterEngine), never by
//! the formatter itself.

use std::rc::Rc;

use chrono_tz::Tz;

use crate::locale::LocaleDescriptor;

#[cfg(feature = "intl")]
mod cldr;
#[cfg(feature = "intl")]
pub use cldr::CldrBackend;

pub trait IntlBackend {
    /// Decimal style: locale separators, at most three fraction digits.
    fn format_decimal(&self, locale: &LocaleDescriptor, value: f64) -> String;

    /// Currency style for the ISO 4217 `code`.
    fn format_currency(&self, locale: &LocaleDescriptor, amount: f64, code: &str) -> String;

    /// Renders `epoch` seconds in `zone` with an ICU-style `pattern`.
    fn format_datetime(
        &self,
        locale: &LocaleDescriptor,
        epoch: i64,
        zone: Tz,
        pattern: &str,
    ) -> String;

    /// Every zone the backend associates with `region`, in enumeration order.
    fn zones_for_region(&self, region: &str) -> Vec<Tz>;
}

/// The backend a formatter gets when the caller does not choose.
///
/// This is the built-in [`CldrBackend`] when the `intl` feature is enabled
/// and nothing otherwise.
pub fn default_backend() -> Option<Rc<dyn IntlBackend>> {
    #[cfg(feature = "intl")]
    {
        Some(Rc::new(CldrBackend))
    }
    #[cfg(not(feature = "intl"))]
    {
        None
    }
}
