use std::rc::Rc;

use chrono_tz::Tz;
use log::{debug, warn};

use super::{CurrencyFn, FormatterSettings, InstantFn, LocaleFormatter, NumberFn};
use crate::backend::IntlBackend;
use crate::currency::CurrencyTable;
use crate::locale::PatternKind;
use crate::timezone::parse_zone;

/// Formats through an [`IntlBackend`].
pub struct NativeFormatter {
    backend: Rc<dyn IntlBackend>,
    settings: FormatterSettings,
}

impl NativeFormatter {
    pub fn new(backend: Rc<dyn IntlBackend>, settings: FormatterSettings) -> Self {
        Self { backend, settings }
    }

    /// The zone `-local` categories render in.
    ///
    /// An explicit client zone wins. Without one this is the *last* zone the
    /// backend enumerates for the locale's region, which is kept for
    /// compatibility rather than because it is the most relevant zone.
    pub fn client_zone(&self) -> Tz {
        if let Some(name) = &self.settings.client_timezone {
            match parse_zone(name) {
                Some(tz) => return tz,
                None => warn!(
                    "client timezone {name:?} is not a known zone, using {}",
                    self.settings.server_timezone
                ),
            }
            return self.settings.server_timezone;
        }

        let region = self.settings.locale.region();
        match self.backend.zones_for_region(region).last() {
            Some(tz) => {
                debug!("client timezone for region {region:?} resolved to {tz}");
                *tz
            }
            None => {
                debug!("no zones known for region {region:?}, using the server timezone");
                self.settings.server_timezone
            }
        }
    }
}

impl LocaleFormatter for NativeFormatter {
    fn number(&self) -> NumberFn {
        let backend = Rc::clone(&self.backend);
        let locale = self.settings.locale.clone();
        Box::new(move |value: f64| backend.format_decimal(&locale, value))
    }

    fn currency(&self) -> CurrencyFn {
        let backend = Rc::clone(&self.backend);
        let locale = self.settings.locale.clone();
        let default_code = CurrencyTable.default_code(locale.region());
        Box::new(move |amount: f64, code: Option<&str>| {
            backend.format_currency(&locale, amount, code.unwrap_or(default_code))
        })
    }

    fn instant(&self, kind: PatternKind, local: bool) -> InstantFn {
        let zone = if local {
            self.client_zone()
        } else {
            self.settings.server_timezone
        };
        let backend = Rc::clone(&self.backend);
        let locale = self.settings.locale.clone();
        let default_pattern = locale.default_pattern(kind);
        Box::new(move |epoch: i64, pattern: Option<&str>| {
            backend.format_datetime(&locale, epoch, zone, pattern.unwrap_or(default_pattern))
        })
    }

    fn is_native(&self) -> bool {
        true
    }
}
