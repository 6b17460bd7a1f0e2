use chrono::{TimeZone, Utc};

use super::{CurrencyFn, FormatterSettings, InstantFn, LocaleFormatter, NumberFn};
use crate::currency::{CurrencyInfo, CurrencyTable, SymbolPosition};
use crate::locale::PatternKind;
use crate::number::{group, Fixed};
use crate::pattern::format_instant;

/// Hand-rolled rules used when no native backend is available.
///
/// Numbers always carry two fraction digits. Dates and times are rendered in
/// the server zone: the `-local` variants do not convert to the client zone.
pub struct FallbackFormatter {
    settings: FormatterSettings,
}

impl FallbackFormatter {
    pub fn new(settings: FormatterSettings) -> Self {
        Self { settings }
    }

    fn region(&self) -> &'static CurrencyInfo {
        CurrencyTable.region(self.settings.locale.region())
    }
}

fn fixed_two(value: f64, region: &CurrencyInfo) -> (bool, String) {
    let fixed = Fixed::new(value, 2);
    let grouped = group(&fixed.integer, region.grouping_separator, region.grouping);
    (fixed.negative, fixed.join(&grouped, region.decimal_separator))
}

impl LocaleFormatter for FallbackFormatter {
    fn number(&self) -> NumberFn {
        let region = self.region();
        Box::new(move |value: f64| {
            let (negative, number) = fixed_two(value, region);
            if negative {
                format!("-{number}")
            } else {
                number
            }
        })
    }

    fn currency(&self) -> CurrencyFn {
        let region = self.region();
        Box::new(move |amount: f64, code: Option<&str>| {
            let symbol = match code {
                None => region.symbol,
                Some(code) => CurrencyTable.code(code).map_or(code, |info| info.symbol),
            };
            let (negative, number) = fixed_two(amount, region);
            let sign = if negative { "-" } else { "" };
            match region.symbol_position {
                SymbolPosition::Before => format!("{sign}{symbol}{number}"),
                SymbolPosition::After => format!("{sign}{number}\u{a0}{symbol}"),
            }
        })
    }

    fn instant(&self, kind: PatternKind, _local: bool) -> InstantFn {
        let zone = self.settings.server_timezone;
        let names = self.settings.locale.calendar_locale();
        let default_pattern = self.settings.locale.default_pattern(kind);
        Box::new(move |epoch: i64, pattern: Option<&str>| {
            let Some(utc) = Utc.timestamp_opt(epoch, 0).single() else {
                return String::new();
            };
            let dt = utc.with_timezone(&zone);
            format_instant(&dt, pattern.unwrap_or(default_pattern), names)
        })
    }

    fn is_native(&self) -> bool {
        false
    }
}
