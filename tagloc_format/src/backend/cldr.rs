//! The built-in native backend.
//!
//! Decimal symbols, digit grouping and the minus sign come from `icu`'s
//! compiled CLDR data; month and weekday names from chrono's locale data.
//! Currency symbols and their placement, which stable `icu` does not format,
//! and the region zone lists are kept below.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use icu::decimal::input::Decimal;
use icu::decimal::DecimalFormatter;
use log::debug;

use super::IntlBackend;
use crate::currency::Grouping;
use crate::locale::LocaleDescriptor;
use crate::number::{group, Fixed};
use crate::pattern::format_instant;

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, Copy, Default)]
pub struct CldrBackend;

/// CLDR decimal style for one locale.
struct Symbols {
    formatter: Option<DecimalFormatter>,
}

impl Symbols {
    fn of(locale: &LocaleDescriptor) -> Self {
        let parsed = locale
            .tag()
            .replace('_', "-")
            .parse::<icu::locale::Locale>()
            .or_else(|_| locale.language().parse::<icu::locale::Locale>());
        let formatter = match parsed {
            Ok(parsed) => DecimalFormatter::try_new(parsed.into(), Default::default()).ok(),
            Err(_) => None,
        };
        if formatter.is_none() {
            debug!("no decimal data for {locale}, using plain digits");
        }
        Self { formatter }
    }

    /// The unsigned digits of `fixed`, separated and grouped.
    fn digits(&self, fixed: &Fixed) -> String {
        let scale = fixed.fraction.len() as i16;
        let decimal = format!("{}{}", fixed.integer, fixed.fraction)
            .parse::<i64>()
            .ok()
            .map(|n| {
                let mut decimal = Decimal::from(n);
                decimal.multiply_pow10(-scale);
                decimal
            });
        match (&self.formatter, decimal) {
            (Some(formatter), Some(decimal)) => formatter.format(&decimal).to_string(),
            _ => fixed.join(&group(&fixed.integer, ",", Grouping::Thousands), "."),
        }
    }

    fn minus_sign(&self) -> String {
        match &self.formatter {
            Some(formatter) => formatter
                .format(&Decimal::from(-1i64))
                .to_string()
                .chars()
                .take_while(|c| !c.is_numeric())
                .collect(),
            None => "-".to_owned(),
        }
    }

    fn signed(&self, fixed: &Fixed, body: String) -> String {
        if fixed.negative {
            format!("{}{body}", self.minus_sign())
        } else {
            body
        }
    }
}

impl IntlBackend for CldrBackend {
    fn format_decimal(&self, locale: &LocaleDescriptor, value: f64) -> String {
        let symbols = Symbols::of(locale);
        let fixed = Fixed::new(value, 3).trim_fraction();
        symbols.signed(&fixed, symbols.digits(&fixed))
    }

    fn format_currency(&self, locale: &LocaleDescriptor, amount: f64, code: &str) -> String {
        let code = code.to_ascii_uppercase();
        let symbols = Symbols::of(locale);
        let fixed = Fixed::new(amount, fraction_digits(&code));
        let number = symbols.digits(&fixed);
        let symbol = currency_symbol(locale, &code);

        let body = match CurrencyLayout::of(locale) {
            CurrencyLayout::Prefix => format!("{symbol}{number}"),
            CurrencyLayout::PrefixSpaced => format!("{symbol}{NBSP}{number}"),
            CurrencyLayout::Suffix => format!("{number}{NBSP}{symbol}"),
        };
        symbols.signed(&fixed, body)
    }

    fn format_datetime(
        &self,
        locale: &LocaleDescriptor,
        epoch: i64,
        zone: Tz,
        pattern: &str,
    ) -> String {
        match Utc.timestamp_opt(epoch, 0).single() {
            Some(utc) => {
                let dt = utc.with_timezone(&zone);
                format_instant(&dt, pattern, locale.calendar_locale())
            }
            None => {
                debug!("timestamp {epoch} is out of range");
                String::new()
            }
        }
    }

    fn zones_for_region(&self, region: &str) -> Vec<Tz> {
        let names = REGION_ZONES
            .iter()
            .find(|(r, _)| *r == region)
            .map_or(&[][..], |(_, zones)| *zones);
        names
            .iter()
            .filter_map(|name| match name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    debug!("zone {name} is missing from the timezone database");
                    None
                }
            })
            .collect()
    }
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "CLP" | "ISK" => 0,
        _ => 2,
    }
}

/// The symbol a locale writes for `code`.
///
/// A region's own currency may use a narrow local symbol (`$` for CAD in
/// Canada); elsewhere the international symbol applies (`CA$`).
fn currency_symbol(locale: &LocaleDescriptor, code: &str) -> String {
    if let Some((_, _, symbol)) = LOCAL_SYMBOLS
        .iter()
        .find(|(region, c, _)| *region == locale.region() && *c == code)
    {
        return (*symbol).to_owned();
    }
    SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| code.to_owned(), |(_, symbol)| (*symbol).to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrencyLayout {
    Prefix,
    PrefixSpaced,
    Suffix,
}

impl CurrencyLayout {
    fn of(locale: &LocaleDescriptor) -> Self {
        match (locale.language(), locale.region()) {
            ("de", "AT" | "CH") | ("pt", "BR") | ("nl", _) => CurrencyLayout::PrefixSpaced,
            (
                "de" | "fr" | "es" | "it" | "pt" | "pl" | "ru" | "sv" | "nb" | "no" | "da" | "fi"
                | "cs",
                _,
            ) => CurrencyLayout::Suffix,
            _ => CurrencyLayout::Prefix,
        }
    }
}

const SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "CN¥"),
    ("INR", "₹"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("CHF", "CHF"),
];

const LOCAL_SYMBOLS: &[(&str, &str, &str)] = &[
    ("CA", "CAD", "$"),
    ("AU", "AUD", "$"),
    ("MX", "MXN", "$"),
    ("CN", "CNY", "¥"),
    ("SE", "SEK", "kr"),
    ("NO", "NOK", "kr"),
    ("DK", "DKK", "kr."),
    ("PL", "PLN", "zł"),
];

/// Zone identifiers per region, sorted the way ICU enumerates them (aliases
/// included). Client-local formatting without an explicit zone uses the last
/// entry.
const REGION_ZONES: &[(&str, &[&str])] = &[
    (
        "US",
        &[
            "America/Adak",
            "America/Anchorage",
            "America/Boise",
            "America/Chicago",
            "America/Denver",
            "America/Detroit",
            "America/Indiana/Indianapolis",
            "America/Los_Angeles",
            "America/New_York",
            "America/Phoenix",
            "Pacific/Honolulu",
            "US/Alaska",
            "US/Aleutian",
            "US/Arizona",
            "US/Central",
            "US/East-Indiana",
            "US/Eastern",
            "US/Hawaii",
            "US/Indiana-Starke",
            "US/Michigan",
            "US/Mountain",
            "US/Pacific",
        ],
    ),
    ("DE", &["Europe/Berlin", "Europe/Busingen"]),
    ("AT", &["Europe/Vienna"]),
    ("CH", &["Europe/Zurich"]),
    ("FR", &["Europe/Paris"]),
    ("ES", &["Africa/Ceuta", "Atlantic/Canary", "Europe/Madrid"]),
    ("IT", &["Europe/Rome"]),
    ("NL", &["Europe/Amsterdam"]),
    ("GB", &["Europe/Belfast", "Europe/London", "GB", "GB-Eire"]),
    ("JP", &["Asia/Tokyo", "Japan"]),
    ("CN", &["Asia/Chongqing", "Asia/Chungking", "Asia/Harbin", "Asia/Shanghai", "PRC"]),
    ("IN", &["Asia/Calcutta", "Asia/Kolkata"]),
    (
        "CA",
        &[
            "America/Edmonton",
            "America/Halifax",
            "America/St_Johns",
            "America/Toronto",
            "America/Vancouver",
            "America/Whitehorse",
            "America/Winnipeg",
            "Canada/Atlantic",
            "Canada/Central",
            "Canada/Eastern",
            "Canada/Mountain",
            "Canada/Newfoundland",
            "Canada/Pacific",
            "Canada/Saskatchewan",
            "Canada/Yukon",
        ],
    ),
    (
        "AU",
        &[
            "Australia/ACT",
            "Australia/Adelaide",
            "Australia/Brisbane",
            "Australia/Darwin",
            "Australia/Hobart",
            "Australia/Melbourne",
            "Australia/Perth",
            "Australia/Sydney",
            "Australia/Yancowinna",
        ],
    ),
    (
        "MX",
        &[
            "America/Cancun",
            "America/Mexico_City",
            "America/Monterrey",
            "America/Tijuana",
            "Mexico/BajaNorte",
            "Mexico/BajaSur",
            "Mexico/General",
        ],
    ),
    (
        "BR",
        &[
            "America/Manaus",
            "America/Noronha",
            "America/Sao_Paulo",
            "Brazil/Acre",
            "Brazil/DeNoronha",
            "Brazil/East",
            "Brazil/West",
        ],
    ),
    ("SE", &["Europe/Stockholm"]),
    ("NO", &["Europe/Oslo"]),
    ("DK", &["Europe/Copenhagen"]),
    ("PL", &["Europe/Warsaw", "Poland"]),
];
