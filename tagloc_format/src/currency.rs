//! Static per-region currency and separator data.
//!
//! The fallback formatter takes everything it knows from here; the native
//! path only asks it for a region's default currency code.

use std::collections::HashMap;

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Before,
    After,
}

/// Where digit group separators go in the integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Every three digits.
    Thousands,
    /// Every three digits, but only from five integer digits on (`1234`,
    /// `12.345`).
    MinTwo,
    /// Three digits, then every two (`12,34,567`).
    Indian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub decimal_separator: &'static str,
    pub grouping_separator: &'static str,
    pub grouping: Grouping,
    pub symbol_position: SymbolPosition,
}

const fn entry(
    code: &'static str,
    symbol: &'static str,
    decimal_separator: &'static str,
    grouping_separator: &'static str,
    grouping: Grouping,
    symbol_position: SymbolPosition,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        symbol,
        decimal_separator,
        grouping_separator,
        grouping,
        symbol_position,
    }
}

use Grouping::{Indian, MinTwo, Thousands};
use SymbolPosition::{After, Before};

// Separators and grouping follow CLDR for the region's main locale
// (`de-AT`, `fr-FR`, `en-IN`, ...). Order matters: lookups by code return
// the first region using it.
pub(crate) static REGIONS: &[(&str, CurrencyInfo)] = &[
    ("US", entry("USD", "$", ".", ",", Thousands, Before)),
    ("DE", entry("EUR", "€", ",", ".", Thousands, Before)),
    ("AT", entry("EUR", "€", ",", "\u{a0}", Thousands, Before)),
    ("FR", entry("EUR", "€", ",", "\u{202f}", Thousands, Before)),
    ("ES", entry("EUR", "€", ",", ".", MinTwo, Before)),
    ("IT", entry("EUR", "€", ",", ".", Thousands, Before)),
    ("NL", entry("EUR", "€", ",", ".", Thousands, Before)),
    ("GB", entry("GBP", "£", ".", ",", Thousands, Before)),
    ("CH", entry("CHF", "CHF", ".", "’", Thousands, Before)),
    ("JP", entry("JPY", "¥", ".", ",", Thousands, Before)),
    ("CN", entry("CNY", "¥", ".", ",", Thousands, Before)),
    ("IN", entry("INR", "₹", ".", ",", Indian, Before)),
    ("CA", entry("CAD", "$", ".", ",", Thousands, Before)),
    ("AU", entry("AUD", "$", ".", ",", Thousands, Before)),
    ("MX", entry("MXN", "$", ".", ",", Thousands, Before)),
    ("BR", entry("BRL", "R$", ",", ".", Thousands, Before)),
    ("SE", entry("SEK", "kr", ",", "\u{a0}", Thousands, After)),
    ("NO", entry("NOK", "kr", ",", "\u{a0}", Thousands, After)),
    ("DK", entry("DKK", "kr.", ",", ".", Thousands, After)),
    ("PL", entry("PLN", "zł", ",", "\u{a0}", MinTwo, After)),
];

const DEFAULT_REGION: &str = "US";

static BY_REGION: Lazy<HashMap<&'static str, CurrencyInfo>> =
    Lazy::new(|| REGIONS.iter().copied().collect());

/// Read-only view over the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyTable;

impl CurrencyTable {
    /// The entry for `region`, or the `US` entry for unknown regions.
    pub fn region(self, region: &str) -> &'static CurrencyInfo {
        BY_REGION
            .get(region)
            .or_else(|| BY_REGION.get(DEFAULT_REGION))
            .unwrap_or(&REGIONS[0].1)
    }

    /// The first entry whose currency code is `code` (case-insensitive).
    pub fn code(self, code: &str) -> Option<&'static CurrencyInfo> {
        REGIONS
            .iter()
            .map(|(_, info)| info)
            .find(|info| info.code.eq_ignore_ascii_case(code))
    }

    pub fn default_code(self, region: &str) -> &'static str {
        self.region(region).code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        let table = CurrencyTable;
        assert_eq!(table.default_code("DE"), "EUR");
        assert_eq!(table.default_code("US"), "USD");
        assert_eq!(table.region("SE").symbol_position, SymbolPosition::After);
        assert_eq!(table.region("IN").grouping, Grouping::Indian);
        assert_eq!(table.region("ZZ").code, "USD");
    }

    #[test]
    fn test_code_lookup() {
        let table = CurrencyTable;
        assert_eq!(table.code("usd").map(|c| c.symbol), Some("$"));
        assert_eq!(table.code("EUR").map(|c| c.grouping_separator), Some("."));
        assert!(table.code("XAU").is_none());
    }
}
