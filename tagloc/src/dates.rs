//! Turning free-form date text into epoch seconds.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tagloc_format::Tz;

/// Resolves date text that is neither empty nor a plain number.
pub trait DateParser {
    /// `now` is epoch seconds; text without an offset is read in `zone`.
    fn parse(&self, text: &str, now: i64, zone: Tz) -> Option<i64>;
}

impl<F> DateParser for F
where
    F: Fn(&str, i64, Tz) -> Option<i64>,
{
    fn parse(&self, text: &str, now: i64, zone: Tz) -> Option<i64> {
        self(text, now, zone)
    }
}

/// Understands the expressions templates commonly carry:
///
/// * `now`, `today`, `midnight`, `noon`, `tomorrow`, `yesterday`
/// * `+3 days`, `-1 week`, `2 hours ago`, `next month`, `last year`
/// * `@1577941140`
/// * RFC 3339 and RFC 2822
/// * `2020-01-02`, `2020-01-02 13:45`, `2020-01-02 13:45:10`,
///   `2020-01-02T13:45:10`, `02.01.2020`, `02.01.2020 13:45`, `01/02/2020`
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn parse(word: &str) -> Option<Self> {
        let word = word.strip_suffix('s').unwrap_or(word);
        Some(match word {
            "sec" | "second" => Unit::Second,
            "min" | "minute" => Unit::Minute,
            "hour" => Unit::Hour,
            "day" => Unit::Day,
            "week" => Unit::Week,
            "month" => Unit::Month,
            "year" => Unit::Year,
            _ => return None,
        })
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, text: &str, now: i64, zone: Tz) -> Option<i64> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();
        let now = Utc.timestamp_opt(now, 0).single()?.with_timezone(&zone);

        if let Some(stamp) = lower.strip_prefix('@') {
            return stamp.parse().ok();
        }
        if let Some(instant) = keyword(&lower, now) {
            return Some(instant.timestamp());
        }
        if let Some(instant) = relative(&lower, now) {
            return Some(instant.timestamp());
        }
        absolute(text, zone)
    }
}

fn start_of_day(day: NaiveDate, zone: Tz) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .earliest()
}

fn keyword(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let zone = now.timezone();
    let today = now.date_naive();
    match text {
        "now" => Some(now),
        "today" | "midnight" => start_of_day(today, zone),
        "noon" => zone
            .from_local_datetime(&today.and_hms_opt(12, 0, 0)?)
            .earliest(),
        "tomorrow" => start_of_day(today.succ_opt()?, zone),
        "yesterday" => start_of_day(today.pred_opt()?, zone),
        _ => None,
    }
}

fn relative(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (amount, unit) = match words.as_slice() {
        ["next", unit] => (1, Unit::parse(unit)?),
        ["last", unit] => (-1, Unit::parse(unit)?),
        [amount, unit, "ago"] => (signed(amount)?.checked_neg()?, Unit::parse(unit)?),
        [amount, unit] => (signed(amount)?, Unit::parse(unit)?),
        _ => return None,
    };
    shift(now, amount, unit)
}

fn signed(amount: &str) -> Option<i64> {
    let value = amount.strip_prefix('+').unwrap_or(amount);
    value.parse().ok()
}

fn shift(now: DateTime<Tz>, amount: i64, unit: Unit) -> Option<DateTime<Tz>> {
    let seconds = match unit {
        Unit::Second => amount,
        Unit::Minute => amount.checked_mul(60)?,
        Unit::Hour => amount.checked_mul(3_600)?,
        Unit::Day => amount.checked_mul(86_400)?,
        Unit::Week => amount.checked_mul(604_800)?,
        Unit::Month | Unit::Year => {
            let months = if unit == Unit::Year {
                amount.checked_mul(12)?
            } else {
                amount
            };
            let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
            return if months < 0 {
                now.checked_sub_months(step)
            } else {
                now.checked_add_months(step)
            };
        }
    };
    now.checked_add_signed(Duration::try_seconds(seconds)?)
}

fn absolute(text: &str, zone: Tz) -> Option<i64> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.timestamp());
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.timestamp());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|instant| instant.timestamp());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(text, format) {
            return start_of_day(day, zone).map(|instant| instant.timestamp());
        }
    }
    None
}
