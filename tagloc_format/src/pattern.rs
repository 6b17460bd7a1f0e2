//! ICU-style date/time patterns (`dd.MM.yyyy`, `hh:mm a z`).
//!
//! A pattern is a sequence of fields, each a run of one ASCII letter, and
//! literal text. Text inside single quotes is literal, `''` is a quote.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, Datelike, Locale, Timelike};
use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Pattern letter and how many times it was repeated.
    Field(char, usize),
    Literal(Cow<'a, str>),
}

pub fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = pattern.char_indices().peekable();
    let mut literal_start = None;

    while let Some((pos, c)) = chars.next() {
        if c.is_ascii_alphabetic() {
            flush(&mut tokens, pattern, literal_start.take(), pos);
            let mut count = 1;
            while chars.next_if(|&(_, next)| next == c).is_some() {
                count += 1;
            }
            tokens.push(Token::Field(c, count));
        } else if c == '\'' {
            flush(&mut tokens, pattern, literal_start.take(), pos);
            if chars.next_if(|&(_, next)| next == '\'').is_some() {
                tokens.push(Token::Literal(Cow::Borrowed("'")));
                continue;
            }
            let mut quoted = String::new();
            while let Some((_, q)) = chars.next() {
                if q != '\'' {
                    quoted.push(q);
                } else if chars.next_if(|&(_, next)| next == '\'').is_some() {
                    quoted.push('\'');
                } else {
                    break;
                }
            }
            tokens.push(Token::Literal(Cow::Owned(quoted)));
        } else if literal_start.is_none() {
            literal_start = Some(pos);
        }
    }
    flush(&mut tokens, pattern, literal_start, pattern.len());

    tokens
}

fn flush<'a>(tokens: &mut Vec<Token<'a>>, pattern: &'a str, start: Option<usize>, end: usize) {
    if let Some(start) = start {
        if start < end {
            tokens.push(Token::Literal(Cow::Borrowed(&pattern[start..end])));
        }
    }
}

/// Renders `dt` with an ICU-style `pattern`.
///
/// Numeric fields are padded to the field width. Month, weekday and day
/// period names go through chrono's localized strftime in `locale`.
/// Unsupported letters are kept as literal text.
pub fn format_instant(dt: &DateTime<Tz>, pattern: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for token in tokenize(pattern) {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Field(letter, count) => write_field(&mut out, dt, locale, letter, count),
        }
    }
    out
}

fn write_field(out: &mut String, dt: &DateTime<Tz>, locale: Locale, letter: char, count: usize) {
    let padded = |out: &mut String, n: i64| {
        // writing into a String cannot fail
        let _ = write!(out, "{n:0count$}");
    };
    match letter {
        'y' if count == 2 => padded2(out, dt.year()),
        'y' => padded(out, i64::from(dt.year())),
        'Y' if count == 2 => padded2(out, dt.iso_week().year()),
        'Y' => padded(out, i64::from(dt.iso_week().year())),
        'M' if count >= 3 => out.push_str(&named(dt, name_spec(letter, count), locale)),
        'M' => padded(out, i64::from(dt.month())),
        'd' => padded(out, i64::from(dt.day())),
        'E' => out.push_str(&named(dt, name_spec(letter, count), locale)),
        'H' => padded(out, i64::from(dt.hour())),
        'h' => padded(out, i64::from(dt.hour12().1)),
        'k' => padded(out, i64::from(if dt.hour() == 0 { 24 } else { dt.hour() })),
        'K' => padded(out, i64::from(dt.hour() % 12)),
        'm' => padded(out, i64::from(dt.minute())),
        's' => padded(out, i64::from(dt.second())),
        'a' => {
            let period = named(dt, "%p", locale);
            if period.is_empty() {
                out.push_str(if dt.hour12().0 { "PM" } else { "AM" });
            } else {
                out.push_str(&period);
            }
        }
        'z' => out.push_str(&dt.format("%Z").to_string()),
        'Z' => out.push_str(&dt.format("%z").to_string()),
        _ => out.extend(std::iter::repeat(letter).take(count)),
    }
}

fn padded2(out: &mut String, year: i32) {
    let _ = write!(out, "{:02}", year.rem_euclid(100));
}

fn name_spec(letter: char, count: usize) -> &'static str {
    match (letter, count) {
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('E', 1..=3) => "%a",
        _ => "%A",
    }
}

fn named(dt: &DateTime<Tz>, spec: &str, locale: Locale) -> String {
    dt.format_localized(spec, locale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("dd.MM.yyyy"),
            vec![
                Token::Field('d', 2),
                Token::Literal(".".into()),
                Token::Field('M', 2),
                Token::Literal(".".into()),
                Token::Field('y', 4),
            ]
        );
        assert_eq!(
            tokenize("H 'Uhr' mm"),
            vec![
                Token::Field('H', 1),
                Token::Literal(" ".into()),
                Token::Literal("Uhr".into()),
                Token::Literal(" ".into()),
                Token::Field('m', 2),
            ]
        );
        assert_eq!(
            tokenize("h''mm"),
            vec![
                Token::Field('h', 1),
                Token::Literal("'".into()),
                Token::Field('m', 2),
            ]
        );
    }

    // 2020-01-02 04:59:00 UTC, a Thursday
    fn instant(zone: &str) -> DateTime<Tz> {
        let zone: Tz = zone.parse().unwrap();
        DateTime::from_timestamp(1_577_941_140, 0)
            .unwrap()
            .with_timezone(&zone)
    }

    #[test]
    fn test_numeric_fields() {
        let dt = instant("Europe/Berlin");
        let render = |pattern| format_instant(&dt, pattern, Locale::POSIX);
        assert_eq!(render("dd.MM.yyyy H:mm"), "02.01.2020 5:59");
        assert_eq!(render("d/M/yy"), "2/1/20");
        assert_eq!(render("kk:mm K:mm h a"), "05:59 5:59 5 AM");
        assert_eq!(render("HHH ddd sss"), "005 002 000");
        assert_eq!(render("YYYY-ww"), "2020-ww");

        let midnight = DateTime::from_timestamp(1_577_923_200, 0)
            .unwrap()
            .with_timezone(&Tz::UTC);
        assert_eq!(format_instant(&midnight, "k K", Locale::POSIX), "24 0");
    }

    #[test]
    fn test_localized_names() {
        let dt = instant("Europe/Berlin");
        assert_eq!(
            format_instant(&dt, "EEEE, d. MMMM y", Locale::de_DE),
            "Donnerstag, 2. Januar 2020"
        );
        assert_eq!(
            format_instant(&dt, "EEEE d MMMM", Locale::fr_FR),
            "jeudi 2 janvier"
        );
        assert_eq!(format_instant(&dt, "EEE MMM", Locale::POSIX), "Thu Jan");
    }

    #[test]
    fn test_quotes_and_zones() {
        let dt = instant("America/New_York");
        assert_eq!(
            format_instant(&dt, "hh:mm a z", Locale::en_US),
            "11:59 PM EST"
        );
        assert_eq!(format_instant(&dt, "HH 'o''clock' Z", Locale::POSIX), "23 o'clock -0500");
        assert_eq!(format_instant(&dt, "'100%' QQ", Locale::POSIX), "100% QQ");
    }
}
