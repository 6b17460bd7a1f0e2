use std::fmt;

use chrono::Locale;

/// Which default pattern a date/time formatter falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Date,
    Time,
}

/// A locale tag split into language and region.
///
/// The tag is expected to look like `de-DE`: a two-letter language, one
/// separator and the region from byte offset 3 on. Nothing is validated, a
/// malformed tag simply yields odd parts (a tag shorter than three bytes has
/// an empty region).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleDescriptor {
    tag: String,
    language: String,
    region: String,
}

impl LocaleDescriptor {
    pub fn new(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        let region = tag.get(3..).unwrap_or_default();
        Self {
            tag: tag.to_owned(),
            language: language.to_owned(),
            region: region.to_owned(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// The chrono locale month and weekday names are taken from, `POSIX`
    /// (English) when there is none for this language and region.
    pub fn calendar_locale(&self) -> Locale {
        let name = format!("{}_{}", self.language, self.region);
        Locale::try_from(name.as_str()).unwrap_or(Locale::POSIX)
    }

    fn is_us(&self) -> bool {
        self.region == "US"
    }

    /// The pattern used when a date/time directive does not name one.
    ///
    /// `US` reads month/day/year on a 12-hour clock with meridiem and zone,
    /// every other region day.month.year on a 24-hour clock.
    pub fn default_pattern(&self, kind: PatternKind) -> &'static str {
        match (kind, self.is_us()) {
            (PatternKind::Date, true) => "MM/dd/yyyy",
            (PatternKind::Date, false) => "dd.MM.yyyy",
            (PatternKind::Time, true) => "hh:mm a z",
            (PatternKind::Time, false) => "H:mm",
        }
    }
}

impl fmt::Display for LocaleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let de = LocaleDescriptor::new("de-DE");
        assert_eq!(de.language(), "de");
        assert_eq!(de.region(), "DE");
        assert_eq!(de.tag(), "de-DE");

        let underscore = LocaleDescriptor::new("en_GB");
        assert_eq!(underscore.language(), "en");
        assert_eq!(underscore.region(), "GB");
    }

    #[test]
    fn test_malformed_tags_are_not_rejected() {
        let short = LocaleDescriptor::new("de");
        assert_eq!(short.language(), "de");
        assert_eq!(short.region(), "");

        // region is always taken from offset 3
        let long = LocaleDescriptor::new("deu-DE");
        assert_eq!(long.language(), "deu");
        assert_eq!(long.region(), "-DE");
    }

    #[test]
    fn test_default_patterns() {
        let us = LocaleDescriptor::new("en-US");
        assert_eq!(us.default_pattern(PatternKind::Date), "MM/dd/yyyy");
        assert_eq!(us.default_pattern(PatternKind::Time), "hh:mm a z");

        let gb = LocaleDescriptor::new("en-GB");
        assert_eq!(gb.default_pattern(PatternKind::Date), "dd.MM.yyyy");
        assert_eq!(gb.default_pattern(PatternKind::Time), "H:mm");
    }

    #[test]
    fn test_calendar_locale() {
        assert_eq!(LocaleDescriptor::new("de-DE").calendar_locale(), Locale::de_DE);
        assert_eq!(LocaleDescriptor::new("pt_BR").calendar_locale(), Locale::pt_BR);
        assert_eq!(LocaleDescriptor::new("xx-ZZ").calendar_locale(), Locale::POSIX);
        assert_eq!(LocaleDescriptor::new("de").calendar_locale(), Locale::POSIX);
    }
}
