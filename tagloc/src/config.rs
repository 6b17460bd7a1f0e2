use serde::Deserialize;

use crate::{Error, Result};

pub(crate) const DEFAULT_LOCALE: &str = "en-US";
pub(crate) const DEFAULT_OPEN: &str = "<t>";
pub(crate) const DEFAULT_CLOSE: &str = "</t>";

/// Settings for a [`Translate`](crate::Translate), usually read from TOML.
///
/// ```toml
/// [general]
/// locale = "de-DE"
/// client_timezone = "Europe/Berlin"
/// debug = false
/// native = true
///
/// [markers]
/// open = "<t>"
/// close = "</t>"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub client_timezone: Option<String>,
    pub debug: bool,
    /// Use the native formatting backend when one is compiled in.
    pub native: bool,
    pub markers: Markers,
}

/// The delimiter pair `translate` switches the engine to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_owned(),
            close: DEFAULT_CLOSE.to_owned(),
        }
    }
}

impl Markers {
    pub fn new(open: &str, close: &str) -> Result<Self> {
        if open.is_empty() || close.is_empty() {
            return Err(Error::Config("marker delimiters must not be empty".into()));
        }
        if open == close {
            return Err(Error::Config(format!(
                "open and close markers must differ, both are \"{open}\""
            )));
        }
        Ok(Self {
            open: open.to_owned(),
            close: close.to_owned(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            client_timezone: None,
            debug: false,
            native: true,
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Parses a TOML document; an empty string yields the defaults.
    pub fn new(s: &str) -> Result<Self> {
        let raw = if s.trim().is_empty() {
            RawConfig::default()
        } else {
            RawConfig::from_toml_str(s)?
        };

        let mut config = Config::default();
        if let Some(General {
            locale,
            client_timezone,
            debug,
            native,
        }) = raw.general
        {
            if let Some(locale) = locale {
                config.locale = locale.to_owned();
            }
            config.client_timezone = client_timezone.map(str::to_owned);
            config.debug = debug;
            config.native = native.unwrap_or(true);
        }
        if let Some(RawMarkers { open, close }) = raw.markers {
            config.markers = Markers::new(
                open.unwrap_or(DEFAULT_OPEN),
                close.unwrap_or(DEFAULT_CLOSE),
            )?;
        }
        Ok(config)
    }
}

#[derive(Deserialize, Default)]
struct RawConfig<'a> {
    #[serde(borrow)]
    general: Option<General<'a>>,
    #[serde(borrow)]
    markers: Option<RawMarkers<'a>>,
}

impl RawConfig<'_> {
    #[cfg(feature = "config")]
    fn from_toml_str(s: &str) -> Result<RawConfig<'_>> {
        basic_toml::from_str(s).map_err(|e| Error::Config(format!("invalid TOML: {e}")))
    }

    #[cfg(not(feature = "config"))]
    fn from_toml_str(_: &str) -> Result<RawConfig<'_>> {
        Err(Error::Config("TOML support not available".into()))
    }
}

#[derive(Deserialize)]
struct General<'a> {
    locale: Option<&'a str>,
    client_timezone: Option<&'a str>,
    #[serde(default)]
    debug: bool,
    native: Option<bool>,
}

#[derive(Deserialize)]
struct RawMarkers<'a> {
    open: Option<&'a str>,
    close: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.markers.open, "<t>");
        assert_eq!(config.markers.close, "</t>");
        assert!(config.native);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_from_toml() {
        let config = Config::new(
            r#"
            [general]
            locale = "de-DE"
            client_timezone = "Europe/Berlin"
            debug = true
            native = false

            [markers]
            open = "{%t"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, "de-DE");
        assert_eq!(config.client_timezone.as_deref(), Some("Europe/Berlin"));
        assert!(config.debug);
        assert!(!config.native);
        assert_eq!(config.markers.open, "{%t");
        assert_eq!(config.markers.close, "</t>");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_invalid_markers() {
        let err = Config::new("[markers]\nopen = \"\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: marker delimiters must not be empty"
        );

        let err = Config::new("[markers]\nopen = \"|\"\nclose = \"|\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: open and close markers must differ, both are \"|\""
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::new("[general]\nlocale = 12"),
            Err(Error::Config(_))
        ));
    }

    #[cfg(not(feature = "config"))]
    #[test]
    fn test_toml_disabled() {
        assert!(matches!(Config::new("[general]"), Err(Error::Config(_))));
    }
}
