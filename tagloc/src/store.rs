//! Per-language translation tables.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

#[cfg(any(feature = "config", feature = "serde-json"))]
use crate::{Error, Result};

pub(crate) const PLURAL_SUFFIX: &str = ".plural";

/// A function stored in a translation table, called by `i18n-evaluate`.
pub type TranslationFn = Rc<dyn Fn(&[&str]) -> String>;

/// A single value in a translation table.
#[derive(Clone)]
pub enum Entry {
    Text(String),
    Callable(TranslationFn),
}

impl Entry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Callable(_) => None,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Entry::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// What callers hand to [`TranslationStore::set_translations`].
///
/// A `[singular, plural]` pair is stored as `key` and `key.plural`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranslationInput {
    Text(String),
    Plural(String, String),
}

impl From<&str> for TranslationInput {
    fn from(text: &str) -> Self {
        TranslationInput::Text(text.to_owned())
    }
}

impl From<String> for TranslationInput {
    fn from(text: String) -> Self {
        TranslationInput::Text(text)
    }
}

impl<S: Into<String>> From<(S, S)> for TranslationInput {
    fn from((singular, plural): (S, S)) -> Self {
        TranslationInput::Plural(singular.into(), plural.into())
    }
}

impl From<[&str; 2]> for TranslationInput {
    fn from([singular, plural]: [&str; 2]) -> Self {
        TranslationInput::Plural(singular.to_owned(), plural.to_owned())
    }
}

pub type Table = IndexMap<String, Entry>;

/// Languages are kept in registration order; the first one registered is
/// the fallback for every lookup.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    languages: IndexMap<String, Table>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `entries` into `language`, overwriting existing keys.
    pub fn set_translations<I, K, V>(&mut self, language: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TranslationInput>,
    {
        let table = self.table_mut(language);
        for (key, value) in entries {
            let key = key.into();
            match value.into() {
                TranslationInput::Text(text) => {
                    table.insert(key, Entry::Text(text));
                }
                TranslationInput::Plural(singular, plural) => {
                    table.insert(format!("{key}{PLURAL_SUFFIX}"), Entry::Text(plural));
                    table.insert(key, Entry::Text(singular));
                }
            }
        }
    }

    pub fn set_callable<F>(&mut self, language: &str, name: &str, f: F)
    where
        F: Fn(&[&str]) -> String + 'static,
    {
        self.table_mut(language)
            .insert(name.to_owned(), Entry::Callable(Rc::new(f)));
    }

    /// Loads a flat TOML table of `key = "text"` or `key = ["one", "many"]`.
    #[cfg(feature = "config")]
    pub fn load_toml(&mut self, language: &str, source: &str) -> Result<()> {
        let entries: IndexMap<String, TranslationInput> = basic_toml::from_str(source)
            .map_err(|e| Error::Translations(format!("invalid TOML for {language}: {e}")))?;
        self.set_translations(language, entries);
        Ok(())
    }

    /// Loads a flat JSON object of `"key": "text"` or `"key": ["one", "many"]`.
    #[cfg(feature = "serde-json")]
    pub fn load_json(&mut self, language: &str, source: &str) -> Result<()> {
        let entries: IndexMap<String, TranslationInput> = serde_json::from_str(source)?;
        self.set_translations(language, entries);
        Ok(())
    }

    fn table_mut(&mut self, language: &str) -> &mut Table {
        self.languages.entry(language.to_owned()).or_default()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn get(&self, language: &str, key: &str) -> Option<&Entry> {
        self.languages.get(language)?.get(key)
    }

    fn first(&self) -> Option<&Table> {
        self.languages.first().map(|(_, table)| table)
    }

    /// The table for `language`, else the first registered one.
    pub fn active_table(&self, language: &str) -> Option<&Table> {
        match self.languages.get(language) {
            Some(table) if !table.is_empty() => Some(table),
            _ => self.first(),
        }
    }

    /// Looks `key` up for `language`.
    ///
    /// Falls back to the debug sentinel, then to the first registered
    /// language, then to the key itself without its plural suffix. Callable
    /// entries count as absent.
    pub fn resolve<'a>(&'a self, language: &str, key: &'a str, debug: bool) -> Cow<'a, str> {
        if let Some(text) = self.get(language, key).and_then(Entry::as_text) {
            return Cow::Borrowed(text);
        }
        if debug {
            debug!("missing translation {key:?} for {language:?}");
            return Cow::Owned(format!("missing translation: {key}"));
        }
        if let Some(text) = self
            .first()
            .and_then(|table| table.get(key))
            .and_then(Entry::as_text)
        {
            return Cow::Borrowed(text);
        }
        debug!("no translation for {key:?}, using the key");
        match key.strip_suffix(PLURAL_SUFFIX) {
            Some(base) => Cow::Borrowed(base),
            None => Cow::Borrowed(key),
        }
    }
}

/// Picks `key.plural` when `qualifier` is a number other than 1.
pub fn plural_key<'a>(key: &'a str, qualifier: Option<&str>) -> Cow<'a, str> {
    let count = qualifier.and_then(|q| tagloc_parser::parse_number(q.trim()));
    match count {
        Some(count) if count != 1.0 => Cow::Owned(format!("{key}{PLURAL_SUFFIX}")),
        _ => Cow::Borrowed(key),
    }
}
