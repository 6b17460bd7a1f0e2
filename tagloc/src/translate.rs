use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use accept_language::parse as accept_language_parse;
use chrono::Utc;
use log::debug;
use tagloc_format::{FormatterEngine, IntlBackend, Tz};
use tagloc_parser::{Context, Value};

use crate::config::{Config, Markers, DEFAULT_LOCALE};
use crate::dates::{DateParser, NaturalDateParser};
use crate::dispatch::{Clock, DirectiveDispatcher, State};
use crate::engine::{DelimiterGuard, Delimiters, TemplateEngine};
use crate::store::{Entry, TranslationInput};
use crate::{Error, Result};

/// Translations and locale formatting for one request.
///
/// Creating a `Translate` installs every directive into the engine, which
/// it then owns. Build a new one per locale.
pub struct Translate<E: TemplateEngine> {
    engine: Rc<RefCell<E>>,
    dispatcher: DirectiveDispatcher,
    language: String,
    markers: Markers,
}

impl<E: TemplateEngine> Translate<E> {
    /// `locale` defaults to `en-US`.
    pub fn new(engine: E, locale: Option<&str>, client_timezone: Option<&str>) -> Self {
        Self::builder(engine)
            .locale(locale.unwrap_or(DEFAULT_LOCALE))
            .client_timezone(client_timezone)
            .build()
    }

    /// Uses the most preferred language of an `Accept-Language` header.
    pub fn from_accept_language(
        engine: E,
        accept_language: &str,
        client_timezone: Option<&str>,
    ) -> Self {
        let preferred = accept_language_parse(accept_language)
            .into_iter()
            .find(|tag| !tag.is_empty() && tag != "*");
        Self::new(engine, preferred.as_deref(), client_timezone)
    }

    pub fn with_config(engine: E, config: &Config) -> Self {
        let mut builder = Self::builder(engine)
            .locale(&config.locale)
            .client_timezone(config.client_timezone.as_deref())
            .debug(config.debug)
            .markers(config.markers.clone());
        if !config.native {
            builder = builder.backend(None);
        }
        builder.build()
    }

    pub fn builder(engine: E) -> TranslateBuilder<E> {
        TranslateBuilder {
            engine,
            locale: DEFAULT_LOCALE.to_owned(),
            client_timezone: None,
            server_timezone: None,
            backend: None,
            clock: None,
            dates: None,
            markers: Markers::default(),
            debug: false,
        }
    }

    pub fn set_translations<I, K, V>(&mut self, language: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TranslationInput>,
    {
        self.dispatcher
            .state_mut()
            .store
            .set_translations(language, entries);
    }

    /// Stores a function `i18n-evaluate` can call by `name`.
    pub fn set_callable<F>(&mut self, language: &str, name: &str, f: F)
    where
        F: Fn(&[&str]) -> String + 'static,
    {
        self.dispatcher
            .state_mut()
            .store
            .set_callable(language, name, f);
    }

    #[cfg(feature = "config")]
    pub fn load_toml(&mut self, language: &str, source: &str) -> Result<()> {
        self.dispatcher
            .state_mut()
            .store
            .load_toml(language, source)
    }

    #[cfg(feature = "serde-json")]
    pub fn load_json(&mut self, language: &str, source: &str) -> Result<()> {
        self.dispatcher
            .state_mut()
            .store
            .load_json(language, source)
    }

    /// In debug mode a missing translation renders as `missing translation: <key>`.
    pub fn set_debug(&mut self, debug: bool) {
        self.dispatcher.state_mut().debug = debug;
    }

    /// Variables every directive sees in addition to the engine's context.
    pub fn set_context_data(&mut self, context: Context) {
        self.dispatcher.state_mut().context = context;
    }

    pub fn locale(&self) -> &str {
        self.formatter().locale().tag()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn formatter(&self) -> &FormatterEngine {
        self.dispatcher.formatter()
    }

    pub fn dispatcher(&self) -> &DirectiveDispatcher {
        &self.dispatcher
    }

    pub fn engine(&self) -> &Rc<RefCell<E>> {
        &self.engine
    }

    /// Translates `key`, picking the plural form when `qualifier` is a
    /// number other than 1.
    pub fn t(&self, key: &str, qualifier: Option<&str>) -> String {
        self.dispatcher.t(key, qualifier, &Context::new())
    }

    /// Renders `html` with the engine's own delimiters.
    pub fn render(&self, html: &str, context: &Context) -> Result<String> {
        let engine = self.engine.try_borrow().map_err(|_| Error::EngineBusy)?;
        let mut merged = self.dispatcher.state().context.clone();
        merged.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));
        engine.render(html, &merged)
    }

    /// Replaces every marked key in `html` by its translation.
    ///
    /// The engine is switched to the marker delimiters for the duration of
    /// the call and always switched back, also when rendering fails.
    pub fn translate(&self, html: &str) -> Result<String> {
        let context = table_context(&self.dispatcher.state(), &self.language);
        let mut engine = self.engine.try_borrow_mut().map_err(|_| Error::EngineBusy)?;
        let delimiters = Delimiters::new(&self.markers.open, &self.markers.close);
        let guard = DelimiterGuard::swap(&mut *engine, delimiters);
        let output = guard.render(html, &context);
        drop(guard);
        output
    }
}

/// The text entries of the active table, as render context.
fn table_context(state: &State, language: &str) -> Context {
    let Some(table) = state.store.active_table(language) else {
        return Context::new();
    };
    table
        .iter()
        .filter_map(|(key, entry)| match entry {
            Entry::Text(text) => Some((key.clone(), Value::Str(text.clone()))),
            Entry::Callable(_) => None,
        })
        .collect()
}

impl<E: TemplateEngine> fmt::Debug for Translate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translate")
            .field("language", &self.language)
            .field("markers", &self.markers)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[must_use]
pub struct TranslateBuilder<E: TemplateEngine> {
    engine: E,
    locale: String,
    client_timezone: Option<String>,
    server_timezone: Option<Tz>,
    backend: Option<Option<Rc<dyn IntlBackend>>>,
    clock: Option<Clock>,
    dates: Option<Rc<dyn DateParser>>,
    markers: Markers,
    debug: bool,
}

impl<E: TemplateEngine> TranslateBuilder<E> {
    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_owned();
        self
    }

    pub fn client_timezone(mut self, zone: Option<&str>) -> Self {
        self.client_timezone = zone.map(str::to_owned);
        self
    }

    pub fn server_timezone(mut self, zone: Tz) -> Self {
        self.server_timezone = Some(zone);
        self
    }

    /// `None` forces the fallback formatter.
    pub fn backend(mut self, backend: Option<Rc<dyn IntlBackend>>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replaces the wall clock used for blank date input.
    pub fn clock<F: Fn() -> i64 + 'static>(mut self, clock: F) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }

    pub fn date_parser<P: DateParser + 'static>(mut self, parser: P) -> Self {
        self.dates = Some(Rc::new(parser));
        self
    }

    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> Translate<E> {
        let mut formatter = FormatterEngine::builder(&self.locale)
            .client_timezone(self.client_timezone.as_deref());
        if let Some(zone) = self.server_timezone {
            formatter = formatter.server_timezone(zone);
        }
        if let Some(backend) = self.backend {
            formatter = formatter.backend(backend);
        }
        let formatter = formatter.build();
        let language = formatter.locale().language().to_owned();
        debug!("translating for {} ({language})", self.locale);

        let state = State {
            language: language.clone(),
            debug: self.debug,
            ..State::default()
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Rc::new(|| Utc::now().timestamp()));
        let dates = self.dates.unwrap_or_else(|| Rc::new(NaturalDateParser));
        let dispatcher = DirectiveDispatcher::new(state, formatter, dates, clock);

        let mut engine = self.engine;
        dispatcher.register(&mut engine);
        Translate {
            engine: Rc::new(RefCell::new(engine)),
            dispatcher,
            language,
            markers: self.markers,
        }
    }
}
