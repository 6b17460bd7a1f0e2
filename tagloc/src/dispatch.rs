//! The callbacks tagloc installs into a template engine.

use std::borrow::Cow;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use log::debug;
use tagloc_format::{Category, FormatFn, FormatterEngine};
use tagloc_parser::placeholder::{self, PlaceholderKind};
use tagloc_parser::{evaluate, parse_number, resolve, split_args, Context};

use crate::dates::DateParser;
use crate::engine::{DirectiveCallback, TemplateEngine};
use crate::store::{plural_key, Entry, TranslationStore};
use crate::{Error, Result};

/// A source of "now" in epoch seconds.
pub type Clock = Rc<dyn Fn() -> i64>;

const INSTANTS: [Category; 4] = [
    Category::Date,
    Category::DateLocal,
    Category::Time,
    Category::TimeLocal,
];

/// Mutable state shared by every installed callback.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) store: TranslationStore,
    pub(crate) language: String,
    pub(crate) debug: bool,
    /// Merged under the context of every directive call.
    pub(crate) context: Context,
}

/// Resolves directive input and hands it to the store or the formatter.
///
/// Cloning is cheap: clones share state, formatter, clock and date parser.
#[derive(Clone)]
pub struct DirectiveDispatcher {
    state: Rc<RefCell<State>>,
    formatter: Rc<FormatterEngine>,
    dates: Rc<dyn DateParser>,
    clock: Clock,
}

impl DirectiveDispatcher {
    pub(crate) fn new(
        state: State,
        formatter: FormatterEngine,
        dates: Rc<dyn DateParser>,
        clock: Clock,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            formatter: Rc::new(formatter),
            dates,
            clock,
        }
    }

    pub(crate) fn state(&self) -> Ref<'_, State> {
        self.state.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, State> {
        self.state.borrow_mut()
    }

    pub fn formatter(&self) -> &FormatterEngine {
        &self.formatter
    }

    fn merged<'a>(&self, context: &'a Context) -> Cow<'a, Context> {
        let state = self.state.borrow();
        if state.context.is_empty() {
            return Cow::Borrowed(context);
        }
        let mut merged = state.context.clone();
        merged.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));
        Cow::Owned(merged)
    }

    /// `t(key, qualifier)`: the qualifier may name a context variable.
    pub fn t(&self, key: &str, qualifier: Option<&str>, context: &Context) -> String {
        let context = self.merged(context);
        let count = qualifier.map(|q| resolve(q.trim(), &context));
        let key = plural_key(key.trim(), count.as_deref());
        let state = self.state.borrow();
        let text = state.store.resolve(&state.language, &key, state.debug);
        text.into_owned()
    }

    pub fn number(&self, expression: &str, context: &Context) -> Result<String> {
        let value = evaluate(expression, &self.merged(context))?;
        Ok(self.formatter.number()(value))
    }

    /// Formats `expression` as money; without a code the region's currency is used.
    pub fn currency(
        &self,
        expression: &str,
        code: Option<&str>,
        context: &Context,
    ) -> Result<String> {
        let context = self.merged(context);
        let value = evaluate(expression, &context)?;
        let code = code
            .map(|code| resolve(code.trim(), &context))
            .filter(|code| !code.is_empty());
        Ok(self.formatter.currency()(value, code.as_deref()))
    }

    pub fn instant(
        &self,
        category: Category,
        text: &str,
        pattern: Option<&str>,
        context: &Context,
    ) -> Result<String> {
        let format = match self.formatter.format(category) {
            FormatFn::Instant(format) => format,
            _ => return Err(tagloc_format::Error::UnknownCategory(category.to_string()).into()),
        };
        let epoch = self.resolve_time(text, context)?;
        let pattern = pattern.map(str::trim).filter(|p| !p.is_empty());
        Ok(format(epoch, pattern))
    }

    /// Numbers are epoch seconds, blank text is now, anything else goes
    /// through the date parser in the server zone.
    pub fn resolve_time(&self, text: &str, context: &Context) -> Result<i64> {
        let context = self.merged(context);
        let text = resolve(text.trim(), &context);
        let text = text.trim();
        if let Some(epoch) = parse_number(text) {
            return Ok(epoch as i64);
        }
        let now = (self.clock)();
        if text.is_empty() {
            return Ok(now);
        }
        let zone = self.formatter.settings().server_timezone;
        self.dates
            .parse(text, now, zone)
            .ok_or_else(|| Error::DateParse(text.to_owned()))
    }

    /// Calls the function stored under `name` in the active table.
    pub fn evaluate_function(&self, name: &str, args: Option<&str>) -> Result<String> {
        let name = name.trim();
        let function = {
            let state = self.state.borrow();
            let entry = state
                .store
                .active_table(&state.language)
                .and_then(|table| table.get(name));
            match entry {
                Some(Entry::Callable(function)) => Rc::clone(function),
                Some(Entry::Text(_)) => return Err(Error::NotCallable(name.to_owned())),
                None => return Err(Error::MissingFunction(name.to_owned())),
            }
        };
        let args = split_args(args.unwrap_or_default());
        Ok(function(args.as_slice()))
    }

    /// Installs every function and attribute directive into `engine`.
    pub fn register<E: TemplateEngine + ?Sized>(&self, engine: &mut E) {
        let this = self.clone();
        engine.register_function(
            "t",
            callback(move |key, qualifier, context| Ok(this.t(key, qualifier, context))),
        );

        let this = self.clone();
        engine.register_function(
            "i18n-number",
            callback(move |expression, _, context| {
                Ok(PlaceholderKind::Number.wrap(&this.number(expression, context)?))
            }),
        );
        let this = self.clone();
        engine.register_attribute(
            "i18n-number",
            callback(move |text, _, context| this.number(text, context)),
        );

        let this = self.clone();
        engine.register_function(
            "i18n-currency",
            callback(move |expression, code, context| {
                Ok(PlaceholderKind::Currency.wrap(&this.currency(expression, code, context)?))
            }),
        );
        let this = self.clone();
        engine.register_attribute(
            "i18n-currency",
            callback(move |text, code, context| this.currency(text, code, context)),
        );

        for category in INSTANTS {
            let name = format!("i18n-{category}");
            let kind = match category {
                Category::Time | Category::TimeLocal => PlaceholderKind::Time,
                _ => PlaceholderKind::Date,
            };

            let this = self.clone();
            engine.register_function(
                &name,
                callback(move |text, pattern, context| {
                    Ok(kind.wrap(&this.instant(category, text, pattern, context)?))
                }),
            );
            let this = self.clone();
            engine.register_attribute(
                &name,
                callback(move |text, pattern, context| {
                    this.instant(category, text, pattern, context)
                }),
            );
        }

        let this = self.clone();
        engine.register_function(
            "i18n-evaluate",
            callback(move |name, args, _| {
                let result = this.evaluate_function(name, args)?;
                Ok(placeholder::wrap(name.trim(), &result))
            }),
        );
        debug!("registered translation directives");
    }
}

fn callback<F>(f: F) -> DirectiveCallback
where
    F: Fn(&str, Option<&str>, &Context) -> Result<String> + 'static,
{
    Box::new(f)
}

impl fmt::Debug for DirectiveDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveDispatcher")
            .field("state", &self.state)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
