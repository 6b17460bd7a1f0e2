//! The view tagloc has of the host template engine.

use std::ops::{Deref, DerefMut};

use tagloc_parser::Context;

use crate::config::{DEFAULT_CLOSE, DEFAULT_OPEN};
use crate::Result;

/// `(raw, rest, context) -> text`
///
/// For a function directive `name(a, b, c)` the engine passes `a` as `raw`
/// and `b, c` as `rest`. For an attribute directive `raw` is the trimmed
/// text of the element and `rest` the attribute value; the returned text
/// replaces the element's content and the engine removes the attribute.
pub type DirectiveCallback = Box<dyn Fn(&str, Option<&str>, &Context) -> Result<String>>;

/// The tag pair an engine uses to recognize substitution markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN, DEFAULT_CLOSE)
    }
}

/// A template engine tagloc can install its directives into.
///
/// Delimiters are shared state of the engine: [`DelimiterGuard`] is the only
/// place tagloc changes them.
pub trait TemplateEngine {
    fn register_function(&mut self, name: &str, callback: DirectiveCallback);

    fn register_attribute(&mut self, name: &str, callback: DirectiveCallback);

    fn delimiters(&self) -> Delimiters;

    fn set_delimiters(&mut self, delimiters: Delimiters);

    /// Substitutes `context` into `html`, running registered directives.
    fn render(&self, html: &str, context: &Context) -> Result<String>;
}

/// Switches an engine to other delimiters until dropped.
#[must_use]
pub struct DelimiterGuard<'a, E: TemplateEngine + ?Sized> {
    engine: &'a mut E,
    saved: Option<Delimiters>,
}

impl<'a, E: TemplateEngine + ?Sized> DelimiterGuard<'a, E> {
    pub fn swap(engine: &'a mut E, delimiters: Delimiters) -> Self {
        let saved = engine.delimiters();
        engine.set_delimiters(delimiters);
        Self {
            engine,
            saved: Some(saved),
        }
    }
}

impl<E: TemplateEngine + ?Sized> Deref for DelimiterGuard<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.engine
    }
}

impl<E: TemplateEngine + ?Sized> DerefMut for DelimiterGuard<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.engine
    }
}

impl<E: TemplateEngine + ?Sized> Drop for DelimiterGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.engine.set_delimiters(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct Recorder {
        delimiters: Option<Delimiters>,
        history: Vec<Delimiters>,
    }

    impl TemplateEngine for Recorder {
        fn register_function(&mut self, _: &str, _: DirectiveCallback) {}

        fn register_attribute(&mut self, _: &str, _: DirectiveCallback) {}

        fn delimiters(&self) -> Delimiters {
            self.delimiters
                .clone()
                .unwrap_or_else(|| Delimiters::new("{{", "}}"))
        }

        fn set_delimiters(&mut self, delimiters: Delimiters) {
            self.history.push(delimiters.clone());
            self.delimiters = Some(delimiters);
        }

        fn render(&self, html: &str, _: &Context) -> Result<String> {
            if html.is_empty() {
                return Err(Error::Engine("nothing to render".into()));
            }
            Ok(format!("{}{html}", self.delimiters().open))
        }
    }

    #[test]
    fn test_guard_restores() {
        let mut engine = Recorder::default();
        {
            let guard = DelimiterGuard::swap(&mut engine, Delimiters::default());
            assert_eq!(guard.render("x", &Context::new()).unwrap(), "<t>x");
        }
        assert_eq!(engine.delimiters(), Delimiters::new("{{", "}}"));
        assert_eq!(engine.history.len(), 2);
    }

    #[test]
    fn test_guard_restores_on_error() {
        let mut engine = Recorder::default();
        let result = {
            let guard = DelimiterGuard::swap(&mut engine, Delimiters::new("[", "]"));
            guard.render("", &Context::new())
        };
        assert!(matches!(result, Err(Error::Engine(_))));
        assert_eq!(engine.delimiters(), Delimiters::new("{{", "}}"));
    }
}
