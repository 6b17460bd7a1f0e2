//! A small reference template engine for exercising tagloc end to end.
//!
//! [`MiniEngine`] knows three things:
//!
//! * `<tag ... i18n-name="value">text</tag>` runs the attribute directive
//!   `i18n-name` on `text`, replaces the element content with the result and
//!   drops the attribute;
//! * `{{ name(a, b) }}` runs the function directive `name` with `a` and `b`;
//! * `{{ name }}` is replaced by the context value `name`.
//!
//! Markers it cannot resolve are left in place. Placeholders emitted by
//! function directives are unwrapped after substitution.

#![deny(unreachable_pub)]
#![deny(elided_lifetimes_in_paths)]

use std::collections::HashMap;

use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tagloc::placeholder::unwrap_all;
use tagloc::{
    split_first_arg, Context, Delimiters, DirectiveCallback, Error, Result, TemplateEngine,
};

static ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<(?P<tag>[a-zA-Z][\w-]*)(?P<before>[^>]*?)\s(?P<attr>i18n-[a-z-]+)(?:="(?P<value>[^"]*)")?(?P<after>[^>]*)>(?P<text>[^<]*)</(?P<close>[a-zA-Z][\w-]*)>"#,
    )
    .expect("element pattern")
});

static CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>[\w-]+)\((?P<args>.*)\)$").expect("call pattern"));

pub struct MiniEngine {
    functions: HashMap<String, DirectiveCallback>,
    attributes: HashMap<String, DirectiveCallback>,
    delimiters: Delimiters,
}

impl Default for MiniEngine {
    fn default() -> Self {
        Self {
            functions: HashMap::new(),
            attributes: HashMap::new(),
            delimiters: Delimiters::new("{{", "}}"),
        }
    }
}

impl MiniEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    fn markers(&self) -> Result<Regex> {
        let pattern = format!(
            "(?s){}(?P<inner>.*?){}",
            regex::escape(&self.delimiters.open),
            regex::escape(&self.delimiters.close),
        );
        Regex::new(&pattern).map_err(|e| Error::Engine(e.to_string()))
    }

    fn elements(&self, html: &str, markers: &Regex, context: &Context) -> Result<String> {
        replace_all(&ELEMENT, html, |caps| {
            let attribute = &caps["attr"];
            let Some(callback) = self.attributes.get(attribute) else {
                return Ok(None);
            };
            if caps["tag"] != caps["close"] {
                return Ok(None);
            }
            let text = self.substitute(&caps["text"], markers, context)?;
            let value = caps.name("value").map(|m| m.as_str());
            trace!("attribute {attribute} on {:?}", text.trim());
            let content = callback(text.trim(), value, context)?;
            Ok(Some(format!(
                "<{}{}{}>{content}</{}>",
                &caps["tag"], &caps["before"], &caps["after"], &caps["close"]
            )))
        })
    }

    fn substitute(&self, html: &str, markers: &Regex, context: &Context) -> Result<String> {
        replace_all(markers, html, |caps| {
            let inner = caps["inner"].trim();
            if let Some(call) = CALL.captures(inner) {
                if let Some(callback) = self.functions.get(&call["name"]) {
                    let (raw, rest) = split_first_arg(&call["args"]);
                    trace!("function {}", &call["name"]);
                    return callback(raw, rest, context).map(Some);
                }
            }
            Ok(context.get(inner).map(|value| value.as_text().into_owned()))
        })
    }
}

/// Like `Regex::replace_all`, but the replacement may fail or decline.
fn replace_all<'t, F>(regex: &Regex, text: &'t str, mut replace: F) -> Result<String>
where
    F: FnMut(&Captures<'t>) -> Result<Option<String>>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        match replace(&caps)? {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

impl TemplateEngine for MiniEngine {
    fn register_function(&mut self, name: &str, callback: DirectiveCallback) {
        self.functions.insert(name.to_owned(), callback);
    }

    fn register_attribute(&mut self, name: &str, callback: DirectiveCallback) {
        self.attributes.insert(name.to_owned(), callback);
    }

    fn delimiters(&self) -> Delimiters {
        self.delimiters.clone()
    }

    fn set_delimiters(&mut self, delimiters: Delimiters) {
        self.delimiters = delimiters;
    }

    fn render(&self, html: &str, context: &Context) -> Result<String> {
        let markers = self.markers()?;
        let html = self.elements(html, &markers, context)?;
        let html = self.substitute(&html, &markers, context)?;
        let html = unwrap_all(&html).into_owned();
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use tagloc::Value;

    use super::*;

    #[test]
    fn test_plain_substitution() {
        let engine = MiniEngine::new();
        let mut context = Context::new();
        context.insert("name".into(), Value::from("Ada"));
        assert_eq!(
            engine.render("Hi {{ name }}, {{ other }}", &context).unwrap(),
            "Hi Ada, {{ other }}"
        );
    }

    #[test]
    fn test_functions_and_attributes() {
        let mut engine = MiniEngine::new();
        engine.register_function(
            "upper",
            Box::new(|raw: &str, rest: Option<&str>, _: &Context| -> Result<String> {
                Ok(format!("{}|{}", raw.to_uppercase(), rest.unwrap_or("-")))
            }),
        );
        engine.register_attribute(
            "i18n-shout",
            Box::new(|text: &str, value: Option<&str>, _: &Context| -> Result<String> {
                Ok(format!("{text}{}", value.unwrap_or("!")))
            }),
        );
        let html = r#"<b class="x" i18n-shout="?!"> hey </b>{{upper(a, b, c)}}<i i18n-other>x</i>"#;
        assert_eq!(
            engine.render(html, &Context::new()).unwrap(),
            r#"<b class="x">hey?!</b>A|b, c<i i18n-other>x</i>"#
        );
    }

    #[test]
    fn test_failing_directive() {
        let mut engine = MiniEngine::new();
        engine.register_function(
            "fail",
            Box::new(|_: &str, _: Option<&str>, _: &Context| -> Result<String> {
                Err(Error::Engine("nope".into()))
            }),
        );
        assert!(engine.render("{{fail()}}", &Context::new()).is_err());
    }
}
