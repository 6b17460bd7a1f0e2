use tagloc::{Context, Delimiters, Error, TemplateEngine, Translate, Tz, Value};
use tagloc_testing::MiniEngine;

fn translate(locale: &str) -> Translate<MiniEngine> {
    let mut t = Translate::builder(MiniEngine::new())
        .locale(locale)
        .server_timezone(Tz::UTC)
        .build();
    t.set_translations("de", [("hi", "hallo")]);
    t.set_translations("de", [("bus", ["Bus", "Busse"])]);
    t
}

fn default_delimiters(t: &Translate<MiniEngine>) -> bool {
    t.engine().borrow().delimiters() == Delimiters::new("{{", "}}")
}

#[test]
fn test_translate() {
    let t = translate("de-DE");
    assert_eq!(t.t("bus.plural", None), "Busse");
    assert_eq!(t.t("bus", Some("2")), "Busse");
    assert_eq!(t.t("bus", Some("1")), "Bus");
    assert_eq!(t.t("bus", Some(" ")), "Bus");
    assert_eq!(t.t("bus", None), "Bus");
}

#[test]
fn test_set_debug() {
    let mut t = translate("de-DE");
    t.set_debug(true);
    assert!(t.t("mine", None).starts_with("missing translation"));
    t.set_debug(false);
    assert_eq!(t.t("not valid", None), "not valid");
    assert_eq!(t.t("not valid", Some("5")), "not valid");
}

#[test]
fn test_set_translations() {
    let t = translate("no-LA");
    let res = t.translate("<p><t>hi</t><t>not there</t></p>").unwrap();
    assert!(res.contains("hallo"));
    assert!(res.contains("not there"));
    assert!(default_delimiters(&t));
}

#[test]
fn test_translate_without_translations() {
    let t = Translate::builder(MiniEngine::new()).locale("de-DE").build();
    assert_eq!(t.translate("<t>hi</t>").unwrap(), "<t>hi</t>");
    assert!(default_delimiters(&t));
}

#[test]
fn test_translate_prefers_active_language() {
    let mut t = translate("en-US");
    t.set_translations("en", [("hi", "hello")]);
    assert_eq!(t.translate("<t>hi</t>, {{ hi }}").unwrap(), "hello, {{ hi }}");
}

#[test]
fn test_translate_restores_delimiters_on_error() {
    let t = translate("de-DE");
    let err = t
        .translate("<t>hi</t><b i18n-number>1 plus 1</b>")
        .unwrap_err();
    assert!(matches!(err, Error::Eval(_)));
    assert!(default_delimiters(&t));
}

#[test]
fn test_functions() {
    let t = translate("de-DE");
    let res = t.render("<p>{{t(bus.plural)}}</p>", &Context::new()).unwrap();
    assert_eq!(res, "<p>Busse</p>");

    let mut context = Context::new();
    context.insert("count".into(), Value::from(3));
    assert_eq!(
        t.render("{{ count }} {{ t(bus, count) }}", &context).unwrap(),
        "3 Busse"
    );
}

#[test]
fn test_custom_markers() {
    let mut t = Translate::builder(MiniEngine::new())
        .locale("de-DE")
        .markers(tagloc::Markers::new("[[", "]]").unwrap())
        .build();
    t.set_translations("de", [("hi", "hallo")]);
    assert_eq!(t.translate("[[hi]] <t>hi</t>").unwrap(), "hallo <t>hi</t>");
    assert!(default_delimiters(&t));
}

#[test]
fn test_registered_directives() {
    let t = translate("en-US");
    let engine = t.engine().borrow();
    for name in [
        "t",
        "i18n-number",
        "i18n-currency",
        "i18n-date",
        "i18n-date-local",
        "i18n-time",
        "i18n-time-local",
        "i18n-evaluate",
    ] {
        assert!(engine.has_function(name), "{name}");
    }
    for name in [
        "i18n-number",
        "i18n-currency",
        "i18n-date",
        "i18n-date-local",
        "i18n-time",
        "i18n-time-local",
    ] {
        assert!(engine.has_attribute(name), "{name}");
    }
    assert!(!engine.has_attribute("t"));
    assert!(!engine.has_attribute("i18n-evaluate"));
}

#[test]
fn test_accept_language() {
    let t = Translate::from_accept_language(MiniEngine::new(), "en-GB;q=0.8, fr-CH", None);
    assert_eq!(t.locale(), "fr-CH");
    assert_eq!(t.language(), "fr");
}

#[cfg(feature = "config")]
#[test]
fn test_with_config() {
    let config = tagloc::Config::new(
        r#"
        [general]
        locale = "de-DE"
        debug = true

        [markers]
        open = "<i18n>"
        close = "</i18n>"
        "#,
    )
    .unwrap();
    let mut t = Translate::with_config(MiniEngine::new(), &config);
    t.load_toml("de", "hi = \"hallo\"\nbus = [\"Bus\", \"Busse\"]")
        .unwrap();
    assert_eq!(t.language(), "de");
    assert_eq!(t.translate("<i18n>hi</i18n>").unwrap(), "hallo");
    assert_eq!(t.t("bus", Some("4")), "Busse");
    assert_eq!(t.t("gone", None), "missing translation: gone");
}

#[cfg(feature = "serde-json")]
#[test]
fn test_json_translations() {
    let mut t = translate("fr-FR");
    t.load_json("fr", r#"{"hi": "salut", "bus": ["bus", "bus"]}"#)
        .unwrap();
    assert_eq!(t.translate("<t>hi</t>").unwrap(), "salut");
    assert!(matches!(t.load_json("fr", "{"), Err(Error::Json(_))));
}
