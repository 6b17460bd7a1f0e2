#![cfg(feature = "intl")]

use tagloc::{Category, Context, FormatterEngine, Translate, Tz};
use tagloc_testing::MiniEngine;

// 2020-01-02 04:59:00 UTC
const NOW: i64 = 1_577_941_140;

fn native(locale: &str, client: Option<&str>, server: Tz) -> Translate<MiniEngine> {
    Translate::builder(MiniEngine::new())
        .locale(locale)
        .client_timezone(client)
        .server_timezone(server)
        .clock(|| NOW)
        .build()
}

fn render(t: &Translate<MiniEngine>, html: &str) -> String {
    t.render(html, &Context::new()).unwrap()
}

#[test]
fn test_attribute_currency() {
    let t = native("de-DE", None, Tz::UTC);
    assert!(t.formatter().is_native());
    assert_eq!(
        render(&t, r#"<p i18n-currency="USD">30.13</p>"#),
        "<p>30,13\u{a0}$</p>"
    );
    assert_eq!(render(&t, "<p i18n-currency>12.13</p>"), "<p>12,13\u{a0}€</p>");

    let t = native("en-US", None, Tz::UTC);
    assert_eq!(render(&t, "<p i18n-currency>12.13</p>"), "<p>$12.13</p>");
}

#[test]
fn test_attribute_number() {
    let t = native("de-DE", None, Tz::UTC);
    assert_eq!(render(&t, "<p i18n-number>30.13</p>"), "<p>30,13</p>");
    assert_eq!(render(&t, "<p i18n-number>12.3</p>"), "<p>12,3</p>");
}

#[test]
fn test_attribute_date_local() {
    let new_york: Tz = "America/New_York".parse().unwrap();
    let t = native("de-DE", None, new_york);
    assert_eq!(
        render(&t, "<p i18n-date-local>2020-01-01 23:59</p>"),
        "<p>02.01.2020</p>"
    );
}

#[test]
fn test_attribute_time() {
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let t = native("de-DE", Some("Europe/Berlin"), berlin);
    assert_eq!(render(&t, &format!("<p i18n-time>{NOW}</p>")), "<p>5:59</p>");
    assert_eq!(
        render(&t, &format!(r#"<p i18n-time-local="HH:mm">{NOW}</p>"#)),
        "<p>05:59</p>"
    );
}

#[test]
fn test_local_date_ignores_server_zone() {
    let pattern = "<p i18n-date-local=\"dd.MM.yyyy HH:mm\"></p>";
    let a = native("de-DE", Some("America/New_York"), Tz::Europe__Berlin);
    let b = native("de-DE", Some("America/New_York"), Tz::Asia__Tokyo);
    assert_eq!(render(&a, pattern), "<p>01.01.2020 23:59</p>");
    assert_eq!(render(&a, pattern), render(&b, pattern));
}

#[test]
fn test_local_date_matches_process_zone() {
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let call = FormatterEngine::builder("de-DE")
        .server_timezone(berlin)
        .build()
        .format(Category::DateLocal)
        .into_instant()
        .unwrap();
    // Europe/Busingen shares Berlin's offsets
    assert_eq!(call(NOW, Some("dd.MM.yyyy HH:mm")), "02.01.2020 05:59");

    let call = FormatterEngine::builder("en-US")
        .server_timezone(berlin)
        .build()
        .format(Category::DateLocal)
        .into_instant()
        .unwrap();
    assert_eq!(call(NOW, None), "01/01/2020");
}

#[test]
fn test_functions_are_unwrapped() {
    let t = native("de-DE", None, Tz::UTC);
    assert_eq!(
        render(&t, "{{ i18n-number(1234567.891) }} {{ i18n-currency(2 * 3, EUR) }}"),
        "1.234.567,891 6,00\u{a0}€"
    );
}

#[test]
fn test_native_and_fallback_agree_on_dates() {
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let native = native("de-DE", None, berlin);
    let fallback = Translate::builder(MiniEngine::new())
        .locale("de-DE")
        .server_timezone(berlin)
        .backend(None)
        .clock(|| NOW)
        .build();
    for html in [
        "<p i18n-date></p>",
        "<p i18n-time></p>",
        "<p i18n-date=\"dd.MM.yy HH:mm:ss\"></p>",
    ] {
        assert_eq!(render(&native, html), render(&fallback, html));
    }
}
