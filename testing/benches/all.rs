use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagloc::{Context, Translate, Tz, Value};
use tagloc_testing::MiniEngine;

criterion_main!(benches);
criterion_group!(benches, functions);

fn functions(c: &mut Criterion) {
    c.bench_function("Translate markers", translate_markers);
    c.bench_function("Directives", directives);
}

fn build() -> Translate<MiniEngine> {
    let mut t = Translate::builder(MiniEngine::new())
        .locale("de-DE")
        .server_timezone(Tz::UTC)
        .build();
    t.set_translations("de", [("hi", "hallo"), ("bye", "tschüss")]);
    t.set_translations("de", [("bus", ["Bus", "Busse"])]);
    t
}

fn translate_markers(b: &mut criterion::Bencher<'_>) {
    let t = build();
    let html = "<p><t>hi</t>, <t>bye</t>, <t>missing</t></p>".repeat(50);
    b.iter(|| t.translate(black_box(&html)).unwrap());
}

fn directives(b: &mut criterion::Bencher<'_>) {
    let t = build();
    let mut context = Context::new();
    context.insert("price".into(), Value::from(12.5));
    context.insert("count".into(), Value::from(3));
    let html = r#"<li>{{ t(bus, count) }} <b i18n-currency="USD">price * count</b>
        <i i18n-date>1577941140</i> {{ i18n-number(price / 2) }}</li>"#
        .repeat(20);
    b.iter(|| t.render(black_box(&html), &context).unwrap());
}
