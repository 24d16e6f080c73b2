//! Benchmarks for record assembly and rendering

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logshaper::{
    AdapterContext, ColorRenderer, LogFields, LogLevel, RecordBuilder, CallerLocation,
};

fn bench_record_build(c: &mut Criterion) {
    let builder = RecordBuilder::default();

    let mut context = AdapterContext::new();
    context.add_constant("app", "bench");
    context.add_provider("seq", || 7_u64);

    c.bench_function("build_plain", |b| {
        b.iter(|| {
            builder.build(
                &context,
                LogLevel::Info,
                black_box("user $id logged in"),
                &[],
                LogFields::new().with_field("id", 42),
                None,
            )
        })
    });

    c.bench_function("build_with_tags_and_location", |b| {
        b.iter(|| {
            builder.build(
                &context,
                LogLevel::Warning,
                black_box("cache miss for $key"),
                &["cache", "perf"],
                LogFields::new().with_field("key", "user:42"),
                Some(CallerLocation::new("bench", "run", 10, "benches/run.rs")),
            )
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let record = r#"{"msg":"user 42 logged in","level":"INFO","id":42,"time":"2025-01-08T10:30:45.123Z"}"#;

    let structured = ColorRenderer::structured();
    c.bench_function("render_structured", |b| {
        b.iter(|| structured.render(black_box(record), LogLevel::Info, true))
    });

    let plain = ColorRenderer::plain();
    c.bench_function("render_plain", |b| {
        b.iter(|| plain.render(black_box(record), LogLevel::Info, true))
    });
}

criterion_group!(benches, bench_record_build, bench_render);
criterion_main!(benches);
