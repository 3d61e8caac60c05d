use criterion::{black_box, criterion_group, criterion_main, Criterion};

use judgetest_core::ComposedTest;
use judgetest_render::{layout, render, RenderOptions};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let single = ComposedTest::from_texts(["Is seiken the correct fist for jodan tsuki?"]);
    let full = ComposedTest::from_texts((1..=50).map(|i| {
        format!(
            "Question {i}: a technique delivered with good form, sporting attitude and \
             correct distance scores even when the opponent moves away."
        )
    }));
    let options = RenderOptions::default();

    group.bench_function("layout_50", |b| {
        b.iter(|| layout(black_box("Kumite Questions"), black_box(&full), &options))
    });
    group.bench_function("pdf_single", |b| {
        b.iter(|| render(black_box("Kumite Questions"), black_box(&single)))
    });
    group.bench_function("pdf_50", |b| {
        b.iter(|| render(black_box("Kumite Questions"), black_box(&full)))
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
