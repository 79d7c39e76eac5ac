use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lectern::excerpt::{select_densest_run, MatchRange};
use lectern::matcher::match_positions;

fn bench_run_selection(c: &mut Criterion) {
    // Clustered like real pages: bursts of nearby matches with gaps.
    let ranges: Vec<MatchRange> = (0..100)
        .map(|i| MatchRange::new(i * 37 + (i % 7) * 400, 6))
        .collect();

    c.bench_function("select_densest_run_100", |b| {
        b.iter(|| select_densest_run(black_box(&ranges), black_box(200)))
    });
}

fn bench_match_positions(c: &mut Criterion) {
    let text = "the convolution of an image with a kernel blurs the image "
        .repeat(200);

    c.bench_function("match_positions_12k_chars", |b| {
        b.iter(|| match_positions(black_box(&text), black_box("image kernel")))
    });
}

criterion_group!(benches, bench_run_selection, bench_match_positions);
criterion_main!(benches);
