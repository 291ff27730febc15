//! Criterion microbenches for label parsing and box rendering.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use image::RgbImage;
use std::hint::black_box;

use yoloviz::ir::Annotation;
use yoloviz::render::BoxRenderer;

const LABEL_FIXTURE: &str = "0 0.481719 0.634028 0.690625 0.713278
1 0.741094 0.524306 0.314750 0.933389
45 0.3 0.3 0.1 0.1
2   0.5\t0.5 0.25 0.25
7 1.0 1.0 1.0 1.0
";

/// Benchmark parsing a whole label file, line by line.
fn bench_parse_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotation_parse");
    group.throughput(Throughput::Bytes(LABEL_FIXTURE.len() as u64));

    group.bench_function("from_line", |b| {
        b.iter(|| {
            let parsed: Result<Vec<Annotation>, _> = black_box(LABEL_FIXTURE)
                .lines()
                .map(Annotation::from_line)
                .collect();
            black_box(parsed.unwrap())
        })
    });

    group.finish();
}

/// Benchmark drawing boxes onto an in-memory 640x480 image.
fn bench_draw(c: &mut Criterion) {
    let annotations: Vec<Annotation> = LABEL_FIXTURE
        .lines()
        .map(|line| Annotation::from_line(line).unwrap())
        .collect();
    let renderer = BoxRenderer::default();

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(annotations.len() as u64));

    group.bench_function("draw_annotations", |b| {
        b.iter(|| {
            let mut image = RgbImage::new(640, 480);
            renderer.draw_annotations(&mut image, black_box(&annotations));
            black_box(image)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse_lines, bench_draw);
criterion_main!(benches);
