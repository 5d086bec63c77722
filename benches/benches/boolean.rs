// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use polybrush::sketch::BrushSketch;
use polybrush_geometry::{BooleanAdapter, Polygon};

fn disc(center: Point, radius: f64, sides: u32) -> Polygon<f64> {
    let mut sketch = BrushSketch::new(radius, 1.0, sides);
    sketch.set_center(center, 1.0);
    sketch.to_polygon().expect("positioned brush")
}

fn bench_adapter(c: &mut Criterion) {
    let ops = BooleanAdapter::default();
    let mut group = c.benchmark_group("boolean");

    for sides in [16_u32, 32, 128] {
        let raw = disc(Point::new(0.0, 0.0), 100.0, sides);
        let a = ops.prepare(&raw).expect("valid disc");
        let b = ops
            .prepare(&disc(Point::new(60.0, 10.0), 80.0, sides))
            .expect("valid disc");

        group.bench_with_input(BenchmarkId::new("prepare", sides), &raw, |bench, raw| {
            bench.iter(|| black_box(ops.prepare(raw)));
        });

        group.bench_with_input(BenchmarkId::new("union", sides), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(ops.union(a, b)));
        });
        group.bench_with_input(
            BenchmarkId::new("difference_pieces", sides),
            &(&a, &b),
            |bench, (a, b)| {
                bench.iter(|| black_box(ops.difference_pieces(a, b)));
            },
        );
        group.bench_with_input(BenchmarkId::new("relate", sides), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(ops.relate(a, b)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adapter);
criterion_main!(benches);
