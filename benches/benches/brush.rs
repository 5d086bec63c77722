// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use polybrush::source::{FeatureSet, FeatureSource, VectorSource};
use polybrush::{BrushInteraction, BrushOptions, InteractionMode, MapEvent};
use polybrush_geometry::ring::polygon_from_coords;

/// A `n` x `n` grid of 40 x 40 squares spaced 60 apart.
fn grid_source(n: u32) -> VectorSource {
    let mut source = VectorSource::new();
    for row in 0..n {
        for col in 0..n {
            let x = f64::from(col) * 60.0;
            let y = f64::from(row) * 60.0;
            source.add_polygon(polygon_from_coords(&[
                (x, y),
                (x + 40.0, y),
                (x + 40.0, y + 40.0),
                (x, y + 40.0),
            ]));
        }
    }
    source
}

/// Diagonal stroke across the grid.
fn stroke(n: u32) -> Vec<MapEvent> {
    let end = f64::from(n) * 60.0;
    let steps = n * 6;
    let mut events = vec![MapEvent::pointer_down(Point::ZERO, 1.0)];
    for i in 1..=steps {
        let t = end * f64::from(i) / f64::from(steps);
        events.push(MapEvent::pointer_drag(Point::new(t, t), 1.0));
    }
    events.push(MapEvent::pointer_up(Point::new(end, end), 1.0));
    events
}

fn bench_strokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("brush_stroke");
    group.sample_size(20);

    for n in [4_u32, 8] {
        let events = stroke(n);
        for (name, mode) in [
            ("draw", InteractionMode::Draw),
            ("add", InteractionMode::Add),
            ("subtract", InteractionMode::Subtract),
            ("stroke_add", InteractionMode::StrokeAdd),
            ("stroke_subtract", InteractionMode::StrokeSubtract),
        ] {
            group.bench_function(format!("{name}(grid={n}x{n})"), |b| {
                b.iter_batched(
                    || {
                        let brush = BrushInteraction::new(
                            BrushOptions::new(mode.clone(), FeatureSet::Source)
                                .with_brush_radius(25.0),
                        )
                        .expect("valid options");
                        (brush, grid_source(n))
                    },
                    |(mut brush, mut source)| {
                        for event in &events {
                            black_box(brush.handle_event(&mut source, event));
                        }
                        black_box(source.feature_ids().len())
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strokes);
criterion_main!(benches);
