// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-cutting properties of the boolean adapter.
//!
//! These use regular polygons shaped like brush footprints, since those are
//! the operands the interactions actually feed in.

use core::f64::consts::TAU;

use polybrush_geometry::ring::{is_closed, polygon_area, polygon_from_coords};
use polybrush_geometry::{BooleanAdapter, Polygon, PreparedPolygon, Precision, Relation};

fn disc(cx: f64, cy: f64, r: f64, sides: usize) -> Polygon<f64> {
    let coords: Vec<(f64, f64)> = (0..sides)
        .map(|i| {
            let angle = TAU * i as f64 / sides as f64;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect();
    polygon_from_coords(&coords)
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    polygon_from_coords(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

fn prepared(polygon: &Polygon<f64>) -> PreparedPolygon {
    BooleanAdapter::default().prepare(polygon).unwrap()
}

#[test]
fn difference_never_grows_the_operand() {
    let ops = BooleanAdapter::default();
    let feature = prepared(&square(0.0, 0.0, 100.0, 100.0));
    for (cx, cy) in [(0.0, 0.0), (50.0, 50.0), (100.0, 30.0), (150.0, 150.0)] {
        let brush = prepared(&disc(cx, cy, 40.0, 32));
        match ops.difference(&feature, &brush) {
            Some(rest) => assert!(
                polygon_area(&rest) <= feature.area() + 1e-6,
                "difference with brush at ({cx}, {cy}) grew the feature"
            ),
            None => panic!("brush at ({cx}, {cy}) cannot cover the whole square"),
        }
    }
}

#[test]
fn union_with_contained_disc_matches_container_area() {
    let ops = BooleanAdapter::default();
    let container = prepared(&square(-100.0, -100.0, 100.0, 100.0));
    let merged = ops
        .union(&container, &prepared(&disc(10.0, -5.0, 30.0, 32)))
        .unwrap();
    assert!((polygon_area(&merged) - 40_000.0).abs() < 1e-6);
    assert!(is_closed(merged.exterior()));
}

#[test]
fn normalizing_is_idempotent_for_brush_footprints() {
    let precision = Precision::default();
    for r in [0.5, 7.25, 123.456_789] {
        let footprint = disc(1_234.567_89, -9_876.543_21, r, 32);
        let once = precision.normalize(&footprint);
        assert_eq!(precision.normalize(&once), once);
    }
}

#[test]
fn overlapping_brush_footprints_union_into_one_ring() {
    let ops = BooleanAdapter::default();
    let a = prepared(&disc(0.0, 0.0, 10.0, 32));
    let b = prepared(&disc(12.0, 0.0, 10.0, 32));
    assert_eq!(ops.relate(&a, &b), Relation::Overlapping);
    let merged = ops.union(&a, &b).unwrap();
    let area = polygon_area(&merged);
    assert!(area < a.area() + b.area(), "overlap must be counted once");
    assert!(area > a.area(), "union must be larger than either operand");
}

#[test]
fn relation_is_mirrored() {
    let ops = BooleanAdapter::default();
    let shapes = [
        prepared(&disc(0.0, 0.0, 50.0, 32)),
        prepared(&disc(10.0, 0.0, 5.0, 16)),
        prepared(&disc(60.0, 0.0, 20.0, 32)),
        prepared(&square(200.0, 200.0, 210.0, 210.0)),
    ];
    for a in &shapes {
        for b in &shapes {
            let expected = match ops.relate(a, b) {
                Relation::Contains if a == b => Relation::Contains,
                Relation::Contains => Relation::Within,
                Relation::Within => Relation::Contains,
                other => other,
            };
            assert_eq!(ops.relate(b, a), expected);
        }
    }
}

#[test]
fn validation_scales_to_long_stroke_outlines() {
    // A union chain as long as a sustained brush stroke.
    let ops = BooleanAdapter::default();
    let mut stroke = prepared(&disc(0.0, 0.0, 20.0, 32));
    for step in 1..200_u32 {
        let t = f64::from(step);
        let next = prepared(&disc(t * 4.0, 0.0, 20.0, 32));
        let merged = ops.union(&stroke, &next).unwrap();
        stroke = ops.prepare(&merged).unwrap();
    }
    assert!(stroke.polygon().exterior().0.len() > 100);
    assert!(stroke.area() > 200.0 * 4.0 * 30.0);
}
