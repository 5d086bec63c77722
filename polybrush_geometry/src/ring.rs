// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring-level helpers: closure, shoelace area and simple-polygon validation.
//!
//! Areas here are computed from ring coordinates directly rather than through
//! `geo::Area`, so that "largest component" decisions agree with the area
//! checks the interactions perform on their own polygons.

use geo::sweep::Intersections;
use geo::{Coord, Line, LineString, Polygon};
use hashbrown::HashMap;

use crate::GeometryError;

/// Appends the first coordinate to `coords` if the ring is not already closed.
///
/// Empty input is left untouched.
pub fn close_ring(coords: &mut Vec<Coord<f64>>) {
    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
        if first != last {
            coords.push(first);
        }
    }
}

/// Returns `true` when the ring has at least two coordinates and its first
/// and last coordinates are equal.
#[must_use]
pub fn is_closed(ring: &LineString<f64>) -> bool {
    match (ring.0.first(), ring.0.last()) {
        (Some(first), Some(last)) => ring.0.len() > 1 && first == last,
        _ => false,
    }
}

/// Signed shoelace area of a ring; counter-clockwise rings are positive.
///
/// Works for both closed and open rings.
#[must_use]
pub fn signed_ring_area(ring: &LineString<f64>) -> f64 {
    let coords = &ring.0;
    let n = coords.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = coords[i];
        let b = coords[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Unsigned shoelace area of a ring.
#[must_use]
pub fn ring_area(ring: &LineString<f64>) -> f64 {
    signed_ring_area(ring).abs()
}

/// Area of a polygon: exterior ring area minus the area of its holes.
#[must_use]
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    let holes: f64 = polygon.interiors().iter().map(ring_area).sum();
    (ring_area(polygon.exterior()) - holes).max(0.0)
}

/// Builds a polygon from `(x, y)` pairs, closing the exterior ring.
#[must_use]
pub fn polygon_from_coords(coords: &[(f64, f64)]) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = coords.iter().map(|&(x, y)| Coord { x, y }).collect();
    close_ring(&mut ring);
    Polygon::new(LineString::new(ring), Vec::new())
}

/// Checks that the exterior ring of `polygon` describes a simple polygon.
///
/// Holes are not inspected: the brush interactions only ever rewrite the
/// outer ring, and the boolean backend tolerates odd holes.
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<(), GeometryError> {
    let coords = distinct_vertices(polygon.exterior());
    if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFinite);
    }
    if coords.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            count: coords.len(),
        });
    }
    if let Some((first_edge, second_edge)) = first_self_intersection(&coords) {
        return Err(GeometryError::SelfIntersection {
            first_edge,
            second_edge,
        });
    }
    if ring_area(polygon.exterior()) <= f64::EPSILON {
        return Err(GeometryError::ZeroArea);
    }
    Ok(())
}

/// Ring vertices without the closing coordinate and without consecutive duplicates.
fn distinct_vertices(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Returns the lowest pair of non-adjacent edges that cross or touch, if any.
///
/// Crossings come from a sweep over the ring's edges, so the cost grows with
/// `(n + k) log n` for `n` edges and `k` reported crossings. Adjacent edges
/// always meet at their shared vertex and are not reported.
fn first_self_intersection(vertices: &[Coord<f64>]) -> Option<(usize, usize)> {
    let n = vertices.len();
    if n < 4 {
        return None;
    }
    let edges: Vec<Line<f64>> = (0..n)
        .map(|i| Line::new(vertices[i], vertices[(i + 1) % n]))
        .collect();
    let mut index: HashMap<EdgeKey, usize> = HashMap::with_capacity(n);
    for (i, edge) in edges.iter().enumerate() {
        index.entry(edge_key(edge)).or_insert(i);
    }

    edges
        .into_iter()
        .collect::<Intersections<Line<f64>>>()
        .filter_map(|(a, b, _)| {
            let a = *index.get(&edge_key(&a))?;
            let b = *index.get(&edge_key(&b))?;
            let (i, j) = if a <= b { (a, b) } else { (b, a) };
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            (!adjacent).then_some((i, j))
        })
        .min()
}

/// Exact bit pattern of an edge's endpoints.
type EdgeKey = [u64; 4];

fn edge_key(line: &Line<f64>) -> EdgeKey {
    [
        line.start.x.to_bits(),
        line.start.y.to_bits(),
        line.end.x.to_bits(),
        line.end.y.to_bits(),
    ]
}
