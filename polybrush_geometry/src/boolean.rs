// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-polygon wrappers around `geo`'s boolean operations.
//!
//! Operands go through [`BooleanAdapter::prepare`] once: the copy is rounded
//! to the adapter's [`Precision`], validated and bounded. Every operation
//! then takes [`PreparedPolygon`]s, so a polygon used several times in one
//! merge pass is only checked once.
//!
//! Results that come back as multi-polygons are collapsed to one polygon:
//!
//! - [`BooleanAdapter::union`] keeps the **first** component.
//! - [`BooleanAdapter::difference`] keeps the component with the **largest**
//!   ring area.
//!
//! Callers that need every piece of a split (the subtract brush) use
//! [`BooleanAdapter::difference_pieces`] instead.

use geo::{BooleanOps, BoundingRect, Contains, Coord, Intersects, MultiPolygon, Polygon, Rect};
use tracing::debug;

use crate::ring::{polygon_area, validate_polygon};
use crate::{GeometryError, Precision};

/// A polygon rounded to the adapter grid and known to be simple.
///
/// Built by [`BooleanAdapter::prepare`]. Results of boolean operations are
/// plain polygons again and have to be prepared before reuse.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedPolygon {
    polygon: Polygon<f64>,
    bounds: Rect<f64>,
    area: f64,
}

impl PreparedPolygon {
    /// The normalized polygon.
    #[must_use]
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Unwraps the normalized polygon.
    #[must_use]
    pub fn into_polygon(self) -> Polygon<f64> {
        self.polygon
    }

    /// Axis-aligned bounds of the exterior ring.
    #[must_use]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Exterior area minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }
}

/// How two prepared polygons relate, seen from the first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// No shared area. Touching boundaries land here.
    Disjoint,
    /// Shared area, neither contains the other.
    Overlapping,
    /// The first polygon contains the second.
    Contains,
    /// The first polygon lies inside the second.
    Within,
}

/// Boolean operations on single polygons with precision normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BooleanAdapter {
    precision: Precision,
}

impl BooleanAdapter {
    /// Creates an adapter that rounds operands to `precision`.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// The precision applied to operands.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Normalizes and validates one operand.
    ///
    /// Validation runs on the rounded copy: a sliver that collapses on the
    /// precision grid is just as unusable as one that was degenerate already.
    pub fn prepare(&self, polygon: &Polygon<f64>) -> Result<PreparedPolygon, GeometryError> {
        let polygon = self.precision.normalize(polygon);
        validate_polygon(&polygon)?;
        let Some(bounds) = polygon.exterior().bounding_rect() else {
            return Err(GeometryError::TooFewPoints { count: 0 });
        };
        let area = polygon_area(&polygon);
        Ok(PreparedPolygon {
            polygon,
            bounds,
            area,
        })
    }

    /// Cheap pre-check on a raw polygon before preparing it.
    ///
    /// Returns `false` only when the bounds of `raw`, widened by one grid
    /// step, miss the bounds of `prepared`. Such a polygon can never share
    /// area with it.
    #[must_use]
    pub fn bounds_may_touch(&self, prepared: &PreparedPolygon, raw: &Polygon<f64>) -> bool {
        let Some(bounds) = raw.exterior().bounding_rect() else {
            return false;
        };
        let pad = self.precision.step();
        let widened = Rect::new(
            Coord {
                x: bounds.min().x - pad,
                y: bounds.min().y - pad,
            },
            Coord {
                x: bounds.max().x + pad,
                y: bounds.max().y + pad,
            },
        );
        widened.intersects(&prepared.bounds)
    }

    /// Classifies `a` against `b`.
    ///
    /// Containment wins over overlap, and `a` containing `b` is checked
    /// before `b` containing `a`, so equal polygons report
    /// [`Relation::Contains`].
    #[must_use]
    pub fn relate(&self, a: &PreparedPolygon, b: &PreparedPolygon) -> Relation {
        if !a.bounds.intersects(&b.bounds) || !a.polygon.intersects(&b.polygon) {
            return Relation::Disjoint;
        }
        if self.contains(a, b) {
            return Relation::Contains;
        }
        if self.contains(b, a) {
            return Relation::Within;
        }
        let shared: f64 = a
            .polygon
            .intersection(&b.polygon)
            .0
            .iter()
            .map(polygon_area)
            .sum();
        if shared > 0.0 {
            Relation::Overlapping
        } else {
            Relation::Disjoint
        }
    }

    /// Returns `true` when the interiors of `a` and `b` share some area and
    /// neither polygon contains the other.
    #[must_use]
    pub fn overlaps(&self, a: &PreparedPolygon, b: &PreparedPolygon) -> bool {
        self.relate(a, b) == Relation::Overlapping
    }

    /// Returns `true` when `inner` lies entirely within `outer`.
    ///
    /// Touching boundaries still count as contained.
    #[must_use]
    pub fn contains(&self, outer: &PreparedPolygon, inner: &PreparedPolygon) -> bool {
        rect_covers(outer.bounds, inner.bounds) && outer.polygon.contains(&inner.polygon)
    }

    /// Union of `a` and `b`, reduced to its first component.
    ///
    /// Holes of any secondary component are dropped along with it.
    pub fn union(
        &self,
        a: &PreparedPolygon,
        b: &PreparedPolygon,
    ) -> Result<Polygon<f64>, GeometryError> {
        let merged = a.polygon.union(&b.polygon);
        if merged.0.len() > 1 {
            debug!(
                components = merged.0.len(),
                "union produced a multi-polygon; keeping the first component"
            );
        }
        merged.0.into_iter().next().ok_or(GeometryError::EmptyResult)
    }

    /// Parts of `from` not covered by `minus`, reduced to the largest component.
    ///
    /// Returns `None` when `minus` covers `from` completely.
    #[must_use]
    pub fn difference(
        &self,
        from: &PreparedPolygon,
        minus: &PreparedPolygon,
    ) -> Option<Polygon<f64>> {
        let pieces = self.difference_pieces(from, minus);
        if pieces.len() > 1 {
            debug!(
                components = pieces.len(),
                "difference produced a multi-polygon; keeping the largest component"
            );
        }
        pieces.into_iter().next()
    }

    /// Every component of `from` minus `minus`, largest ring area first.
    ///
    /// Components with no area are discarded.
    #[must_use]
    pub fn difference_pieces(
        &self,
        from: &PreparedPolygon,
        minus: &PreparedPolygon,
    ) -> Vec<Polygon<f64>> {
        if !from.bounds.intersects(&minus.bounds) {
            return vec![from.polygon.clone()];
        }
        sorted_by_area(from.polygon.difference(&minus.polygon))
    }
}

fn rect_covers(outer: Rect<f64>, inner: Rect<f64>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x
        && outer.max().y >= inner.max().y
}

fn sorted_by_area(result: MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    let mut pieces: Vec<(f64, Polygon<f64>)> = result
        .0
        .into_iter()
        .map(|p| (polygon_area(&p), p))
        .filter(|(area, _)| *area > 0.0)
        .collect();
    pieces.sort_by(|a, b| b.0.total_cmp(&a.0));
    pieces.into_iter().map(|(_, p)| p).collect()
}
