// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The brush cursor and its on-screen overlay.
//!
//! [`BrushSketch`] owns the circular brush. Its radius is configured in
//! device pixels and turned into map units with the current view
//! resolution, so the brush keeps its on-screen size when the map zooms.
//!
//! [`Overlay`] is the render model for transient feedback: the brush cursor
//! and, while drawing, the in-progress sketch polygon. Mutations only mark
//! it dirty; [`Overlay::take_redraw`] hands the items out once per batch.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use polybrush::sketch::BrushSketch;
//! use polybrush_geometry::ring::is_closed;
//!
//! let mut brush = BrushSketch::new(10.0, 5.0, 32);
//! assert!(brush.to_polygon().is_none());
//!
//! brush.set_center(Point::new(100.0, 100.0), 2.0);
//! assert_eq!(brush.map_radius(), 20.0);
//!
//! let polygon = brush.to_polygon().unwrap();
//! assert!(is_closed(polygon.exterior()));
//! assert_eq!(polygon.exterior().0.len(), 33);
//!
//! // Moving the brush requested exactly one redraw.
//! assert!(brush.overlay_mut().take_redraw().is_some());
//! assert!(brush.overlay_mut().take_redraw().is_none());
//! ```

use core::f64::consts::TAU;

use geo::{Coord, LineString, Polygon};
use kurbo::{Circle, Point};
use peniko::Color;
use polybrush_geometry::ring::close_ring;
use smallvec::{SmallVec, smallvec};

/// One stroke/fill pass used to render an overlay item.
#[derive(Clone, Debug)]
pub struct StyleLayer {
    /// Fill color, if the item is filled.
    pub fill: Option<Color>,
    /// Stroke color, if the item is stroked.
    pub stroke: Option<Color>,
    /// Stroke width in device pixels.
    pub stroke_width: f64,
}

/// Styles for overlay items, drawn layer by layer in order.
#[derive(Clone, Debug)]
pub struct OverlayStyle {
    /// Layers for the brush cursor.
    pub cursor: SmallVec<[StyleLayer; 2]>,
    /// Layers for the in-progress sketch polygon.
    pub sketch: SmallVec<[StyleLayer; 2]>,
}

const WHITE: Color = Color::from_rgba8(255, 255, 255, 255);
const TRANSLUCENT_WHITE: Color = Color::from_rgba8(255, 255, 255, 128);
const EDIT_BLUE: Color = Color::from_rgba8(0, 153, 255, 255);

impl Default for OverlayStyle {
    /// The usual editing look: white halo under a blue outline over a
    /// translucent white fill.
    fn default() -> Self {
        let halo = StyleLayer {
            fill: Some(TRANSLUCENT_WHITE),
            stroke: Some(WHITE),
            stroke_width: 5.0,
        };
        let outline = StyleLayer {
            fill: None,
            stroke: Some(EDIT_BLUE),
            stroke_width: 3.0,
        };
        Self {
            cursor: smallvec![halo.clone(), outline.clone()],
            sketch: smallvec![halo, outline],
        }
    }
}

/// Something drawn on the overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayItem {
    /// The brush footprint, in map units.
    Cursor(Circle),
    /// The in-progress draw sketch.
    Sketch(Polygon<f64>),
}

impl OverlayItem {
    /// Layers to draw this item with.
    #[must_use]
    pub fn layers<'a>(&self, style: &'a OverlayStyle) -> &'a [StyleLayer] {
        match self {
            Self::Cursor(_) => &style.cursor,
            Self::Sketch(_) => &style.sketch,
        }
    }
}

/// Render model for transient brush feedback.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    cursor: Option<Circle>,
    sketch: Option<Polygon<f64>>,
    style: OverlayStyle,
    dirty: bool,
}

impl Overlay {
    /// Creates an empty overlay drawn with `style`.
    #[must_use]
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// The overlay style.
    #[must_use]
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Replaces the style and requests a redraw.
    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
        self.dirty = true;
    }

    /// The brush cursor, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<Circle> {
        self.cursor
    }

    /// The sketch polygon, if any.
    #[must_use]
    pub fn sketch(&self) -> Option<&Polygon<f64>> {
        self.sketch.as_ref()
    }

    pub(crate) fn set_cursor(&mut self, cursor: Option<Circle>) {
        self.cursor = cursor;
        self.dirty = true;
    }

    /// Shows `sketch` as the in-progress polygon, or hides it with `None`.
    pub fn set_sketch(&mut self, sketch: Option<Polygon<f64>>) {
        if self.sketch.is_none() && sketch.is_none() {
            return;
        }
        self.sketch = sketch;
        self.dirty = true;
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.cursor = None;
        self.sketch = None;
        self.dirty = true;
    }

    /// Returns `true` if a redraw is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current items, cursor last so it draws on top.
    #[must_use]
    pub fn items(&self) -> SmallVec<[OverlayItem; 2]> {
        let mut items = SmallVec::new();
        if let Some(sketch) = &self.sketch {
            items.push(OverlayItem::Sketch(sketch.clone()));
        }
        if let Some(cursor) = self.cursor {
            items.push(OverlayItem::Cursor(cursor));
        }
        items
    }

    /// Returns the items to draw if anything changed since the last call.
    pub fn take_redraw(&mut self) -> Option<SmallVec<[OverlayItem; 2]>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.items())
    }
}

/// The circular brush.
#[derive(Clone, Debug)]
pub struct BrushSketch {
    center: Option<Point>,
    pixel_radius: f64,
    min_radius: f64,
    resolution: f64,
    sides: u32,
    overlay: Overlay,
}

impl BrushSketch {
    /// Creates a brush of `pixel_radius` device pixels, never smaller than
    /// `min_radius`, approximated by `sides`-gons.
    ///
    /// The brush has no position until [`set_center`](Self::set_center).
    #[must_use]
    pub fn new(pixel_radius: f64, min_radius: f64, sides: u32) -> Self {
        Self {
            center: None,
            pixel_radius: pixel_radius.max(min_radius),
            min_radius,
            resolution: 1.0,
            sides: sides.max(3),
            overlay: Overlay::default(),
        }
    }

    /// Replaces the overlay style.
    #[must_use]
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.overlay.set_style(style);
        self
    }

    /// Center in map units, once positioned.
    #[must_use]
    pub fn center(&self) -> Option<Point> {
        self.center
    }

    /// Radius in device pixels.
    #[must_use]
    pub fn pixel_radius(&self) -> f64 {
        self.pixel_radius
    }

    /// Smallest allowed radius in device pixels.
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    /// Map units per device pixel used for the map radius.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Radius in map units.
    #[must_use]
    pub fn map_radius(&self) -> f64 {
        self.pixel_radius * self.resolution
    }

    /// The brush footprint in map units, once positioned.
    #[must_use]
    pub fn circle(&self) -> Option<Circle> {
        self.center.map(|c| Circle::new(c, self.map_radius()))
    }

    /// Moves the brush to `center`, creating it on first call.
    ///
    /// Non-finite positions and resolutions are ignored.
    pub fn set_center(&mut self, center: Point, resolution: f64) {
        if !center.is_finite() {
            return;
        }
        if resolution.is_finite() && resolution > 0.0 {
            self.resolution = resolution;
        }
        self.center = Some(center);
        self.sync_cursor();
    }

    /// Sets the radius in device pixels, clamped to the minimum. Returns the
    /// radius actually applied.
    pub fn set_pixel_radius(&mut self, radius: f64) -> f64 {
        if radius.is_finite() {
            self.pixel_radius = radius.max(self.min_radius);
            self.sync_cursor();
        }
        self.pixel_radius
    }

    /// Re-derives the map radius for a new view resolution.
    pub fn set_resolution(&mut self, resolution: f64) {
        if !(resolution.is_finite() && resolution > 0.0) || resolution == self.resolution {
            return;
        }
        self.resolution = resolution;
        self.sync_cursor();
    }

    /// Regular polygon approximation of the brush with a closed ring.
    ///
    /// Vertices run counter-clockwise from angle zero.
    #[must_use]
    pub fn to_polygon(&self) -> Option<Polygon<f64>> {
        let center = self.center?;
        let radius = self.map_radius();
        let step = TAU / f64::from(self.sides);
        let mut coords: Vec<Coord<f64>> = (0..self.sides)
            .map(|i| {
                let (sin, cos) = (step * f64::from(i)).sin_cos();
                Coord {
                    x: center.x + radius * cos,
                    y: center.y + radius * sin,
                }
            })
            .collect();
        close_ring(&mut coords);
        Some(Polygon::new(LineString::new(coords), Vec::new()))
    }

    /// The overlay.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Mutable access to the overlay.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Forgets the brush position and clears the overlay.
    pub fn reset(&mut self) {
        self.center = None;
        self.overlay.clear();
    }

    fn sync_cursor(&mut self) {
        let circle = self.circle();
        self.overlay.set_cursor(circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polybrush_geometry::ring::{is_closed, polygon_area};

    #[test]
    fn ring_is_closed_for_many_states() {
        let mut brush = BrushSketch::new(7.0, 5.0, 3);
        for (sides, i) in [3_u32, 4, 17, 32, 64].into_iter().zip(0_u32..) {
            brush.sides = sides;
            let offset = f64::from(i) * 1234.567;
            brush.set_center(Point::new(offset, -offset), 0.25 + offset);
            brush.set_pixel_radius(3.0 + offset);
            let polygon = brush.to_polygon().unwrap();
            let ring = polygon.exterior();
            assert!(is_closed(ring), "open ring with {sides} sides");
            assert_eq!(ring.0.len(), sides as usize + 1);
        }
    }

    #[test]
    fn first_vertex_is_at_angle_zero() {
        let mut brush = BrushSketch::new(10.0, 5.0, 32);
        brush.set_center(Point::new(1.0, 2.0), 1.0);
        let polygon = brush.to_polygon().unwrap();
        let first = polygon.exterior().0[0];
        assert!((first.x - 11.0).abs() < 1e-12);
        assert!((first.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn polygon_area_approaches_circle() {
        let mut brush = BrushSketch::new(50.0, 5.0, 32);
        brush.set_center(Point::ZERO, 1.0);
        let area = polygon_area(&brush.to_polygon().unwrap());
        // 32-gon inscribed in r = 50.
        let expected = 16.0 * 2500.0 * (TAU / 32.0).sin();
        assert!((area - expected).abs() < 1e-6);
    }

    #[test]
    fn radius_is_clamped_and_scaled() {
        let mut brush = BrushSketch::new(2.0, 5.0, 32);
        assert_eq!(brush.pixel_radius(), 5.0);

        assert_eq!(brush.set_pixel_radius(1.0), 5.0);
        assert_eq!(brush.set_pixel_radius(f64::NAN), 5.0);
        assert_eq!(brush.set_pixel_radius(40.0), 40.0);

        brush.set_resolution(0.5);
        assert_eq!(brush.map_radius(), 20.0);
        brush.set_resolution(-1.0);
        assert_eq!(brush.resolution(), 0.5);
    }

    #[test]
    fn resolution_change_rescales_cursor() {
        let mut brush = BrushSketch::new(10.0, 5.0, 32);
        brush.set_center(Point::new(0.0, 0.0), 1.0);
        brush.overlay_mut().take_redraw();

        brush.set_resolution(4.0);
        let items = brush.overlay_mut().take_redraw().unwrap();
        assert_eq!(
            items.as_slice(),
            &[OverlayItem::Cursor(Circle::new(Point::ZERO, 40.0))]
        );
    }

    #[test]
    fn non_finite_center_is_ignored() {
        let mut brush = BrushSketch::new(10.0, 5.0, 32);
        brush.set_center(Point::new(f64::NAN, 0.0), 1.0);
        assert!(brush.center().is_none());
        assert!(!brush.overlay().is_dirty());
    }

    #[test]
    fn overlay_orders_sketch_below_cursor() {
        let mut brush = BrushSketch::new(10.0, 5.0, 4);
        brush.set_center(Point::new(0.0, 0.0), 1.0);
        let sketch = brush.to_polygon().unwrap();
        brush.overlay_mut().set_sketch(Some(sketch.clone()));

        let items = brush.overlay_mut().take_redraw().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], OverlayItem::Sketch(sketch));
        assert!(matches!(items[1], OverlayItem::Cursor(_)));

        let style = OverlayStyle::default();
        assert_eq!(items[1].layers(&style).len(), 2);
    }

    #[test]
    fn hiding_an_absent_sketch_does_not_redraw() {
        let mut overlay = Overlay::default();
        overlay.set_sketch(None);
        assert!(!overlay.is_dirty());
        overlay.clear();
        assert_eq!(overlay.take_redraw().map(|items| items.len()), Some(0));
    }
}
