// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

/// Mirror of the host map's view state.
///
/// The host owns panning and zooming. `MapView` only records what the host
/// reports: the device-pixel rect, the map point at its center, and the
/// [`resolution`](Self::resolution) (map units per device pixel). From these
/// it converts points between the two spaces.
#[derive(Clone, Debug)]
pub struct MapView {
    view_rect: Rect,
    center: Point,
    resolution: f64,
    revision: u64,
    map_to_view: Affine,
    view_to_map: Affine,
}

impl MapView {
    /// Creates a view of `view_rect` centered on `center` at `resolution`.
    ///
    /// A non-positive or non-finite resolution falls back to `1.0`.
    #[must_use]
    pub fn centered(view_rect: Rect, center: Point, resolution: f64) -> Self {
        let resolution = if resolution > 0.0 && resolution.is_finite() {
            resolution
        } else {
            1.0
        };
        let mut view = Self {
            view_rect,
            center,
            resolution,
            revision: 0,
            map_to_view: Affine::IDENTITY,
            view_to_map: Affine::IDENTITY,
        };
        view.rebuild_transforms();
        view
    }

    /// The view rectangle in device pixels.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device pixels, keeping the center.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// The map point shown at the middle of the view rect.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Records a new center after the host panned.
    pub fn set_center(&mut self, center: Point) {
        if self.center == center {
            return;
        }
        self.center = center;
        self.rebuild_transforms();
    }

    /// Map units per device pixel.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Records a new resolution after the host zoomed.
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn set_resolution(&mut self, resolution: f64) {
        if !(resolution > 0.0 && resolution.is_finite()) || resolution == self.resolution {
            return;
        }
        self.resolution = resolution;
        self.revision = self.revision.wrapping_add(1);
        self.rebuild_transforms();
    }

    /// Counter bumped every time the resolution changes.
    ///
    /// Hosts compare it against a stored value to decide whether the brush
    /// needs rescaling, which keeps pan-only updates from reaching the tool.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Converts a map point into device pixels.
    #[must_use]
    pub fn map_to_view_point(&self, pt: Point) -> Point {
        self.map_to_view * pt
    }

    /// Converts a device-pixel point into map units.
    #[must_use]
    pub fn view_to_map_point(&self, pt: Point) -> Point {
        self.view_to_map * pt
    }

    /// Converts a length in device pixels to map units.
    #[must_use]
    pub fn pixels_to_map(&self, pixels: f64) -> f64 {
        pixels * self.resolution
    }

    /// The map-space rectangle currently visible.
    #[must_use]
    pub fn visible_map_rect(&self) -> Rect {
        let a = self.view_to_map_point(self.view_rect.origin());
        let b = self.view_to_map_point(Point::new(self.view_rect.x1, self.view_rect.y1));
        Rect::from_points(a, b)
    }

    fn rebuild_transforms(&mut self) {
        self.view_to_map = Affine::translate(self.center.to_vec2())
            * Affine::scale(self.resolution)
            * Affine::translate(-self.view_rect.center().to_vec2());
        self.map_to_view = self.view_to_map.inverse();
    }
}
