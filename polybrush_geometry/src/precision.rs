// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed decimal precision applied to boolean operands.
//!
//! Boolean operations are sensitive to vertices that are almost, but not
//! exactly, equal: a brush edge that should coincide with a feature edge can
//! leave a sliver that turns a union into a multi-polygon. Rounding both
//! operands to the same grid right before the operation removes those
//! near-duplicates.

use geo::{Coord, LineString, Polygon};

/// Largest number of decimal places accepted by [`Precision::new`].
///
/// Beyond this the scale factor starts eating into the mantissa of typical
/// projected map coordinates.
pub const MAX_DECIMALS: u32 = 12;

/// Decimal places used when none are configured.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Rounds coordinates to a fixed number of decimal places.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precision {
    decimals: u32,
    scale: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self::from_decimals(DEFAULT_DECIMALS)
    }
}

impl Precision {
    /// Creates a precision of `decimals` places, or `None` above [`MAX_DECIMALS`].
    #[must_use]
    pub fn new(decimals: u32) -> Option<Self> {
        (decimals <= MAX_DECIMALS).then(|| Self::from_decimals(decimals))
    }

    fn from_decimals(decimals: u32) -> Self {
        let exp = i32::try_from(decimals).unwrap_or(i32::MAX);
        Self {
            decimals,
            scale: 10_f64.powi(exp),
        }
    }

    /// Number of decimal places kept.
    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Distance between neighboring grid values.
    #[must_use]
    pub fn step(&self) -> f64 {
        1.0 / self.scale
    }

    /// Rounds a single value.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let rounded = (value * self.scale).round() / self.scale;
        // Keep -0.0 out of results so that equality checks stay symmetric.
        if rounded == 0.0 { 0.0 } else { rounded }
    }

    /// Rounds a single coordinate.
    #[must_use]
    pub fn round_coord(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.round(coord.x),
            y: self.round(coord.y),
        }
    }

    /// Returns a copy of `polygon` with every ring coordinate rounded.
    ///
    /// The input is never modified.
    #[must_use]
    pub fn normalize(&self, polygon: &Polygon<f64>) -> Polygon<f64> {
        let exterior = self.normalize_ring(polygon.exterior());
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| self.normalize_ring(ring))
            .collect();
        Polygon::new(exterior, interiors)
    }

    fn normalize_ring(&self, ring: &LineString<f64>) -> LineString<f64> {
        ring.0.iter().map(|&c| self.round_coord(c)).collect()
    }
}
