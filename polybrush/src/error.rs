// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised when a brush is built.
//!
//! Geometry problems met while editing are not errors at this level: the
//! affected feature is skipped and the gesture goes on.

use thiserror::Error;

/// Invalid [`BrushOptions`](crate::BrushOptions), reported by
/// [`BrushInteraction::new`](crate::BrushInteraction::new).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// Neither the whole source nor an explicit collection was named as the
    /// set of features to work on.
    #[error("no feature set configured; use `FeatureSet::Source` or a `FeatureCollection`")]
    MissingFeatures,
    /// The brush radius is not a positive finite number of pixels.
    #[error("brush radius must be positive and finite, got {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// The minimum brush radius is not a positive finite number of pixels.
    #[error("minimum brush radius must be positive and finite, got {min_radius}")]
    InvalidMinRadius {
        /// The rejected minimum.
        min_radius: f64,
    },
    /// More decimals than the normalizer supports.
    #[error("precision of {decimals} decimals exceeds the supported maximum")]
    InvalidPrecision {
        /// The rejected number of decimals.
        decimals: u32,
    },
    /// A brush polygon needs at least three sides.
    #[error("brush polygon needs at least 3 sides, got {sides}")]
    TooFewSides {
        /// The rejected side count.
        sides: u32,
    },
    /// A resize policy parameter is out of range.
    #[error("invalid resize policy: {reason}")]
    InvalidResizePolicy {
        /// Which parameter was rejected.
        reason: &'static str,
    },
}
