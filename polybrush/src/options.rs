// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for the brush.
//!
//! [`BrushOptions::default`] carries the usual editing setup: a 100 pixel
//! brush that never shrinks below 5 pixels, Shift + wheel to resize, and
//! subtract allowed to delete and split features. Only the feature set has
//! no default; [`BrushOptions::validate`] reports it as missing.

use polybrush_event_state::condition::Condition;
use polybrush_event_state::input::InputSnapshot;
use polybrush_geometry::{DEFAULT_DECIMALS, MAX_DECIMALS};

use crate::resize::ResizePolicy;
use crate::sketch::OverlayStyle;
use crate::source::FeatureSet;
use crate::{ConfigurationError, GestureKind};

/// Which boolean operation a brush gesture performs.
#[derive(Clone, Debug, Default)]
pub enum InteractionMode {
    /// Paint a new feature; existing features are left alone.
    #[default]
    Draw,
    /// Union the brush into the features it touches.
    Add,
    /// Cut the brush out of the features it touches.
    Subtract,
    /// Paint a stroke like [`Draw`](Self::Draw); on release, union it with
    /// every feature it shares area with and replace them by the result.
    StrokeAdd,
    /// Paint a stroke like [`Draw`](Self::Draw); on release, cut it out of
    /// every feature it shares area with, unless the feature surrounds it.
    StrokeSubtract,
    /// Pick add or subtract on each pointer-down. `subtract` is checked
    /// first; if neither holds, no gesture starts.
    Conditional {
        /// Starts an add gesture.
        add: Condition,
        /// Starts a subtract gesture.
        subtract: Condition,
    },
}

impl InteractionMode {
    /// The conditional mode with the usual bindings: Alt subtracts, a plain
    /// primary press adds.
    #[must_use]
    pub fn add_or_subtract() -> Self {
        Self::Conditional {
            add: Condition::PrimaryAction.and(Condition::NoModifierKeys),
            subtract: Condition::PrimaryAction.and(Condition::AltKeyOnly),
        }
    }

    pub(crate) fn gesture_for(&self, input: &InputSnapshot) -> Option<GestureKind> {
        match self {
            Self::Draw => Some(GestureKind::Drawing),
            Self::Add => Some(GestureKind::Adding),
            Self::Subtract => Some(GestureKind::Subtracting),
            Self::StrokeAdd => Some(GestureKind::StrokeAdding),
            Self::StrokeSubtract => Some(GestureKind::StrokeSubtracting),
            Self::Conditional { add, subtract } => {
                if subtract.evaluate(input) {
                    Some(GestureKind::Subtracting)
                } else if add.evaluate(input) {
                    Some(GestureKind::Adding)
                } else {
                    None
                }
            }
        }
    }
}

/// Construction options for [`BrushInteraction`](crate::BrushInteraction).
///
/// Radii are in device pixels.
#[derive(Clone, Debug)]
pub struct BrushOptions {
    /// Operation performed by gestures.
    pub mode: InteractionMode,
    /// Features to edit. Required.
    pub features: Option<FeatureSet>,
    /// Initial brush radius.
    pub brush_radius: f64,
    /// Smallest brush radius.
    pub min_radius: f64,
    /// Must hold on pointer-down for a gesture to start.
    pub condition: Condition,
    /// Must hold on a wheel event for it to resize the brush.
    pub resize_condition: Condition,
    /// How wheel steps change the radius.
    pub resize_policy: ResizePolicy,
    /// Subtract may delete features it fully covers.
    pub allow_remove: bool,
    /// An add gesture that touches nothing on its first pass creates a
    /// feature from the brush.
    pub create_when_empty: bool,
    /// Subtract keeps every piece of a split feature as its own feature,
    /// instead of only the largest.
    pub split_pieces: bool,
    /// Decimal places operands are rounded to.
    pub precision: u32,
    /// Vertex count of the brush polygon.
    pub sides: u32,
    /// Overlay style.
    pub style: OverlayStyle,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            mode: InteractionMode::default(),
            features: None,
            brush_radius: 100.0,
            min_radius: 5.0,
            condition: Condition::Always,
            resize_condition: Condition::ShiftKeyOnly,
            resize_policy: ResizePolicy::default(),
            allow_remove: true,
            create_when_empty: true,
            split_pieces: true,
            precision: DEFAULT_DECIMALS,
            sides: 32,
            style: OverlayStyle::default(),
        }
    }
}

impl BrushOptions {
    /// Default options editing `features` in `mode`.
    #[must_use]
    pub fn new(mode: InteractionMode, features: FeatureSet) -> Self {
        Self {
            mode,
            features: Some(features),
            ..Self::default()
        }
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the features to edit.
    #[must_use]
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = Some(features);
        self
    }

    /// Sets the initial brush radius.
    #[must_use]
    pub fn with_brush_radius(mut self, radius: f64) -> Self {
        self.brush_radius = radius;
        self
    }

    /// Sets the minimum brush radius.
    #[must_use]
    pub fn with_min_radius(mut self, radius: f64) -> Self {
        self.min_radius = radius;
        self
    }

    /// Sets the gesture start condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Sets the resize condition.
    #[must_use]
    pub fn with_resize_condition(mut self, condition: Condition) -> Self {
        self.resize_condition = condition;
        self
    }

    /// Sets the resize policy.
    #[must_use]
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// Allows or forbids subtract from deleting features.
    #[must_use]
    pub fn with_allow_remove(mut self, allow: bool) -> Self {
        self.allow_remove = allow;
        self
    }

    /// Enables or disables feature creation by add gestures.
    #[must_use]
    pub fn with_create_when_empty(mut self, create: bool) -> Self {
        self.create_when_empty = create;
        self
    }

    /// Enables or disables keeping every piece of a subtract split.
    #[must_use]
    pub fn with_split_pieces(mut self, split: bool) -> Self {
        self.split_pieces = split;
        self
    }

    /// Sets the decimal precision.
    #[must_use]
    pub fn with_precision(mut self, decimals: u32) -> Self {
        self.precision = decimals;
        self
    }

    /// Sets the brush polygon vertex count.
    #[must_use]
    pub fn with_sides(mut self, sides: u32) -> Self {
        self.sides = sides;
        self
    }

    /// Sets the overlay style.
    #[must_use]
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Checks every option without building anything.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.features.is_none() {
            return Err(ConfigurationError::MissingFeatures);
        }
        if !(self.brush_radius.is_finite() && self.brush_radius > 0.0) {
            return Err(ConfigurationError::InvalidRadius {
                radius: self.brush_radius,
            });
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(ConfigurationError::InvalidMinRadius {
                min_radius: self.min_radius,
            });
        }
        if self.precision > MAX_DECIMALS {
            return Err(ConfigurationError::InvalidPrecision {
                decimals: self.precision,
            });
        }
        if self.sides < 3 {
            return Err(ConfigurationError::TooFewSides { sides: self.sides });
        }
        self.resize_policy.validate()
    }
}
