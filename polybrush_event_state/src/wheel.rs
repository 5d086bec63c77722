// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel delta normalization.
//!
//! Platforms disagree on which axis and sign a scroll lands on. Standard
//! wheel events report `delta_y` (positive when scrolling toward the user),
//! but some systems move a Shift+scroll onto `delta_x`. Legacy mouse-wheel
//! events report `wheel_delta_*` with the opposite sign. [`WheelDelta`]
//! folds all of that into one signed value.

/// Where a wheel delta came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelSource {
    /// A standard `wheel` event (`delta_x` / `delta_y`).
    Wheel,
    /// A legacy `mousewheel` event (`wheel_delta_x` / `wheel_delta_y`).
    LegacyMouseWheel,
}

/// Normalized direction of a wheel step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    /// Scrolling toward the user ("down"); grows brushes.
    Down,
    /// Scrolling away from the user ("up"); shrinks brushes.
    Up,
    /// No movement on either axis.
    None,
}

/// Raw wheel deltas plus the kind of event they came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelDelta {
    /// Event kind, which decides the sign convention.
    pub source: WheelSource,
    /// Horizontal delta as reported by the platform.
    pub x: f64,
    /// Vertical delta as reported by the platform.
    pub y: f64,
}

impl WheelDelta {
    /// A standard wheel event.
    #[must_use]
    pub const fn wheel(x: f64, y: f64) -> Self {
        Self {
            source: WheelSource::Wheel,
            x,
            y,
        }
    }

    /// A legacy mouse-wheel event.
    #[must_use]
    pub const fn legacy(wheel_delta_x: f64, wheel_delta_y: f64) -> Self {
        Self {
            source: WheelSource::LegacyMouseWheel,
            x: wheel_delta_x,
            y: wheel_delta_y,
        }
    }

    /// Signed delta, positive toward the user.
    ///
    /// The vertical axis wins; the horizontal axis is used only when the
    /// vertical one is zero.
    #[must_use]
    pub fn delta(&self) -> f64 {
        let (x, y) = match self.source {
            WheelSource::Wheel => (self.x, self.y),
            WheelSource::LegacyMouseWheel => (-self.x, -self.y),
        };
        if y == 0.0 { x } else { y }
    }

    /// Direction of [`delta`](Self::delta).
    #[must_use]
    pub fn direction(&self) -> WheelDirection {
        let d = self.delta();
        if d > 0.0 {
            WheelDirection::Down
        } else if d < 0.0 {
            WheelDirection::Up
        } else {
            WheelDirection::None
        }
    }
}
