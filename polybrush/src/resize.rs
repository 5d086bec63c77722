// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel-driven brush resizing.
//!
//! The controller works on the brush radius in device pixels. The map
//! radius is always that value times the current view resolution, so the
//! brush keeps a stable on-screen size while the map zooms underneath it.
//!
//! ## Minimal example
//!
//! ```
//! use polybrush::resize::{ResizeController, ResizeOutcome, ResizePolicy};
//!
//! let mut resize = ResizeController::new(ResizePolicy::default(), 5.0);
//!
//! // Without the gate, the wheel belongs to the map.
//! assert_eq!(resize.on_scroll(100.0, 1.0, false), ResizeOutcome::PassThrough);
//!
//! // Scrolling toward the user grows the brush.
//! assert_eq!(
//!     resize.on_scroll(100.0, 1.0, true),
//!     ResizeOutcome::Resized { pixel_radius: 105.0 }
//! );
//! ```

use polybrush_event_state::wheel::WheelDirection;

use crate::ConfigurationError;

/// How one wheel step changes the radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizePolicy {
    /// Add or subtract a fixed number of pixels per step.
    FixedStep {
        /// Step above `fine_threshold`.
        step: f64,
        /// Step at or below `fine_threshold`.
        fine_step: f64,
        /// Radius (pixels) at or below which `fine_step` applies.
        fine_threshold: f64,
    },
    /// Multiply or divide by a factor that compounds while the wheel keeps
    /// turning the same way and resets when it reverses.
    Relative {
        /// Factor after a reversal or for the first step.
        base_factor: f64,
        /// Multiplier applied to the factor on each repeated step.
        growth: f64,
        /// Upper bound of the factor.
        max_factor: f64,
    },
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::FixedStep {
            step: 5.0,
            fine_step: 1.0,
            fine_threshold: 25.0,
        }
    }
}

impl ResizePolicy {
    /// A [`Relative`](Self::Relative) policy with gentle defaults.
    #[must_use]
    pub fn relative() -> Self {
        Self::Relative {
            base_factor: 1.05,
            growth: 1.05,
            max_factor: 1.5,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        match *self {
            Self::FixedStep {
                step,
                fine_step,
                fine_threshold,
            } => {
                if !ok(step) || !ok(fine_step) {
                    return Err(ConfigurationError::InvalidResizePolicy {
                        reason: "steps must be positive and finite",
                    });
                }
                if !(fine_threshold.is_finite() && fine_threshold >= 0.0) {
                    return Err(ConfigurationError::InvalidResizePolicy {
                        reason: "fine threshold must be finite and non-negative",
                    });
                }
            }
            Self::Relative {
                base_factor,
                growth,
                max_factor,
            } => {
                if !ok(base_factor) || base_factor <= 1.0 {
                    return Err(ConfigurationError::InvalidResizePolicy {
                        reason: "base factor must be greater than 1",
                    });
                }
                if !ok(growth) || growth < 1.0 {
                    return Err(ConfigurationError::InvalidResizePolicy {
                        reason: "growth must be at least 1",
                    });
                }
                if !ok(max_factor) || max_factor < base_factor {
                    return Err(ConfigurationError::InvalidResizePolicy {
                        reason: "max factor must be at least the base factor",
                    });
                }
            }
        }
        Ok(())
    }
}

/// Result of a wheel event offered to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// The gate was not satisfied; the event should reach other handlers.
    PassThrough,
    /// The event was consumed; this is the new radius in pixels (possibly
    /// unchanged at the minimum or for a zero delta).
    Resized {
        /// New brush radius in device pixels.
        pixel_radius: f64,
    },
}

/// Turns wheel deltas into brush radii.
#[derive(Clone, Debug)]
pub struct ResizeController {
    policy: ResizePolicy,
    min_radius: f64,
    factor: f64,
    last_direction: WheelDirection,
}

impl ResizeController {
    /// Creates a controller that never goes below `min_radius` pixels.
    #[must_use]
    pub fn new(policy: ResizePolicy, min_radius: f64) -> Self {
        let factor = match policy {
            ResizePolicy::Relative { base_factor, .. } => base_factor,
            ResizePolicy::FixedStep { .. } => 1.0,
        };
        Self {
            policy,
            min_radius,
            factor,
            last_direction: WheelDirection::None,
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Applies one wheel step to `current` (pixels).
    ///
    /// Positive `delta` grows the brush, negative shrinks it. When
    /// `gate_satisfied` is false nothing changes and the event passes
    /// through.
    pub fn on_scroll(&mut self, current: f64, delta: f64, gate_satisfied: bool) -> ResizeOutcome {
        if !gate_satisfied {
            return ResizeOutcome::PassThrough;
        }
        let direction = if delta > 0.0 {
            WheelDirection::Down
        } else if delta < 0.0 {
            WheelDirection::Up
        } else {
            WheelDirection::None
        };
        let next = match direction {
            WheelDirection::None => current,
            WheelDirection::Down | WheelDirection::Up => self.step(current, direction),
        };
        ResizeOutcome::Resized {
            pixel_radius: next.max(self.min_radius),
        }
    }

    fn step(&mut self, current: f64, direction: WheelDirection) -> f64 {
        let grow = direction == WheelDirection::Down;
        match self.policy {
            ResizePolicy::FixedStep {
                step,
                fine_step,
                fine_threshold,
            } => {
                // Below the threshold, and when a shrink would cross it.
                let amount = if current <= fine_threshold
                    || (!grow && current - step < fine_threshold)
                {
                    fine_step
                } else {
                    step
                };
                if grow { current + amount } else { current - amount }
            }
            ResizePolicy::Relative {
                base_factor,
                growth,
                max_factor,
            } => {
                self.factor = if direction == self.last_direction {
                    (self.factor * growth).min(max_factor)
                } else {
                    base_factor
                };
                self.last_direction = direction;
                if grow {
                    current * self.factor
                } else {
                    current / self.factor
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(outcome: ResizeOutcome) -> f64 {
        match outcome {
            ResizeOutcome::Resized { pixel_radius } => pixel_radius,
            ResizeOutcome::PassThrough => panic!("expected a resize"),
        }
    }

    #[test]
    fn gate_controls_consumption() {
        let mut resize = ResizeController::new(ResizePolicy::default(), 5.0);
        assert_eq!(resize.on_scroll(50.0, -3.0, false), ResizeOutcome::PassThrough);
        assert_eq!(radius(resize.on_scroll(50.0, 0.0, true)), 50.0);
    }

    #[test]
    fn fixed_step_uses_fine_steps_near_minimum() {
        let mut resize = ResizeController::new(ResizePolicy::default(), 5.0);
        assert_eq!(radius(resize.on_scroll(100.0, 1.0, true)), 105.0);
        assert_eq!(radius(resize.on_scroll(100.0, -1.0, true)), 95.0);
        assert_eq!(radius(resize.on_scroll(25.0, 1.0, true)), 26.0);
        assert_eq!(radius(resize.on_scroll(27.0, -1.0, true)), 26.0);
        assert_eq!(radius(resize.on_scroll(10.0, -1.0, true)), 9.0);
    }

    #[test]
    fn repeated_shrinking_stops_at_minimum() {
        for policy in [ResizePolicy::default(), ResizePolicy::relative()] {
            let mut resize = ResizeController::new(policy, 5.0);
            let mut r = 100.0;
            for _ in 0..500 {
                r = radius(resize.on_scroll(r, -120.0, true));
                assert!(r >= 5.0, "{policy:?} went below the minimum: {r}");
            }
            assert_eq!(r, 5.0);
        }
    }

    #[test]
    fn relative_factor_compounds_and_resets() {
        let policy = ResizePolicy::Relative {
            base_factor: 1.5,
            growth: 2.0,
            max_factor: 4.0,
        };
        let mut resize = ResizeController::new(policy, 1.0);

        assert_eq!(radius(resize.on_scroll(10.0, 1.0, true)), 15.0);
        // 1.5 * 2 = 3
        assert_eq!(radius(resize.on_scroll(10.0, 1.0, true)), 30.0);
        // capped at 4
        assert_eq!(radius(resize.on_scroll(10.0, 1.0, true)), 40.0);
        assert_eq!(radius(resize.on_scroll(10.0, 1.0, true)), 40.0);
        // reversal resets to the base factor
        assert_eq!(radius(resize.on_scroll(30.0, -1.0, true)), 20.0);
    }

    #[test]
    fn policy_validation() {
        assert!(ResizePolicy::default().validate().is_ok());
        assert!(ResizePolicy::relative().validate().is_ok());
        let bad = ResizePolicy::FixedStep {
            step: 0.0,
            fine_step: 1.0,
            fine_threshold: 25.0,
        };
        assert!(bad.validate().is_err());
        let bad = ResizePolicy::Relative {
            base_factor: 1.0,
            growth: 1.1,
            max_factor: 2.0,
        };
        assert!(bad.validate().is_err());
    }
}
