// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracking for press-drag-release tools.
//!
//! ## Usage
//!
//! 1) Call [`GestureState::start`] on pointer-down with the map position.
//! 2) On each move or drag, call [`GestureState::update`] for the delta since
//!    the previous position.
//! 3) Call [`GestureState::record_pass`] every time the tool applies itself,
//!    so it can tell the first application from later ones.
//! 4) Call [`GestureState::end`] on pointer-up.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use polybrush_event_state::gesture::GestureState;
//!
//! let mut gesture = GestureState::default();
//! gesture.start(Point::new(10.0, 20.0));
//! assert!(gesture.is_active());
//! assert!(gesture.is_first_pass());
//!
//! gesture.record_pass();
//! let delta = gesture.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//! assert!(!gesture.is_first_pass());
//! ```

use kurbo::{Point, Vec2};

/// Position and progress of one press-drag-release gesture.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct GestureState {
    /// Position of the pointer-down that started the gesture.
    pub start_pos: Option<Point>,
    /// Last position seen during the gesture.
    pub last_pos: Option<Point>,
    passes: u32,
}

impl GestureState {
    /// Starts a new gesture at `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.passes = 0;
    }

    /// Records `pos` and returns the movement since the last position.
    ///
    /// Returns `None` outside a gesture.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset of `current_pos` from the gesture start.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Notes that the tool has been applied once more in this gesture.
    pub fn record_pass(&mut self) {
        if self.start_pos.is_some() {
            self.passes = self.passes.saturating_add(1);
        }
    }

    /// Number of recorded passes in this gesture.
    #[must_use]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// `true` while active and before the first recorded pass.
    #[must_use]
    pub fn is_first_pass(&self) -> bool {
        self.is_active() && self.passes == 0
    }

    /// Ends the gesture and resets state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}
