// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Messages into and out of a [`BrushInteraction`](crate::BrushInteraction).
//!
//! Hosts translate their native pointer and wheel events into [`MapEvent`]s
//! (map coordinate, current resolution, input snapshot). Each call returns a
//! [`HandleOutcome`] listing the [`BrushEvent`]s it produced.

use geo::Polygon;
use kurbo::Point;
use polybrush_event_state::input::{InputSnapshot, PointerButton};
use polybrush_event_state::wheel::WheelDelta;
use polybrush_view::MapView;
use smallvec::SmallVec;

use crate::source::FeatureId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapEventKind {
    /// A button was pressed.
    PointerDown,
    /// The pointer moved with no button held.
    PointerMove,
    /// The pointer moved with a button held.
    PointerDrag,
    /// A button was released.
    PointerUp,
    /// The wheel turned.
    Wheel(WheelDelta),
}

/// A normalized pointer or wheel event in map space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapEvent {
    /// Event type.
    pub kind: MapEventKind,
    /// Pointer position in map units.
    pub coordinate: Point,
    /// Map units per device pixel at the time of the event.
    pub resolution: f64,
    /// Buttons, modifiers and device.
    pub input: InputSnapshot,
}

impl MapEvent {
    /// Creates an event from a plain mouse with no button change.
    #[must_use]
    pub fn new(kind: MapEventKind, coordinate: Point, resolution: f64) -> Self {
        Self {
            kind,
            coordinate,
            resolution,
            input: InputSnapshot::mouse(),
        }
    }

    /// Creates an event at a device position of `view`.
    #[must_use]
    pub fn from_view(view: &MapView, kind: MapEventKind, device_pt: Point) -> Self {
        Self::new(kind, view.view_to_map_point(device_pt), view.resolution())
    }

    /// Primary button press.
    #[must_use]
    pub fn pointer_down(coordinate: Point, resolution: f64) -> Self {
        Self::new(MapEventKind::PointerDown, coordinate, resolution)
            .with_input(InputSnapshot::mouse().with_button(PointerButton::Primary))
    }

    /// Hover move.
    #[must_use]
    pub fn pointer_move(coordinate: Point, resolution: f64) -> Self {
        Self::new(MapEventKind::PointerMove, coordinate, resolution)
    }

    /// Move with the primary button held.
    #[must_use]
    pub fn pointer_drag(coordinate: Point, resolution: f64) -> Self {
        Self::new(MapEventKind::PointerDrag, coordinate, resolution)
    }

    /// Primary button release.
    #[must_use]
    pub fn pointer_up(coordinate: Point, resolution: f64) -> Self {
        Self::new(MapEventKind::PointerUp, coordinate, resolution)
            .with_input(InputSnapshot::mouse().with_button(PointerButton::Primary))
    }

    /// Wheel turn.
    #[must_use]
    pub fn wheel(delta: WheelDelta, coordinate: Point, resolution: f64) -> Self {
        Self::new(MapEventKind::Wheel(delta), coordinate, resolution)
    }

    /// Replaces the input snapshot.
    #[must_use]
    pub fn with_input(mut self, input: InputSnapshot) -> Self {
        self.input = input;
        self
    }
}

/// Kind of an active gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Painting a new feature.
    Drawing,
    /// Unioning into existing features.
    Adding,
    /// Cutting from existing features.
    Subtracting,
    /// Painting a stroke that is unioned into features on release.
    StrokeAdding,
    /// Painting a stroke that is cut out of features on release.
    StrokeSubtracting,
}

impl GestureKind {
    /// Whether the gesture paints a private sketch polygon while it runs.
    #[must_use]
    pub fn paints_sketch(self) -> bool {
        matches!(
            self,
            Self::Drawing | Self::StrokeAdding | Self::StrokeSubtracting
        )
    }
}

/// State of a [`BrushInteraction`](crate::BrushInteraction).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// No button held; the brush only follows the pointer.
    #[default]
    Idle,
    /// A gesture is applying the brush on every move.
    Sketching(GestureKind),
}

/// Lifecycle notifications emitted by the brush.
#[derive(Clone, Debug, PartialEq)]
pub enum BrushEvent {
    /// A draw gesture started.
    DrawStart {
        /// Pointer position.
        coordinate: Point,
    },
    /// A draw gesture finished and inserted `feature`.
    DrawEnd {
        /// Pointer position.
        coordinate: Point,
        /// The new feature.
        feature: FeatureId,
    },
    /// An add, subtract or stroke gesture started.
    ModifyStart {
        /// Pointer position.
        coordinate: Point,
    },
    /// An add, subtract or stroke gesture finished.
    ModifyEnd {
        /// Pointer position.
        coordinate: Point,
        /// Features changed or created by the gesture that still exist.
        features: Vec<FeatureId>,
    },
    /// A feature was removed by the brush.
    ModifyRemove {
        /// Pointer position.
        coordinate: Point,
        /// The removed feature.
        feature: FeatureId,
        /// Its geometry just before removal.
        polygon: Polygon<f64>,
    },
}

/// Events produced by one call, usually none or one.
pub type BrushEvents = SmallVec<[BrushEvent; 2]>;

/// Result of offering an event to the brush.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleOutcome {
    /// The brush used the event; the host should not pass it on.
    pub consumed: bool,
    /// State after the event.
    pub state: InteractionState,
    /// Emitted notifications, in order.
    pub events: BrushEvents,
}

impl HandleOutcome {
    pub(crate) fn new(consumed: bool, state: InteractionState, events: BrushEvents) -> Self {
        Self {
            consumed,
            state,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn from_view_uses_map_space() {
        let view = MapView::centered(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Point::new(1000.0, 500.0),
            2.0,
        );
        let event = MapEvent::from_view(&view, MapEventKind::PointerMove, Point::new(100.0, 50.0));
        assert!((event.coordinate - Point::new(1000.0, 500.0)).hypot() < 1e-9);
        assert!((event.resolution - 2.0).abs() < 1e-12);
        assert_eq!(event.input, InputSnapshot::mouse());
    }

    #[test]
    fn button_helpers_mark_primary() {
        let down = MapEvent::pointer_down(Point::ZERO, 1.0);
        assert_eq!(down.input.button, Some(PointerButton::Primary));
        assert_eq!(MapEvent::pointer_drag(Point::ZERO, 1.0).input.button, None);
    }

    #[test]
    fn only_draw_like_gestures_paint_a_sketch() {
        assert!(GestureKind::Drawing.paints_sketch());
        assert!(GestureKind::StrokeAdding.paints_sketch());
        assert!(GestureKind::StrokeSubtracting.paints_sketch());
        assert!(!GestureKind::Adding.paints_sketch());
        assert!(!GestureKind::Subtracting.paints_sketch());
    }
}
