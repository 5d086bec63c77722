// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=polybrush --heading-base-level=0

//! Polybrush: paint polygon features on a map with a circular brush.
//!
//! A [`BrushInteraction`] turns pointer and wheel events into polygon edits:
//!
//! - **Draw** accumulates a dragged stroke into one new feature.
//! - **Add** unions the brush into the feature it touches first, folding in
//!   any other feature the stroke reaches.
//! - **Subtract** cuts the brush out of features, splitting or deleting them.
//! - **Stroke add** and **stroke subtract** paint a stroke like draw, then
//!   merge it into, or cut it out of, the features it crosses on release.
//!
//! The crate owns no map and no renderer. The host:
//!
//! - converts its events into [`MapEvent`]s (map coordinate, resolution,
//!   input snapshot);
//! - passes its feature store as a [`FeatureSource`](source::FeatureSource)
//!   to each call;
//! - draws [`Overlay`](sketch::Overlay) items when
//!   [`take_redraw`](sketch::Overlay::take_redraw) reports a change;
//! - listens to the [`BrushEvent`]s in each [`HandleOutcome`].
//!
//! Polygon booleans go through [`polybrush_geometry::BooleanAdapter`], which
//! normalizes operands to a fixed decimal grid and keeps every result a
//! single polygon.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use polybrush::source::{FeatureSet, FeatureSource, VectorSource};
//! use polybrush::{BrushEvent, BrushInteraction, BrushOptions, InteractionMode, MapEvent};
//! use polybrush_geometry::ring::{polygon_area, polygon_from_coords};
//!
//! let mut source = VectorSource::new();
//! let field = source.add_polygon(polygon_from_coords(&[
//!     (0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0),
//! ]));
//!
//! let mut brush = BrushInteraction::new(
//!     BrushOptions::new(InteractionMode::Subtract, FeatureSet::Source).with_brush_radius(20.0),
//! )?;
//!
//! // One pixel is one map unit here. Bite into the right edge.
//! let at = Point::new(100.0, 50.0);
//! brush.handle_event(&mut source, &MapEvent::pointer_down(at, 1.0));
//! let done = brush.handle_event(&mut source, &MapEvent::pointer_up(at, 1.0));
//!
//! assert!(matches!(&done.events[..], [BrushEvent::ModifyEnd { features, .. }] if features == &[field]));
//! assert!(polygon_area(&source.polygon(field).unwrap()) < 10_000.0);
//! # Ok::<(), polybrush::ConfigurationError>(())
//! ```
//!
//! ## Logging
//!
//! Decisions are logged with `tracing`: each event at `trace`, skipped
//! candidates, removals and gesture boundaries at `debug`. Install a
//! subscriber in the host to see them.

mod error;
mod event;
mod interaction;
mod options;
pub mod resize;
pub mod sketch;
pub mod source;

pub use error::ConfigurationError;
pub use event::{
    BrushEvent, BrushEvents, GestureKind, HandleOutcome, InteractionState, MapEvent, MapEventKind,
};
pub use interaction::BrushInteraction;
pub use options::{BrushOptions, InteractionMode};
