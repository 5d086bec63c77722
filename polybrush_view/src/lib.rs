// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=polybrush_view --heading-base-level=0

//! Polybrush View: a headless map view model.
//!
//! The brush tools size their cursor in **device pixels** but edit geometry
//! in **map units**. [`MapView`] is the bridge: it mirrors the host map's
//! device rect, center and [`resolution`](MapView::resolution) (map units
//! per pixel). Panning and zooming stay with the host.
//!
//! It does **not** render anything or interpret input. Callers are expected
//! to:
//! - Convert pointer positions with [`MapView::view_to_map_point`] before
//!   handing events to a brush interaction.
//! - Forward resolution changes to the brush when
//!   [`MapView::revision`] moves, so the brush keeps its on-screen size.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use polybrush_view::MapView;
//!
//! // 800x600 window centered on a projected coordinate, 2 map units per pixel.
//! let mut view = MapView::centered(
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//!     Point::new(10_000.0, 5_000.0),
//!     2.0,
//! );
//!
//! // The window center maps back to the view center.
//! let center = view.view_to_map_point(Point::new(400.0, 300.0));
//! assert!((center.x - 10_000.0).abs() < 1e-9);
//!
//! // A 100 px brush covers 200 map units at this resolution.
//! assert_eq!(view.pixels_to_map(100.0), 200.0);
//!
//! // The host zoomed in: record the new resolution, which bumps the revision.
//! let seen = view.revision();
//! view.set_resolution(1.0);
//! assert!(view.revision() > seen);
//! assert_eq!(view.pixels_to_map(100.0), 100.0);
//! ```
//!
//! ## Design notes
//!
//! - Resolution is uniform and axis-aligned; rotation is not modeled.
//! - The map plane is not flipped: hosts with a y-up projection negate y
//!   before calling into the view.
//!
//! This crate is `no_std`.

#![no_std]

mod view;

pub use view::MapView;
