// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=polybrush_geometry --heading-base-level=0

//! Polybrush Geometry: precision-safe polygon booleans for brush editing.
//!
//! This crate sits between the brush interactions and the polygon boolean
//! engine (`geo`). It does not implement clipping itself; it decides how
//! operands are prepared and how results are reduced so that a brush stroke
//! always leaves behind **one** simple polygon per feature.
//!
//! - [`Precision`] rounds ring coordinates to a fixed decimal grid (3 places
//!   by default) so near-equal vertices do not produce sliver components.
//! - [`BooleanAdapter::prepare`] rounds, validates and bounds an operand
//!   once, giving a [`PreparedPolygon`] that any number of operations can
//!   reuse.
//! - [`BooleanAdapter`] runs union, difference and [`Relation`]
//!   classification on prepared operands.
//! - [`ring`] holds closure, shoelace area and simple-polygon validation.
//!
//! ## Minimal example
//!
//! ```rust
//! use polybrush_geometry::{BooleanAdapter, Relation, ring::{polygon_area, polygon_from_coords}};
//!
//! let ops = BooleanAdapter::default();
//! let a = ops.prepare(&polygon_from_coords(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]))?;
//! let b = ops.prepare(&polygon_from_coords(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]))?;
//!
//! assert_eq!(ops.relate(&a, &b), Relation::Overlapping);
//!
//! let merged = ops.union(&a, &b)?;
//! assert!((polygon_area(&merged) - 7.0).abs() < 1e-6);
//!
//! let rest = ops.difference(&a, &b).expect("a is not fully covered");
//! assert!((polygon_area(&rest) - 3.0).abs() < 1e-6);
//! # Ok::<(), polybrush_geometry::GeometryError>(())
//! ```
//!
//! ## Lossy results
//!
//! A union of disjoint operands, or a difference that cuts a polygon in two,
//! is a multi-polygon. The single-polygon helpers keep one component (the
//! first for unions, the largest for differences) and log the collapse at
//! `debug` level. Use [`BooleanAdapter::difference_pieces`] when every piece
//! matters.
//!
//! ## Errors
//!
//! Operands that are not simple polygons fail to prepare with a
//! [`GeometryError`]. These are meant to be handled per feature: skip the
//! feature, keep going.

mod boolean;
mod error;
mod precision;
pub mod ring;

pub use boolean::{BooleanAdapter, PreparedPolygon, Relation};
pub use error::GeometryError;
pub use precision::{DEFAULT_DECIMALS, MAX_DECIMALS, Precision};

pub use geo::{Coord, LineString, Polygon};
