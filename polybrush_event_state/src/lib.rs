// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=polybrush_event_state --heading-base-level=0

//! Polybrush Event State: input plumbing shared by the brush tools.
//!
//! This crate provides the small, stateful or pure pieces a pointer tool
//! needs before it can make a decision about an event:
//!
//! - [`input`]: platform-neutral [`InputSnapshot`](input::InputSnapshot)
//!   (button, modifier flags, pointer type)
//! - [`condition`]: composable [`Condition`](condition::Condition) predicates
//!   such as "primary action", "shift only", "pen or shift"
//! - [`gesture`]: press-drag-release tracking with pass counting
//! - [`wheel`]: wheel delta normalization across event flavors
//!
//! The crate does not assume a windowing backend. Hosts translate their
//! native events into [`InputSnapshot`](input::InputSnapshot) and
//! [`WheelDelta`](wheel::WheelDelta) values and pass those along.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use polybrush_event_state::condition::Condition;
//! use polybrush_event_state::gesture::GestureState;
//! use polybrush_event_state::input::{InputSnapshot, PointerButton};
//! use polybrush_event_state::wheel::{WheelDelta, WheelDirection};
//!
//! let start = Condition::PrimaryAction;
//! let mut gesture = GestureState::default();
//!
//! let down = InputSnapshot::mouse().with_button(PointerButton::Primary);
//! if start.evaluate(&down) {
//!     gesture.start(Point::new(3.0, 4.0));
//! }
//! assert!(gesture.is_active());
//!
//! assert_eq!(WheelDelta::wheel(0.0, 53.0).direction(), WheelDirection::Down);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod condition;
pub mod gesture;
pub mod input;
pub mod wheel;
