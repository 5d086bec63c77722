// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composable predicates over [`InputSnapshot`]s.
//!
//! Tools use conditions to decide whether an event starts a gesture, which
//! sub-mode it starts, and whether a wheel event resizes the brush or is
//! left to the map for zooming.
//!
//! ## Minimal example
//!
//! ```
//! use polybrush_event_state::condition::Condition;
//! use polybrush_event_state::input::{InputSnapshot, Modifiers, PointerButton};
//!
//! let resize = Condition::ShiftKeyOnly;
//! let paint = Condition::PrimaryAction.and(Condition::NoModifierKeys);
//!
//! let click = InputSnapshot::mouse().with_button(PointerButton::Primary);
//! assert!(paint.evaluate(&click));
//! assert!(!resize.evaluate(&click));
//!
//! let shift_scroll = InputSnapshot::mouse().with_modifiers(Modifiers::SHIFT);
//! assert!(resize.evaluate(&shift_scroll));
//! ```

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::input::{InputSnapshot, Modifiers, PointerButton, PointerType};

/// A boolean function of an event's input state.
#[derive(Clone, Debug, Default)]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// Always false.
    Never,
    /// The primary button changed state.
    PrimaryAction,
    /// Shift is held and no other modifier is.
    ShiftKeyOnly,
    /// Alt is held and no other modifier is.
    AltKeyOnly,
    /// Alt and Shift are held and no other modifier is.
    AltShiftKeysOnly,
    /// No modifier is held.
    NoModifierKeys,
    /// The event comes from a mouse.
    MouseOnly,
    /// The event comes from a pen, or only Shift is held.
    PenOrShift,
    /// Negation of the inner condition.
    Not(Box<Condition>),
    /// True when every inner condition is true (and for an empty list).
    All(Vec<Condition>),
    /// True when at least one inner condition is true.
    Any(Vec<Condition>),
    /// A caller-supplied predicate.
    Custom(fn(&InputSnapshot) -> bool),
}

impl Condition {
    /// Evaluates the condition for `input`.
    #[must_use]
    pub fn evaluate(&self, input: &InputSnapshot) -> bool {
        let mods = input.modifiers;
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::PrimaryAction => input.button == Some(PointerButton::Primary),
            Self::ShiftKeyOnly => mods == Modifiers::SHIFT,
            Self::AltKeyOnly => mods == Modifiers::ALT,
            Self::AltShiftKeysOnly => mods == Modifiers::ALT | Modifiers::SHIFT,
            Self::NoModifierKeys => mods.is_empty(),
            Self::MouseOnly => input.pointer_type == PointerType::Mouse,
            Self::PenOrShift => {
                input.pointer_type == PointerType::Pen || mods == Modifiers::SHIFT
            }
            Self::Not(inner) => !inner.evaluate(input),
            Self::All(all) => all.iter().all(|c| c.evaluate(input)),
            Self::Any(any) => any.iter().any(|c| c.evaluate(input)),
            Self::Custom(f) => f(input),
        }
    }

    /// Both `self` and `other` must hold.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut all) => {
                all.push(other);
                Self::All(all)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Either `self` or `other` must hold.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut any) => {
                any.push(other);
                Self::Any(any)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// Negates `self`.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_mods(mods: Modifiers) -> InputSnapshot {
        InputSnapshot::mouse().with_modifiers(mods)
    }

    #[test]
    fn constant_conditions() {
        let input = InputSnapshot::default();
        assert!(Condition::Always.evaluate(&input));
        assert!(!Condition::Never.evaluate(&input));
    }

    #[test]
    fn modifier_only_conditions_reject_extra_keys() {
        assert!(Condition::ShiftKeyOnly.evaluate(&with_mods(Modifiers::SHIFT)));
        assert!(!Condition::ShiftKeyOnly.evaluate(&with_mods(Modifiers::SHIFT | Modifiers::CTRL)));
        assert!(!Condition::ShiftKeyOnly.evaluate(&with_mods(Modifiers::empty())));

        assert!(Condition::AltKeyOnly.evaluate(&with_mods(Modifiers::ALT)));
        assert!(!Condition::AltKeyOnly.evaluate(&with_mods(Modifiers::ALT | Modifiers::SHIFT)));

        assert!(
            Condition::AltShiftKeysOnly.evaluate(&with_mods(Modifiers::ALT | Modifiers::SHIFT))
        );
        assert!(!Condition::AltShiftKeysOnly.evaluate(&with_mods(Modifiers::ALT)));

        assert!(Condition::NoModifierKeys.evaluate(&with_mods(Modifiers::empty())));
        assert!(!Condition::NoModifierKeys.evaluate(&with_mods(Modifiers::META)));
    }

    #[test]
    fn primary_action_needs_primary_button() {
        let primary = InputSnapshot::mouse().with_button(PointerButton::Primary);
        let secondary = InputSnapshot::mouse().with_button(PointerButton::Secondary);
        assert!(Condition::PrimaryAction.evaluate(&primary));
        assert!(!Condition::PrimaryAction.evaluate(&secondary));
        assert!(!Condition::PrimaryAction.evaluate(&InputSnapshot::mouse()));
    }

    #[test]
    fn pen_or_shift() {
        let pen = InputSnapshot::mouse().with_pointer_type(PointerType::Pen);
        assert!(Condition::PenOrShift.evaluate(&pen));
        assert!(Condition::PenOrShift.evaluate(&with_mods(Modifiers::SHIFT)));
        assert!(!Condition::PenOrShift.evaluate(&InputSnapshot::mouse()));
        assert!(!Condition::MouseOnly.evaluate(&pen));
    }

    #[test]
    fn combinators_flatten_and_negate() {
        let c = Condition::PrimaryAction
            .and(Condition::NoModifierKeys)
            .and(Condition::MouseOnly);
        assert!(matches!(&c, Condition::All(all) if all.len() == 3));

        let click = InputSnapshot::mouse().with_button(PointerButton::Primary);
        assert!(c.evaluate(&click));
        assert!(!c.evaluate(&click.with_modifiers(Modifiers::ALT)));

        let either = Condition::AltKeyOnly.or(Condition::ShiftKeyOnly);
        assert!(either.evaluate(&with_mods(Modifiers::SHIFT)));
        assert!(!either.evaluate(&with_mods(Modifiers::CTRL)));

        let not_shift = Condition::ShiftKeyOnly.negate();
        assert!(!not_shift.evaluate(&with_mods(Modifiers::SHIFT)));
        assert!(matches!(not_shift.negate(), Condition::ShiftKeyOnly));
    }

    #[test]
    fn custom_condition() {
        fn ctrl_held(input: &InputSnapshot) -> bool {
            input.modifiers.contains(Modifiers::CTRL)
        }
        let c = Condition::Custom(ctrl_held);
        assert!(c.evaluate(&with_mods(Modifiers::CTRL | Modifiers::SHIFT)));
        assert!(!c.evaluate(&with_mods(Modifiers::SHIFT)));
    }

    #[test]
    fn empty_all_and_any() {
        let input = InputSnapshot::default();
        assert!(Condition::All(Vec::new()).evaluate(&input));
        assert!(!Condition::Any(Vec::new()).evaluate(&input));
    }
}
