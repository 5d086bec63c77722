// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral description of the input state attached to an event.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CTRL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Windows key.
        const META = 1 << 3;
    }
}

/// Pointer button that changed state in a down/up event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch contact.
    Primary,
    /// Middle mouse button.
    Auxiliary,
    /// Right mouse button or pen barrel button.
    Secondary,
    /// "Back" side button.
    Back,
    /// "Forward" side button.
    Forward,
}

/// Kind of device that produced a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A stylus.
    Pen,
    /// A finger on a touch surface.
    Touch,
}

/// Input state sampled alongside an event.
///
/// Conditions are evaluated against this snapshot, so it carries exactly
/// what they need and nothing that ties it to a windowing backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Button that changed state, for down/up events.
    pub button: Option<PointerButton>,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Device kind.
    pub pointer_type: PointerType,
}

impl InputSnapshot {
    /// A mouse event with no button change and no modifiers.
    #[must_use]
    pub const fn mouse() -> Self {
        Self {
            button: None,
            modifiers: Modifiers::empty(),
            pointer_type: PointerType::Mouse,
        }
    }

    /// Returns a copy with `button` set.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Returns a copy with `modifiers` set.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns a copy with `pointer_type` set.
    #[must_use]
    pub const fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }
}
