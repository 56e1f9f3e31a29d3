//! Pointer input as the grid consumes it.
//!
//! The embedding shell is responsible for translating its native input
//! layer into these events; positions are in the grid's own coordinate
//! space, with the origin at the top-left of row zero.

use crate::geometry::Point;

/// Modifier keys held during a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub command: bool,
}

impl KeyboardModifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        command: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::NONE
        }
    }

    pub fn command() -> Self {
        Self {
            command: true,
            ..Self::NONE
        }
    }
}

/// A pointer event routed to the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer entered the grid's bounds.
    Entered,
    /// The pointer left the grid's bounds.
    Exited,
    /// The pointer moved while hovering (no button held).
    Hover { position: Point },
    /// The content scrolled under a stationary pointer; the grid schedules
    /// the hover highlight to clear on the next layout pass.
    Scroll { position: Point },
    /// A primary-button press.
    Down {
        position: Point,
        modifiers: KeyboardModifiers,
    },
    /// A primary-button release.
    Up { position: Point },
}
