//! Core controller types: Buttons, ControllerState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Button state of a NES/SNES Mini controller as a 16-bit flag set.
///
/// The flag values are the controller's own bit positions after the two
/// state bytes are inverted and merged (high byte first), so a decoded
/// word can be wrapped directly. X, Y, L and R only exist on SNES-class
/// controllers and always read as zero on a NES Mini.
///
/// # Example
///
/// ```
/// use gamepad_core::Buttons;
///
/// let buttons = Buttons::A | Buttons::UP;
/// assert!(buttons.contains(Buttons::A));
/// assert!(buttons.contains(Buttons::UP));
/// assert!(!buttons.contains(Buttons::X));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const UP: Self = Self(0x0001);
    pub const LEFT: Self = Self(0x0002);
    pub const X: Self = Self(0x0008); // SNES only
    pub const A: Self = Self(0x0010);
    pub const Y: Self = Self(0x0020); // SNES only
    pub const B: Self = Self(0x0040);
    pub const R: Self = Self(0x0200); // SNES only
    pub const START: Self = Self(0x0400);
    pub const SELECT: Self = Self(0x1000);
    pub const L: Self = Self(0x2000); // SNES only
    pub const DOWN: Self = Self(0x4000);
    pub const RIGHT: Self = Self(0x8000);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Buttons present on every controller (D-pad, A, B, START, SELECT).
    pub const BASELINE: Self = Self(
        Self::UP.0
            | Self::RIGHT.0
            | Self::DOWN.0
            | Self::LEFT.0
            | Self::SELECT.0
            | Self::START.0
            | Self::B.0
            | Self::A.0,
    );

    /// Buttons only an extended (SNES-class) controller has.
    pub const EXTENDED: Self = Self(Self::X.0 | Self::Y.0 | Self::L.0 | Self::R.0);

    /// Every named button.
    pub const ALL: Self = Self(Self::BASELINE.0 | Self::EXTENDED.0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if the given button is pressed (alias for contains).
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Buttons) -> bool {
        self.contains(button)
    }

    /// Check if any of the given buttons is pressed.
    #[inline]
    #[must_use]
    pub const fn intersects(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) != 0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Controller snapshot produced by a poll cycle.
///
/// A disconnected controller never reports buttons: whoever clears
/// `connected` also clears `buttons`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub buttons: Buttons,
    pub connected: bool,
}

impl ControllerState {
    /// Disconnected, nothing pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            connected: false,
        }
    }

    /// Connected with the given buttons held.
    #[must_use]
    pub const fn connected(buttons: Buttons) -> Self {
        Self {
            buttons,
            connected: true,
        }
    }

    /// Mark the controller as gone and drop any held buttons.
    #[inline]
    pub fn disconnect(&mut self) {
        *self = Self::neutral();
    }
}
