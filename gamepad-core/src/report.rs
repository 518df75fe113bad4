//! Button-to-report mapping for the HID wire formats.
//!
//! Each layout is a table of `(flag, destination bit)` pairs packed into a
//! byte in one pass. Bits without an entry, or whose flag is not held, are
//! always zero, so a report never carries anything over from an earlier
//! poll.
//!
//! | Byte | Bit 0 | Bit 1 | Bit 2 | Bit 3 | Bit 4 | Bit 5 | Bit 6 | Bit 7 |
//! |------|-------|-------|-------|-------|-------|-------|-------|-------|
//! | 0    | UP    | RIGHT | DOWN  | LEFT  | SELECT| START | B     | A     |
//! | 1    | X     | Y     | L     | R     | -     | -     | -     | -     |
//!
//! [`SimpleReport`] is byte 0 alone; [`ExtendedReport`] is both bytes.
//!
//! [`XInputReport`] is the 20-byte Xbox 360 input packet instead. Buttons
//! sit in bytes 2 and 3, matched by name, with L/R on the bumpers and
//! SELECT on BACK:
//!
//! | Byte | Bit 0 | Bit 1 | Bit 2 | Bit 3 | Bit 4 | Bit 5 | Bit 6 | Bit 7 |
//! |------|-------|-------|-------|-------|-------|-------|-------|-------|
//! | 2    | UP    | DOWN  | LEFT  | RIGHT | START | SELECT| -     | -     |
//! | 3    | L     | R     | -     | -     | A     | B     | X     | Y     |

use crate::types::Buttons;

/// Flag-to-bit table for the first report byte.
pub const SIMPLE_LAYOUT: [(Buttons, u8); 8] = [
    (Buttons::UP, 0),
    (Buttons::RIGHT, 1),
    (Buttons::DOWN, 2),
    (Buttons::LEFT, 3),
    (Buttons::SELECT, 4),
    (Buttons::START, 5),
    (Buttons::B, 6),
    (Buttons::A, 7),
];

/// Flag-to-bit table for the second byte of the extended report.
pub const EXTENDED_LAYOUT: [(Buttons, u8); 4] = [
    (Buttons::X, 0),
    (Buttons::Y, 1),
    (Buttons::L, 2),
    (Buttons::R, 3),
];

/// Flag-to-bit table for byte 2 of the XInput packet (D-pad, START, BACK).
pub const XINPUT_DPAD_LAYOUT: [(Buttons, u8); 6] = [
    (Buttons::UP, 0),
    (Buttons::DOWN, 1),
    (Buttons::LEFT, 2),
    (Buttons::RIGHT, 3),
    (Buttons::START, 4),
    (Buttons::SELECT, 5),
];

/// Flag-to-bit table for byte 3 of the XInput packet (bumpers, face buttons).
pub const XINPUT_FACE_LAYOUT: [(Buttons, u8); 6] = [
    (Buttons::L, 0),
    (Buttons::R, 1),
    (Buttons::A, 4),
    (Buttons::B, 5),
    (Buttons::X, 6),
    (Buttons::Y, 7),
];

/// Pack `buttons` into one byte according to `layout`.
#[must_use]
pub fn pack(buttons: Buttons, layout: &[(Buttons, u8)]) -> u8 {
    layout
        .iter()
        .filter(|(flag, _)| buttons.contains(*flag))
        .fold(0, |byte, &(_, bit)| byte | (1 << bit))
}

/// A fixed-size HID input report built from the button flags.
pub trait ButtonReport: Copy {
    /// Report length in bytes.
    const SIZE: usize;

    /// Map the button flags onto this layout.
    fn from_buttons(buttons: Buttons) -> Self;

    /// Write the report into the front of `buf` and return the bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len() < Self::SIZE`.
    fn write_to(&self, buf: &mut [u8]) -> usize;
}

/// One-byte report: eight buttons.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimpleReport {
    pub buttons: u8,
}

impl SimpleReport {
    #[must_use]
    pub const fn neutral() -> Self {
        Self { buttons: 0 }
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; 1] {
        [self.buttons]
    }
}

impl ButtonReport for SimpleReport {
    const SIZE: usize = 1;

    fn from_buttons(buttons: Buttons) -> Self {
        Self {
            buttons: pack(buttons, &SIMPLE_LAYOUT),
        }
    }

    fn write_to(&self, buf: &mut [u8]) -> usize {
        buf[..Self::SIZE].copy_from_slice(&self.as_bytes());
        Self::SIZE
    }
}

/// Two-byte report: the eight common buttons plus X, Y, L, R.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedReport {
    /// Same layout as [`SimpleReport::buttons`].
    pub common: u8,
    /// X, Y, L, R in bits 0-3; bits 4-7 are padding.
    pub extended: u8,
}

impl ExtendedReport {
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            common: 0,
            extended: 0,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; 2] {
        [self.common, self.extended]
    }
}

impl ButtonReport for ExtendedReport {
    const SIZE: usize = 2;

    fn from_buttons(buttons: Buttons) -> Self {
        Self {
            common: pack(buttons, &SIMPLE_LAYOUT),
            extended: pack(buttons, &EXTENDED_LAYOUT),
        }
    }

    fn write_to(&self, buf: &mut [u8]) -> usize {
        buf[..Self::SIZE].copy_from_slice(&self.as_bytes());
        Self::SIZE
    }
}

/// Xbox 360 input packet: message type, length, buttons, then triggers and
/// sticks that always rest at zero.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XInputReport {
    /// Byte 2, see [`XINPUT_DPAD_LAYOUT`].
    pub dpad: u8,
    /// Byte 3, see [`XINPUT_FACE_LAYOUT`].
    pub face: u8,
}

impl XInputReport {
    /// Packet length, also carried in byte 1.
    pub const LEN: u8 = 20;

    #[must_use]
    pub const fn neutral() -> Self {
        Self { dpad: 0, face: 0 }
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::LEN as usize] {
        let mut bytes = [0; Self::LEN as usize];
        bytes[1] = Self::LEN;
        bytes[2] = self.dpad;
        bytes[3] = self.face;
        bytes
    }
}

impl ButtonReport for XInputReport {
    const SIZE: usize = Self::LEN as usize;

    fn from_buttons(buttons: Buttons) -> Self {
        Self {
            dpad: pack(buttons, &XINPUT_DPAD_LAYOUT),
            face: pack(buttons, &XINPUT_FACE_LAYOUT),
        }
    }

    fn write_to(&self, buf: &mut [u8]) -> usize {
        buf[..Self::SIZE].copy_from_slice(&self.as_bytes());
        Self::SIZE
    }
}
