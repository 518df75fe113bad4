//! Raw snapshot to button flags.

use crate::STATE_LEN;
use gamepad_core::Buttons;

/// Decode the two button bytes of a snapshot.
///
/// The controller reports buttons active-low, so both bytes are inverted.
/// `high` becomes the upper half of the flag word and `low` the lower half:
/// `(!high << 8) | !low`.
#[inline]
#[must_use]
pub const fn decode_pair(high: u8, low: u8) -> Buttons {
    Buttons((((!high) as u16) << 8) | ((!low) as u16))
}

/// Decode a full six-byte snapshot. Bytes 0-3 carry nothing and are ignored.
#[inline]
#[must_use]
pub const fn decode_buttons(raw: &[u8; STATE_LEN]) -> Buttons {
    decode_pair(raw[4], raw[5])
}
