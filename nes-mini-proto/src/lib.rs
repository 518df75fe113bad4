//! NES/SNES Mini controller protocol over a bit-banged I2C bus.
//!
//! The controller is an I2C peer at 7-bit address `0x52` exposing a small
//! register file. This crate drives it through any [`soft_i2c::BitEngine`]:
//!
//! - [`NesMiniController::connect`]: init handshake (`0x55` to `0xF0`),
//!   needed by SNES-class controllers and harmless on a NES Mini
//! - [`NesMiniController::poll`]: select register `0x00`, wait for the
//!   controller to latch, read six bytes and decode the last two
//! - [`decode_buttons`]: the inversion and merge of the two state bytes
//!
//! The controller also implements [`gamepad_core::InputSource`], which adds
//! the reconnect policy: connect while disconnected, poll while connected.
//!
//! # Example
//!
//! ```ignore
//! use nes_mini_proto::NesMiniController;
//! use soft_i2c::BitBangI2c;
//!
//! let bus = BitBangI2c::new(lines, embassy_time::Delay);
//! let mut controller = NesMiniController::new(bus, embassy_time::Delay);
//!
//! if controller.connect() {
//!     let state = controller.poll().await;
//!     // Use state.buttons...
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![no_std]

pub mod controller;
pub mod decode;
mod input;

#[cfg(test)]
mod sim;

pub use controller::{ControllerConfig, NesMiniController};
pub use decode::{decode_buttons, decode_pair};

/// 7-bit bus address of the controller.
pub const ADDRESS: u8 = 0x52;

/// Address byte for a write transfer (`ADDRESS << 1`).
pub const WRITE_ADDRESS: u8 = ADDRESS << 1;

/// Address byte for a read transfer (`ADDRESS << 1 | 1`).
pub const READ_ADDRESS: u8 = (ADDRESS << 1) | 1;

/// Register that starts the controller when `INIT_VALUE` is written to it.
pub const INIT_REGISTER: u8 = 0xF0;

/// Value written to `INIT_REGISTER`.
pub const INIT_VALUE: u8 = 0x55;

/// Register the state snapshot is read from.
pub const STATE_REGISTER: u8 = 0x00;

/// Bytes read per snapshot; only the last two carry buttons.
pub const STATE_LEN: usize = 6;

/// Default wait between selecting the state register and reading it.
pub const DEFAULT_LATCH_DELAY_MS: u32 = 10;
