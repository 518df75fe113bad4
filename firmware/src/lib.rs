//! NES/SNES Mini controller to USB Gamepad bridge for RP2040.
//!
//! This crate provides the embedded pieces of the bridge: the bus lines on
//! RP2040 GPIO, the hand-off between tasks and the USB output. Protocol and
//! report mapping live in the chip-agnostic workspace crates.

#![no_std]

// Re-export core types for convenience
pub use gamepad_core::{ControllerBridge, ControllerState, OutputSink};
pub use nes_mini_proto::NesMiniController;
pub use soft_i2c::BitBangI2c;

pub mod lines;
pub mod state_signal;
pub mod usb_output;

pub use lines::FlexLines;
pub use state_signal::{SignalOutput, StateSignal};
pub use usb_output::{configure_usb, device_config, ActiveReport, UsbOutput, REPORT_SIZE};
