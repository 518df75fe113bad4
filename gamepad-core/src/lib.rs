//! Platform-agnostic controller types, report mapping, and traits.
//!
//! This crate provides the host-facing half of the NES/SNES Mini bridge
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`ControllerState`], [`Buttons`])
//! - [`report`]: report layouts ([`SimpleReport`], [`ExtendedReport`], [`XInputReport`])
//! - [`input`]: Input source trait ([`InputSource`])
//! - [`output`]: Output sink trait ([`OutputSink`])
//! - [`bridge`]: Orchestrates input-to-output flow ([`ControllerBridge`])
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::{ButtonReport, Buttons, ExtendedReport, SimpleReport};
//!
//! let held = Buttons::A | Buttons::UP | Buttons::L;
//!
//! // NES-style single byte: L has nowhere to go
//! assert_eq!(SimpleReport::from_buttons(held).as_bytes(), [0x81]);
//!
//! // SNES-style two bytes
//! assert_eq!(ExtendedReport::from_buttons(held).as_bytes(), [0x81, 0x04]);
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![no_std]

pub mod bridge;
pub mod input;
pub mod output;
pub mod report;
pub mod types;

// Re-export main types at crate root
pub use bridge::{BridgeError, ControllerBridge};
pub use input::{InputError, InputSource};
pub use output::{OutputError, OutputSink};
pub use report::{
    pack, ButtonReport, ExtendedReport, SimpleReport, XInputReport, EXTENDED_LAYOUT, SIMPLE_LAYOUT,
    XINPUT_DPAD_LAYOUT, XINPUT_FACE_LAYOUT,
};
pub use types::{Buttons, ControllerState};
