//! Output sink trait and error types.

use crate::types::ControllerState;
use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
}

/// Async trait for report output sinks.
///
/// This trait abstracts the destination for controller state, e.g. a USB HID
/// endpoint. Implementations own their report buffer and overwrite it on
/// every send.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait OutputSink {
    /// Map the state to a report and send it.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, state: &ControllerState) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
