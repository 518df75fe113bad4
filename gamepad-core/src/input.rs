//! Input source trait and error types.

use crate::types::ControllerState;
use core::future::Future;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// No controller answered on the bus this cycle.
    Disconnected,
}

/// Async trait for controller input sources.
///
/// This trait abstracts where controller snapshots come from, so the bridge
/// and output side can be exercised without bus hardware.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputSource {
    /// Run one poll cycle and return the resulting snapshot.
    ///
    /// Implementations pace themselves; a cycle may await between bus
    /// transactions but never inside one.
    fn receive(&mut self) -> impl Future<Output = Result<ControllerState, InputError>>;

    /// Whether the last cycle found a controller.
    fn is_connected(&self) -> bool;
}
