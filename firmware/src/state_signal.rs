//! Hands controller state from the input task to the output task.

use core::future::{ready, Future};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use gamepad_core::{ControllerState, OutputError, OutputSink};

/// Latest-value slot between the tasks. A state not yet written to USB is
/// overwritten by the next poll.
pub type StateSignal = Signal<CriticalSectionRawMutex, ControllerState>;

/// [`OutputSink`] that publishes into a [`StateSignal`]. Never fails.
pub struct SignalOutput(&'static StateSignal);

impl SignalOutput {
    pub fn new(signal: &'static StateSignal) -> Self {
        Self(signal)
    }
}

impl OutputSink for SignalOutput {
    fn send(&mut self, state: &ControllerState) -> impl Future<Output = Result<(), OutputError>> {
        self.0.signal(*state);
        ready(Ok(()))
    }

    fn is_ready(&self) -> bool {
        true
    }
}
