//! One poll cycle from an [`InputSource`] to an [`OutputSink`].

use crate::input::{InputError, InputSource};
use crate::output::{OutputError, OutputSink};
use crate::types::ControllerState;

/// Forwards each snapshot from `I` to `O`.
///
/// An input error is forwarded as [`ControllerState::neutral`], so the host
/// sees every button released while no controller answers.
pub struct ControllerBridge<I, O> {
    input: I,
    output: O,
}

impl<I: InputSource, O: OutputSink> ControllerBridge<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Run one cycle and return what was forwarded.
    ///
    /// On an input error the neutral state is still sent; the input error
    /// wins over any output error from that send.
    pub async fn process_one(&mut self) -> Result<ControllerState, BridgeError> {
        let received = self.input.receive().await;
        let state = received.unwrap_or(ControllerState::neutral());
        let sent = self.output.send(&state).await;

        match (received, sent) {
            (Err(e), _) => Err(BridgeError::Input(e)),
            (Ok(_), Err(e)) => Err(BridgeError::Output(e)),
            (Ok(state), Ok(())) => Ok(state),
        }
    }

    #[inline]
    pub fn input(&self) -> &I {
        &self.input
    }

    #[inline]
    pub fn output(&self) -> &O {
        &self.output
    }
}

/// Why a cycle did not forward a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    Input(InputError),
    Output(OutputError),
}
