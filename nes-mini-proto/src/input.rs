//! [`InputSource`] for the controller, with reconnect handling.

use crate::controller::NesMiniController;
use core::future::Future;
use embedded_hal_async::delay::DelayNs;
use gamepad_core::{ControllerState, InputError, InputSource};
use soft_i2c::BitEngine;

#[cfg(feature = "defmt")]
use defmt::{info, warn};

impl<B: BitEngine, D: DelayNs> NesMiniController<B, D> {
    /// One cycle of the reconnect policy: poll a connected controller,
    /// otherwise retry the handshake.
    async fn cycle(&mut self) -> Result<ControllerState, InputError> {
        let was_connected = self.is_connected();
        let state = if was_connected {
            self.poll().await
        } else {
            self.connect();
            self.state()
        };

        #[cfg(feature = "defmt")]
        match (was_connected, state.connected) {
            (false, true) => info!("controller connected"),
            (true, false) => warn!("controller disconnected"),
            _ => {}
        }

        if state.connected {
            Ok(state)
        } else {
            Err(InputError::Disconnected)
        }
    }
}

impl<B: BitEngine, D: DelayNs> InputSource for NesMiniController<B, D> {
    fn receive(&mut self) -> impl Future<Output = Result<ControllerState, InputError>> {
        self.cycle()
    }

    fn is_connected(&self) -> bool {
        NesMiniController::is_connected(self)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::sim::{BusEvent, CountingDelay, SimLines};
    use crate::{INIT_REGISTER, INIT_VALUE, WRITE_ADDRESS};
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use gamepad_core::Buttons;
    use soft_i2c::BitBangI2c;

    type Controller = NesMiniController<BitBangI2c<SimLines, NoopDelay>, CountingDelay>;

    fn setup() -> (Controller, SimLines) {
        let lines = SimLines::new();
        let bus = BitBangI2c::new(lines.clone(), NoopDelay::new());
        (NesMiniController::new(bus, CountingDelay::default()), lines)
    }

    #[test]
    fn test_unplugged_controller_is_disconnected() {
        let (mut controller, lines) = setup();
        lines.peer(|peer| peer.unplug());

        assert_eq!(block_on(controller.receive()), Err(InputError::Disconnected));
        assert_eq!(block_on(controller.receive()), Err(InputError::Disconnected));
        assert!(!InputSource::is_connected(&controller));
    }

    #[test]
    fn test_first_cycle_connects_then_polls() {
        let (mut controller, lines) = setup();
        lines.peer(|peer| peer.press(Buttons::START));

        // connecting cycle reports no buttons yet
        let state = block_on(controller.receive()).unwrap();
        assert_eq!(state, ControllerState::connected(Buttons::NONE));
        assert!(InputSource::is_connected(&controller));

        let state = block_on(controller.receive()).unwrap();
        assert_eq!(state.buttons, Buttons::START);
    }

    #[test]
    fn test_unplug_then_replug_reinitializes() {
        let (mut controller, lines) = setup();
        lines.peer(|peer| {
            peer.requires_init = true;
            peer.press(Buttons::A | Buttons::B);
        });

        block_on(controller.receive()).unwrap();
        assert_eq!(
            block_on(controller.receive()).unwrap().buttons,
            Buttons::A | Buttons::B
        );

        lines.peer(|peer| peer.unplug());
        assert_eq!(block_on(controller.receive()), Err(InputError::Disconnected));
        assert_eq!(controller.state(), ControllerState::neutral());

        lines.peer(|peer| peer.plug());
        lines.take_events();
        assert!(block_on(controller.receive()).is_ok());
        assert_eq!(
            lines.take_events(),
            [
                BusEvent::Start,
                BusEvent::Address(WRITE_ADDRESS),
                BusEvent::Written(INIT_REGISTER),
                BusEvent::Written(INIT_VALUE),
                BusEvent::Stop,
            ]
        );
        assert!(lines.peer(|peer| peer.initialized));
        assert_eq!(
            block_on(controller.receive()).unwrap().buttons,
            Buttons::A | Buttons::B
        );
    }

    #[test]
    fn test_released_buttons_clear_on_next_cycle() {
        let (mut controller, lines) = setup();
        lines.peer(|peer| peer.press(Buttons::LEFT | Buttons::Y));
        block_on(controller.receive()).unwrap();
        assert_eq!(
            block_on(controller.receive()).unwrap().buttons,
            Buttons::LEFT | Buttons::Y
        );

        lines.peer(|peer| peer.press(Buttons::NONE));
        assert!(block_on(controller.receive()).unwrap().buttons.is_empty());
    }
}
