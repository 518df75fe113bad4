//! Connection handshake and poll cycle.

use crate::decode::decode_buttons;
use crate::{
    DEFAULT_LATCH_DELAY_MS, INIT_REGISTER, INIT_VALUE, READ_ADDRESS, STATE_LEN, STATE_REGISTER,
    WRITE_ADDRESS,
};
use embedded_hal_async::delay::DelayNs;
use gamepad_core::ControllerState;
use soft_i2c::{Ack, BitEngine};

#[cfg(feature = "defmt")]
use defmt::{debug, trace};

/// Poll cycle tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Wait between selecting the state register and reading it back.
    ///
    /// The controller needs this long to latch a fresh snapshot; shorter
    /// waits return stale or garbled bytes on some units.
    pub latch_delay_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            latch_delay_ms: DEFAULT_LATCH_DELAY_MS,
        }
    }
}

/// One NES/SNES Mini controller on a bit-banged bus.
///
/// Owns the bus engine and the latest [`ControllerState`]. The state is only
/// changed by [`connect`](Self::connect) and [`poll`](Self::poll), and a
/// disconnected state never carries buttons.
///
/// Bus transactions run without yielding; the only await point is the latch
/// delay, which sits between a STOP and the next START.
pub struct NesMiniController<B, D> {
    bus: B,
    delay: D,
    config: ControllerConfig,
    state: ControllerState,
}

impl<B: BitEngine, D: DelayNs> NesMiniController<B, D> {
    /// Create a controller with [`ControllerConfig::default`].
    ///
    /// Starts disconnected; call [`connect`](Self::connect) first.
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_config(bus, delay, ControllerConfig::default())
    }

    pub fn with_config(bus: B, delay: D, config: ControllerConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            state: ControllerState::neutral(),
        }
    }

    /// Latest snapshot.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Give back the bus engine and the delay.
    pub fn into_inner(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Send the init handshake and report whether a controller answered.
    ///
    /// The register and value bytes go out even when the address is not
    /// acknowledged; only the address acknowledge decides the result. A NACK
    /// clears any buttons left over from an earlier session.
    pub fn connect(&mut self) -> bool {
        self.bus.start();
        let ack = self.bus.write_byte(WRITE_ADDRESS);
        self.bus.write_byte(INIT_REGISTER);
        self.bus.write_byte(INIT_VALUE);
        self.bus.stop();

        if ack.is_ack() {
            #[cfg(feature = "defmt")]
            debug!("controller acknowledged init");
            self.state.connected = true;
        } else {
            self.state.disconnect();
        }
        self.state.connected
    }

    /// Run one poll cycle and return the updated snapshot.
    ///
    /// Selects the state register, waits [`ControllerConfig::latch_delay_ms`],
    /// reads [`STATE_LEN`] bytes and decodes the last two. If the controller
    /// does not acknowledge the register select the cycle ends right after
    /// the STOP: no delay, no read, and the state becomes disconnected.
    pub async fn poll(&mut self) -> ControllerState {
        self.bus.start();
        if self.bus.write_byte(WRITE_ADDRESS).is_nack() {
            self.bus.stop();
            self.state.disconnect();
            return self.state;
        }
        self.bus.write_byte(STATE_REGISTER);
        self.bus.stop();

        self.delay.delay_ms(self.config.latch_delay_ms).await;

        // A peer that vanished here leaves the bus floating high, which
        // decodes to no buttons; the next select will catch the NACK.
        self.bus.start();
        self.bus.write_byte(READ_ADDRESS);
        let mut raw = [0u8; STATE_LEN];
        let last = raw.len() - 1;
        for (index, byte) in raw.iter_mut().enumerate() {
            let ack = if index == last { Ack::Nack } else { Ack::Ack };
            *byte = self.bus.read_byte(ack);
        }
        self.bus.stop();

        #[cfg(feature = "defmt")]
        trace!("state bytes: {:02x}", raw);

        self.state = ControllerState::connected(decode_buttons(&raw));
        self.state
    }
}
