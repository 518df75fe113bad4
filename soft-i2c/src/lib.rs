//! Bit-banged I2C controller over two open-drain lines.
//!
//! The crate is layered the same way the bus is:
//!
//! - [`line`]: the GPIO line contract ([`LineDriver`]) and a driver for
//!   open-drain `embedded-hal` pins ([`OpenDrainLines`])
//! - [`engine`]: the bit-level contract ([`BitEngine`]) with the byte-level
//!   transfer built on top of it, and the [`Ack`] value
//! - [`bitbang`]: the manual bit-banged backend ([`BitBangI2c`])
//! - [`hal`]: an [`embedded_hal::i2c::I2c`] implementation for the backend
//!
//! # Example
//!
//! ```ignore
//! use soft_i2c::{Ack, BitBangI2c, BitEngine, OpenDrainLines};
//!
//! let mut bus = BitBangI2c::new(OpenDrainLines::new(scl, sda), delay);
//! bus.start();
//! if bus.write_byte(0xA4).is_ack() {
//!     bus.write_byte(0x00);
//! }
//! bus.stop();
//! ```
//!
//! # Clock stretching
//!
//! Every time the controller releases the clock line it spins until the
//! line reads high. There is no timeout: a peer holding the clock low
//! blocks the caller forever. Liveness, where required, belongs to the
//! integration (e.g. a hardware watchdog).
//!
//! # Features
//!
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![no_std]

pub mod bitbang;
pub mod engine;
pub mod hal;
pub mod line;

pub use bitbang::{BitBangI2c, BusTiming};
pub use engine::{Ack, BitEngine};
pub use hal::BusError;
pub use line::{Line, LineDriver, OpenDrainLines};
