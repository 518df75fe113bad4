//! Manual bit-banged backend.

use crate::engine::BitEngine;
use crate::line::{Line, LineDriver};
use embedded_hal::delay::DelayNs;

/// Clock timing for the bit-banged bus, in microseconds.
///
/// `low_us` is spent with the clock low before each rising edge (data setup,
/// START hold, STOP setup); `high_us` is spent with the clock high (data
/// valid window, bus free time after STOP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    pub low_us: u32,
    pub high_us: u32,
}

impl BusTiming {
    /// Standard mode, roughly 100 kHz (t_LOW >= 4.7 us, t_HIGH >= 4.0 us).
    pub const STANDARD: Self = Self {
        low_us: 5,
        high_us: 4,
    };
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// I2C controller that toggles the two lines by hand.
///
/// Owns the [`LineDriver`] exclusively; nothing else may touch the lines
/// while the engine exists. Every release of the clock line is followed by
/// an unbounded wait for it to read high, which is how a peer stretches the
/// clock.
pub struct BitBangI2c<L, D> {
    lines: L,
    delay: D,
    timing: BusTiming,
}

impl<L: LineDriver, D: DelayNs> BitBangI2c<L, D> {
    /// Create an engine with [`BusTiming::STANDARD`].
    pub fn new(lines: L, delay: D) -> Self {
        Self::with_timing(lines, delay, BusTiming::STANDARD)
    }

    pub fn with_timing(lines: L, delay: D, timing: BusTiming) -> Self {
        Self {
            lines,
            delay,
            timing,
        }
    }

    #[inline]
    #[must_use]
    pub fn timing(&self) -> BusTiming {
        self.timing
    }

    /// Give back the line driver and the delay.
    pub fn into_inner(self) -> (L, D) {
        (self.lines, self.delay)
    }

    fn set_data(&mut self, high: bool) {
        if high {
            self.lines.release(Line::Data);
        } else {
            self.lines.pull_low(Line::Data);
        }
    }

    /// Release the clock and spin until the bus shows it high.
    fn release_clock(&mut self) {
        self.lines.release(Line::Clock);
        while !self.lines.is_high(Line::Clock) {
            core::hint::spin_loop();
        }
    }
}

impl<L: LineDriver, D: DelayNs> BitEngine for BitBangI2c<L, D> {
    fn start(&mut self) {
        self.lines.release(Line::Data);
        self.release_clock();
        self.delay.delay_us(self.timing.high_us);

        self.lines.pull_low(Line::Data);
        self.delay.delay_us(self.timing.low_us);
        self.lines.pull_low(Line::Clock);
    }

    fn stop(&mut self) {
        self.lines.pull_low(Line::Data);
        self.delay.delay_us(self.timing.low_us);

        self.release_clock();
        self.delay.delay_us(self.timing.low_us);

        self.lines.release(Line::Data);
        self.delay.delay_us(self.timing.high_us);
    }

    fn write_bit(&mut self, bit: bool) {
        self.set_data(bit);
        self.delay.delay_us(self.timing.low_us);

        self.release_clock();
        self.delay.delay_us(self.timing.high_us);

        self.lines.pull_low(Line::Clock);
    }

    fn read_bit(&mut self) -> bool {
        self.lines.release(Line::Data);
        self.delay.delay_us(self.timing.low_us);

        self.release_clock();
        self.delay.delay_us(self.timing.high_us);
        let bit = self.lines.is_high(Line::Data);

        self.lines.pull_low(Line::Clock);
        bit
    }
}
