//! Bus lines on RP2040 GPIO.

use embassy_rp::gpio::{Flex, Pull};
use soft_i2c::{Line, LineDriver};

/// SCL and SDA on two [`Flex`] pins, emulating open drain by switching
/// direction.
///
/// Both output latches are held low, so a line is either an input left to
/// the external pull-up or an output sinking to ground. The pins never
/// drive high, which keeps clock stretching and peer acknowledges safe.
pub struct FlexLines<'d> {
    scl: Flex<'d>,
    sda: Flex<'d>,
}

impl<'d> FlexLines<'d> {
    /// Take both pins and release them.
    pub fn new(mut scl: Flex<'d>, mut sda: Flex<'d>) -> Self {
        for pin in [&mut scl, &mut sda] {
            pin.set_pull(Pull::None);
            pin.set_low();
            pin.set_as_input();
        }
        Self { scl, sda }
    }

    fn pin(&mut self, line: Line) -> &mut Flex<'d> {
        match line {
            Line::Clock => &mut self.scl,
            Line::Data => &mut self.sda,
        }
    }
}

impl LineDriver for FlexLines<'_> {
    #[inline]
    fn release(&mut self, line: Line) {
        self.pin(line).set_as_input();
    }

    #[inline]
    fn pull_low(&mut self, line: Line) {
        let pin = self.pin(line);
        pin.set_low();
        pin.set_as_output();
    }

    #[inline]
    fn is_high(&mut self, line: Line) -> bool {
        self.pin(line).is_high()
    }
}
