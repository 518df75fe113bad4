//! GPIO line contract for the two bus lines.

use core::convert::Infallible;
use embedded_hal::digital::{InputPin, OutputPin};

/// One of the two I2C bus lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// SCL
    Clock,
    /// SDA
    Data,
}

/// Physical-layer access to the two open-drain bus lines.
///
/// A released line floats high through the external pull-up unless some
/// device on the bus drives it low, so [`is_high`](Self::is_high) reports
/// the bus level, not the level this side last asked for.
///
/// Implementations mutate hardware registers directly and are not
/// re-entrant. They never fail.
pub trait LineDriver {
    /// Stop driving the line and let the pull-up take it high.
    fn release(&mut self, line: Line);

    /// Actively drive the line low.
    fn pull_low(&mut self, line: Line);

    /// Sample the current logic level of the line.
    fn is_high(&mut self, line: Line) -> bool;
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    #[inline]
    fn release(&mut self, line: Line) {
        T::release(self, line);
    }

    #[inline]
    fn pull_low(&mut self, line: Line) {
        T::pull_low(self, line);
    }

    #[inline]
    fn is_high(&mut self, line: Line) -> bool {
        T::is_high(self, line)
    }
}

/// Line driver over a pair of open-drain output pins that can also be read.
///
/// Writing high releases the pin, writing low pulls the line down. This is
/// the variant for pins configured as open-drain in hardware; boards that
/// emulate open-drain by flipping pin direction provide their own
/// [`LineDriver`].
pub struct OpenDrainLines<SCL, SDA> {
    scl: SCL,
    sda: SDA,
}

impl<SCL, SDA> OpenDrainLines<SCL, SDA>
where
    SCL: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
    SDA: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
{
    /// Take ownership of both pins and release them (bus idle).
    pub fn new(scl: SCL, sda: SDA) -> Self {
        let mut lines = Self { scl, sda };
        lines.release(Line::Data);
        lines.release(Line::Clock);
        lines
    }

    /// Give the pins back.
    pub fn into_inner(self) -> (SCL, SDA) {
        (self.scl, self.sda)
    }
}

#[inline]
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<SCL, SDA> LineDriver for OpenDrainLines<SCL, SDA>
where
    SCL: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
    SDA: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
{
    fn release(&mut self, line: Line) {
        match line {
            Line::Clock => infallible(self.scl.set_high()),
            Line::Data => infallible(self.sda.set_high()),
        }
    }

    fn pull_low(&mut self, line: Line) {
        match line {
            Line::Clock => infallible(self.scl.set_low()),
            Line::Data => infallible(self.sda.set_low()),
        }
    }

    fn is_high(&mut self, line: Line) -> bool {
        match line {
            Line::Clock => infallible(self.scl.is_high()),
            Line::Data => infallible(self.sda.is_high()),
        }
    }
}
