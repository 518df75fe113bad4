//! Bit-level bus contract and the byte transfer built on it.

/// Acknowledge bit clocked after every byte.
///
/// On the wire ACK is a low data line (bit `0`) and NACK is a released,
/// high data line (bit `1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Receiver accepted the byte / controller wants another byte.
    Ack,
    /// Nobody answered / controller is done reading.
    Nack,
}

impl Ack {
    /// Interpret a sampled acknowledge bit.
    #[inline]
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Ack::Nack
        } else {
            Ack::Ack
        }
    }

    /// Line level for this acknowledge (`false` = low).
    #[inline]
    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Ack::Nack)
    }

    #[inline]
    #[must_use]
    pub const fn is_ack(self) -> bool {
        matches!(self, Ack::Ack)
    }

    #[inline]
    #[must_use]
    pub const fn is_nack(self) -> bool {
        matches!(self, Ack::Nack)
    }
}

/// Bit-level I2C controller engine.
///
/// A transfer session starts with [`start`](Self::start) and ends with
/// [`stop`](Self::stop). Sessions are not re-entrant: the engine owns the
/// bus lines and every primitive runs to completion in program order.
///
/// The byte methods are provided on top of the bit methods, MSB first.
/// Backends with a hardware shift register override them for the eight
/// data bits and keep the same observable behavior.
pub trait BitEngine {
    /// START condition: data falls while the clock is high, then the clock
    /// is pulled low ready for the first bit.
    fn start(&mut self);

    /// STOP condition: data rises while the clock is high.
    fn stop(&mut self);

    /// Clock one bit out to the peer.
    fn write_bit(&mut self, bit: bool);

    /// Release data and clock one bit in from the peer.
    fn read_bit(&mut self) -> bool;

    /// Write eight bits MSB first and return the peer's acknowledge.
    fn write_byte(&mut self, byte: u8) -> Ack {
        for shift in (0..8).rev() {
            self.write_bit((byte >> shift) & 1 != 0);
        }
        Ack::from_bit(self.read_bit())
    }

    /// Read eight bits MSB first, then answer with `ack`.
    ///
    /// Send [`Ack::Ack`] to ask for more data and [`Ack::Nack`] on the last
    /// byte of the session.
    fn read_byte(&mut self, ack: Ack) -> u8 {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | u8::from(self.read_bit());
        }
        self.write_bit(ack.bit());
        byte
    }
}

impl<T: BitEngine + ?Sized> BitEngine for &mut T {
    #[inline]
    fn start(&mut self) {
        T::start(self);
    }

    #[inline]
    fn stop(&mut self) {
        T::stop(self);
    }

    #[inline]
    fn write_bit(&mut self, bit: bool) {
        T::write_bit(self, bit);
    }

    #[inline]
    fn read_bit(&mut self) -> bool {
        T::read_bit(self)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Ack {
        T::write_byte(self, byte)
    }

    #[inline]
    fn read_byte(&mut self, ack: Ack) -> u8 {
        T::read_byte(self, ack)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::vec;
    use std::vec::Vec;

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Start,
        Stop,
        Write(bool),
        Read,
    }

    struct RecordingEngine {
        ops: Vec<Op>,
        incoming: VecDeque<bool>,
    }

    impl RecordingEngine {
        fn new(incoming: &[bool]) -> Self {
            Self {
                ops: Vec::new(),
                incoming: incoming.iter().copied().collect(),
            }
        }

        fn written_bits(&self) -> Vec<bool> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Write(bit) => Some(*bit),
                    _ => None,
                })
                .collect()
        }
    }

    impl BitEngine for RecordingEngine {
        fn start(&mut self) {
            self.ops.push(Op::Start);
        }

        fn stop(&mut self) {
            self.ops.push(Op::Stop);
        }

        fn write_bit(&mut self, bit: bool) {
            self.ops.push(Op::Write(bit));
        }

        fn read_bit(&mut self) -> bool {
            self.ops.push(Op::Read);
            self.incoming.pop_front().unwrap_or(true)
        }
    }

    fn bits_of(byte: u8) -> Vec<bool> {
        (0..8).rev().map(|i| (byte >> i) & 1 != 0).collect()
    }

    #[test]
    fn test_ack_bit_convention() {
        assert_eq!(Ack::from_bit(false), Ack::Ack);
        assert_eq!(Ack::from_bit(true), Ack::Nack);
        assert!(!Ack::Ack.bit());
        assert!(Ack::Nack.bit());
        assert!(Ack::Ack.is_ack());
        assert!(Ack::Nack.is_nack());
    }

    #[test]
    fn test_write_byte_msb_first_then_reads_ack() {
        let mut engine = RecordingEngine::new(&[false]);
        let ack = engine.write_byte(0xA4);

        assert_eq!(ack, Ack::Ack);
        assert_eq!(engine.written_bits(), bits_of(0xA4));
        assert_eq!(engine.ops.last(), Some(&Op::Read));
        assert_eq!(engine.ops.len(), 9);
    }

    #[test]
    fn test_write_byte_reports_nack_on_high_line() {
        let mut engine = RecordingEngine::new(&[true]);
        assert_eq!(engine.write_byte(0x00), Ack::Nack);
    }

    #[test]
    fn test_read_byte_assembles_msb_first() {
        let mut engine = RecordingEngine::new(&bits_of(0x7F));
        let byte = engine.read_byte(Ack::Ack);

        assert_eq!(byte, 0x7F);
        assert!(engine.ops[..8].iter().all(|op| *op == Op::Read));
        assert_eq!(engine.ops[8], Op::Write(false));
    }

    #[test]
    fn test_read_byte_sends_nack_for_last_byte() {
        let mut engine = RecordingEngine::new(&bits_of(0x01));
        assert_eq!(engine.read_byte(Ack::Nack), 0x01);
        assert_eq!(engine.written_bits(), vec![true]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn session<E: BitEngine>(mut engine: E) -> Ack {
            engine.start();
            let ack = engine.write_byte(0x55);
            engine.stop();
            ack
        }

        let mut engine = RecordingEngine::new(&[false]);
        assert_eq!(session(&mut engine), Ack::Ack);
        assert_eq!(engine.ops.first(), Some(&Op::Start));
        assert_eq!(engine.ops.last(), Some(&Op::Stop));
    }
}
