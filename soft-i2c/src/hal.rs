//! [`embedded_hal::i2c::I2c`] on top of the bit-banged engine.
//!
//! Lets generic I2C drivers run over [`BitBangI2c`]. The raw engine keeps
//! reporting ACK/NACK as values; only this adapter turns a NACK into an
//! error.

use crate::bitbang::BitBangI2c;
use crate::engine::{Ack, BitEngine};
use crate::line::LineDriver;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{
    Error, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};

/// Transaction error reported by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The peer did not acknowledge the address or a data byte.
    NoAcknowledge(NoAcknowledgeSource),
}

impl Error for BusError {
    fn kind(&self) -> ErrorKind {
        match *self {
            BusError::NoAcknowledge(source) => ErrorKind::NoAcknowledge(source),
        }
    }
}

impl<L: LineDriver, D: DelayNs> ErrorType for BitBangI2c<L, D> {
    type Error = BusError;
}

impl<L: LineDriver, D: DelayNs> BitBangI2c<L, D> {
    fn address(&mut self, address: SevenBitAddress, read: bool) -> Result<(), BusError> {
        self.start();
        match self.write_byte((address << 1) | u8::from(read)) {
            Ack::Ack => Ok(()),
            Ack::Nack => Err(BusError::NoAcknowledge(NoAcknowledgeSource::Address)),
        }
    }

    fn run_operations(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), BusError> {
        let mut previous_read = None;
        // A read run must end with a NACKed byte or the peer keeps SDA.
        let mut nack_owed = false;

        for index in 0..operations.len() {
            let read = matches!(operations[index], Operation::Read(_));
            let next_read = matches!(operations.get(index + 1), Some(Operation::Read(_)));

            if previous_read != Some(read) {
                self.address(address, read)?;
                nack_owed = read;
            }
            previous_read = Some(read);

            match &mut operations[index] {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if self.write_byte(byte).is_nack() {
                            return Err(BusError::NoAcknowledge(NoAcknowledgeSource::Data));
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let last = buffer.len().saturating_sub(1);
                    for (position, slot) in buffer.iter_mut().enumerate() {
                        let ack = if position == last && !next_read {
                            Ack::Nack
                        } else {
                            Ack::Ack
                        };
                        *slot = self.read_byte(ack);
                        nack_owed = ack.is_ack();
                    }
                    if nack_owed && !next_read {
                        // empty final buffer: clock one byte out and drop it
                        self.read_byte(Ack::Nack);
                        nack_owed = false;
                    }
                }
            }
        }

        Ok(())
    }
}

impl<L: LineDriver, D: DelayNs> I2c<SevenBitAddress> for BitBangI2c<L, D> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }
        let result = self.run_operations(address, operations);
        self.stop();
        result
    }
}
