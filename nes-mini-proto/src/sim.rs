//! Wire-level NES/SNES Mini peer for tests.
//!
//! [`SimLines`] is a [`LineDriver`] whose lines are shared with a simulated
//! controller. The peer watches the bus exactly like the real part: START
//! and STOP from data edges while the clock is high, bits on rising clock
//! edges, its own output changes on falling clock edges.

extern crate std;

use crate::{ADDRESS, INIT_REGISTER, INIT_VALUE};
use gamepad_core::Buttons;
use soft_i2c::{Line, LineDriver};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

/// What the peer saw or did on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Stop,
    /// Address byte the peer acknowledged.
    Address(u8),
    /// Data byte written to the peer.
    Written(u8),
    /// Data byte the peer clocked out.
    Sent(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Receive,
    AckOut,
    Transmit,
    AckIn,
}

pub struct Peer {
    pub present: bool,
    /// Reads return zeros until the init handshake is seen.
    pub requires_init: bool,
    pub initialized: bool,
    pub registers: [u8; 256],
    pub events: Vec<BusEvent>,
    /// Polls of a released clock that still read low.
    pub stretch: usize,
    pointer: u8,
    phase: Phase,
    shift: u8,
    bits: u8,
    expect_address: bool,
    reading: bool,
    pointer_set: bool,
    master_acked: bool,
    drive_low: bool,
}

impl Peer {
    fn new() -> Self {
        Self {
            present: true,
            requires_init: false,
            initialized: false,
            registers: [0xFF; 256],
            events: Vec::new(),
            stretch: 0,
            pointer: 0,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            expect_address: false,
            reading: false,
            pointer_set: false,
            master_acked: false,
            drive_low: false,
        }
    }

    /// Hold `buttons` (written active-low into bytes 4 and 5).
    pub fn press(&mut self, buttons: Buttons) {
        let raw = buttons.raw();
        self.registers[4] = !((raw >> 8) as u8);
        self.registers[5] = !(raw as u8);
    }

    /// Physically remove the controller; it forgets its init state.
    pub fn unplug(&mut self) {
        self.present = false;
        self.initialized = false;
    }

    pub fn plug(&mut self) {
        self.present = true;
    }

    fn start(&mut self) {
        self.events.push(BusEvent::Start);
        self.phase = Phase::Receive;
        self.shift = 0;
        self.bits = 0;
        self.expect_address = true;
        self.drive_low = false;
    }

    fn stop(&mut self) {
        self.events.push(BusEvent::Stop);
        self.phase = Phase::Idle;
        self.drive_low = false;
    }

    fn clock_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Receive => {
                self.shift = (self.shift << 1) | u8::from(sda);
                self.bits += 1;
            }
            Phase::AckIn => self.master_acked = !sda,
            _ => {}
        }
    }

    fn clock_fall(&mut self) {
        match self.phase {
            Phase::Receive if self.bits == 8 => {
                let byte = self.shift;
                self.shift = 0;
                self.bits = 0;
                self.byte_received(byte);
            }
            Phase::AckOut => {
                self.drive_low = false;
                if self.reading {
                    self.load_next();
                } else {
                    self.phase = Phase::Receive;
                }
            }
            Phase::Transmit => {
                self.bits += 1;
                if self.bits == 8 {
                    self.drive_low = false;
                    self.phase = Phase::AckIn;
                } else {
                    self.drive_low = (self.shift >> (7 - self.bits)) & 1 == 0;
                }
            }
            Phase::AckIn => {
                if self.master_acked {
                    self.load_next();
                } else {
                    self.phase = Phase::Idle;
                }
            }
            _ => {}
        }
    }

    fn byte_received(&mut self, byte: u8) {
        if self.expect_address {
            self.expect_address = false;
            if self.present && byte >> 1 == ADDRESS {
                self.events.push(BusEvent::Address(byte));
                self.reading = byte & 1 == 1;
                self.pointer_set = false;
                self.drive_low = true;
                self.phase = Phase::AckOut;
            } else {
                self.phase = Phase::Idle;
            }
            return;
        }

        self.events.push(BusEvent::Written(byte));
        if self.pointer_set {
            if self.pointer == INIT_REGISTER && byte == INIT_VALUE {
                self.initialized = true;
            }
            self.registers[usize::from(self.pointer)] = byte;
            self.pointer = self.pointer.wrapping_add(1);
        } else {
            self.pointer = byte;
            self.pointer_set = true;
        }
        self.drive_low = true;
        self.phase = Phase::AckOut;
    }

    fn load_next(&mut self) {
        self.shift = if self.requires_init && !self.initialized {
            0x00
        } else {
            self.registers[usize::from(self.pointer)]
        };
        self.events.push(BusEvent::Sent(self.shift));
        self.pointer = self.pointer.wrapping_add(1);
        self.bits = 0;
        self.drive_low = self.shift & 0x80 == 0;
        self.phase = Phase::Transmit;
    }
}

struct Wire {
    scl_low: bool,
    sda_low: bool,
    stretch_left: usize,
    peer: Peer,
}

impl Wire {
    fn scl(&self) -> bool {
        !self.scl_low
    }

    fn sda(&self) -> bool {
        !(self.sda_low || self.peer.drive_low)
    }

    fn drive(&mut self, line: Line, low: bool) {
        let (scl_before, sda_before) = (self.scl(), self.sda());
        match line {
            Line::Clock => self.scl_low = low,
            Line::Data => self.sda_low = low,
        }
        let (scl_after, sda_after) = (self.scl(), self.sda());

        if scl_before && scl_after && sda_before != sda_after {
            if sda_after {
                self.peer.stop();
            } else {
                self.peer.start();
            }
        } else if !scl_before && scl_after {
            self.stretch_left = self.peer.stretch;
            self.peer.clock_rise(sda_after);
        } else if scl_before && !scl_after {
            self.peer.clock_fall();
        }
    }
}

/// Controller-side handle on the simulated bus.
#[derive(Clone)]
pub struct SimLines(Rc<RefCell<Wire>>);

impl SimLines {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Wire {
            scl_low: false,
            sda_low: false,
            stretch_left: 0,
            peer: Peer::new(),
        })))
    }

    /// Inspect or reconfigure the peer.
    pub fn peer<R>(&self, f: impl FnOnce(&mut Peer) -> R) -> R {
        f(&mut self.0.borrow_mut().peer)
    }

    /// Take the events recorded so far.
    pub fn take_events(&self) -> Vec<BusEvent> {
        core::mem::take(&mut self.0.borrow_mut().peer.events)
    }

    /// Both lines released and high.
    pub fn is_idle(&self) -> bool {
        let wire = self.0.borrow();
        wire.scl() && wire.sda()
    }
}

impl LineDriver for SimLines {
    fn release(&mut self, line: Line) {
        self.0.borrow_mut().drive(line, false);
    }

    fn pull_low(&mut self, line: Line) {
        self.0.borrow_mut().drive(line, true);
    }

    fn is_high(&mut self, line: Line) -> bool {
        let mut wire = self.0.borrow_mut();
        match line {
            Line::Clock => {
                if wire.stretch_left > 0 {
                    wire.stretch_left -= 1;
                    return false;
                }
                wire.scl()
            }
            Line::Data => wire.sda(),
        }
    }
}

/// Async delay that only adds up the time it was asked to wait.
#[derive(Clone, Default)]
pub struct CountingDelay {
    pub total_ns: Rc<Cell<u64>>,
    pub calls: Rc<Cell<usize>>,
}

impl embedded_hal_async::delay::DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
        self.calls.set(self.calls.get() + 1);
    }
}
