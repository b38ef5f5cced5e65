// Recording fakes for the embedded-hal traits the drivers consume.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dot3k::board::{BoardIdentity, BoardPlatform, I2cBusIndex};
use dot3k::drivers::{Interrupted, SettleTimer};
use embedded_hal::delay::DelayNs;
use embedded_hal::{digital, i2c, spi};

// ── SPI / RS / delay: one shared, ordered event log ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RsHigh,
    RsLow,
    Byte(u8),
    Delay(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn bytes(log: &Log) -> Vec<u8> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Byte(b) => Some(*b),
            _ => None,
        })
        .collect()
}

pub fn delays(log: &Log) -> Vec<u32> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Delay(ns) => Some(*ns),
            _ => None,
        })
        .collect()
}

pub struct MockSpi {
    pub log: Log,
    pub fail: Rc<RefCell<bool>>,
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl spi::SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [spi::Operation<'_, u8>]) -> Result<(), Self::Error> {
        if *self.fail.borrow() {
            return Err(spi::ErrorKind::Other);
        }
        for op in operations.iter() {
            if let spi::Operation::Write(data) = op {
                self.log
                    .borrow_mut()
                    .extend(data.iter().map(|&b| Event::Byte(b)));
            }
        }
        Ok(())
    }
}

pub struct MockPin {
    pub log: Log,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::RsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::RsHigh);
        Ok(())
    }
}

pub struct MockDelay {
    pub log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns));
    }
}

/// Settle timer whose waits are always cut short.
pub struct InterruptingTimer {
    pub log: Log,
}

impl SettleTimer for InterruptingTimer {
    fn settle_ns(&mut self, ns: u32) -> Result<(), Interrupted> {
        self.log.borrow_mut().push(Event::Delay(ns));
        Err(Interrupted)
    }
}

// ── I2C ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockI2c {
    /// (address, bytes) per write
    pub writes: Arc<Mutex<Vec<(u8, Vec<u8>)>>>,
    pub fail: Arc<AtomicBool>,
}

impl MockI2c {
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = i2c::ErrorKind;
}

impl i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address));
        }
        for op in operations.iter() {
            if let i2c::Operation::Write(data) = op {
                self.writes.lock().unwrap().push((address, data.to_vec()));
            }
        }
        Ok(())
    }
}

// ── Board platform ──────────────────────────────────────────────

pub struct MockPlatform {
    pub identity: Result<BoardIdentity, &'static str>,
    pub open_fails: bool,
    /// Widens the race window for concurrent resolve tests
    pub identify_delay: Duration,
    pub identify_calls: AtomicUsize,
    pub open_calls: AtomicUsize,
    pub opened: Mutex<Vec<I2cBusIndex>>,
    pub bus: MockI2c,
}

impl MockPlatform {
    pub fn new(identity: BoardIdentity) -> Self {
        Self {
            identity: Ok(identity),
            open_fails: false,
            identify_delay: Duration::ZERO,
            identify_calls: AtomicUsize::new(0),
            open_calls: AtomicUsize::new(0),
            opened: Mutex::new(Vec::new()),
            bus: MockI2c::default(),
        }
    }
}

impl BoardPlatform for MockPlatform {
    type Bus = MockI2c;
    type Error = &'static str;

    fn identify(&self) -> Result<BoardIdentity, Self::Error> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.identify_delay);
        self.identity
    }

    fn open_i2c(&self, bus: I2cBusIndex) -> Result<Self::Bus, Self::Error> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.open_fails {
            return Err("no such bus");
        }
        self.opened.lock().unwrap().push(bus);
        Ok(self.bus.clone())
    }
}
