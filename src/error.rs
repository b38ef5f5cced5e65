// Error taxonomy shared by the chip drivers.
// Transport failures keep only the portable embedded-hal error kind so
// the drivers can mix buses and pins without nesting generic errors.
use core::fmt;

use embedded_hal::{digital, i2c, spi};

/// An argument the caller supplied that is outside the device's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Channel(usize),
    Group(usize),
    InstructionSet(u8),
    Contrast(u8),
    Column(u8),
    Line(u8),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Channel(c) => write!(f, "LED channel {}", c),
            Argument::Group(g) => write!(f, "RGB group {}", g),
            Argument::InstructionSet(is) => write!(f, "instruction set {}", is),
            Argument::Contrast(c) => write!(f, "contrast {}", c),
            Argument::Column(c) => write!(f, "column {}", c),
            Argument::Line(l) => write!(f, "line {}", l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Rejected locally; nothing was sent to the device
    InvalidArgument(Argument),
    I2c(i2c::ErrorKind),
    Spi(spi::ErrorKind),
    Pin(digital::ErrorKind),
}

impl Error {
    pub(crate) fn i2c<E: i2c::Error>(e: E) -> Self {
        Error::I2c(e.kind())
    }

    pub(crate) fn spi<E: spi::Error>(e: E) -> Self {
        Error::Spi(e.kind())
    }

    pub(crate) fn pin<E: digital::Error>(e: E) -> Self {
        Error::Pin(e.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(arg) => write!(f, "invalid argument: {}", arg),
            Error::I2c(kind) => write!(f, "i2c transfer failed: {}", kind),
            Error::Spi(kind) => write!(f, "spi transfer failed: {}", kind),
            Error::Pin(kind) => write!(f, "gpio write failed: {}", kind),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
