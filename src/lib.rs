// Drivers for a Raspberry Pi add-on carrying an SN3218 LED driver (I2C)
// and an ST7036 character LCD (SPI), plus board detection for the I2C bus.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod drivers;
pub mod error;

pub use board::{BoardIdentity, BoardProfile, BusResolver, I2cBusIndex};
pub use drivers::{LcdController, LedController};
pub use error::{Argument, Error};
