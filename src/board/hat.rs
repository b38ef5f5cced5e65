// Displayotron-style add-on: SN3218 backlight LEDs on the header I2C bus
// plus an ST7036 3-line LCD on SPI0 CE0. The two chips are independent;
// this only sequences their bring-up.

use core::fmt;

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;
use embedded_hal_bus::i2c::CriticalSectionDevice;
use log::info;

use super::resolver::{BoardPlatform, BusResolver, ResolveError};
use crate::drivers::{LcdController, LedController, SettleTimer};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpError<E> {
    Resolve(ResolveError<E>),
    Device(Error),
}

impl<E> From<Error> for BringUpError<E> {
    fn from(e: Error) -> Self {
        BringUpError::Device(e)
    }
}

impl<E: fmt::Debug> fmt::Display for BringUpError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BringUpError::Resolve(e) => write!(f, "{}", e),
            BringUpError::Device(e) => write!(f, "{}", e),
        }
    }
}

pub struct Dot3k<'a, B, SPI, RS, T> {
    pub leds: LedController<CriticalSectionDevice<'a, B>>,
    pub lcd: LcdController<SPI, RS, T>,
}

impl<'a, B, SPI, RS, T> Dot3k<'a, B, SPI, RS, T>
where
    B: I2c,
    SPI: SpiDevice,
    RS: OutputPin,
    T: SettleTimer,
{
    /// Resolve the I2C bus, wake the LED driver, then initialise the LCD.
    pub fn bring_up<P>(
        resolver: &'a BusResolver<P>,
        spi: SPI,
        rs: RS,
        timer: T,
    ) -> Result<Self, BringUpError<P::Error>>
    where
        P: BoardPlatform<Bus = B>,
    {
        let board = resolver.resolve().map_err(BringUpError::Resolve)?;
        let leds = LedController::new(board.i2c())?;
        let lcd = LcdController::new(spi, rs, timer)?;

        info!("dot3k: up on {}", board.identity());
        Ok(Self { leds, lcd })
    }

    /// Set every RGB group to the same colour and commit it.
    pub fn backlight(&mut self, r: u8, g: u8, b: u8) -> Result<(), Error> {
        for group in 0..crate::drivers::sn3218::LEDS / 3 {
            self.leds.set_rgb(group, r, g, b)?;
        }
        self.leds.flush()
    }
}
