// SN3218 18-channel LED driver (board-independent)
//
// The chip's register file is mirrored in a shadow record. set/set_rgb
// only stage changes; flush() serialises the whole shadow in one I2C write
// starting at the first PWM register. Register 0 (shutdown) is written
// once at construction and never again.

use embedded_hal::i2c::I2c;
use log::{debug, info};

use crate::error::{Argument, Error, Result};

/// 7-bit I2C address; the AD pin is hard-wired on this board.
pub const ADDRESS: u8 = 0x54;

pub const LEDS: usize = 18;
pub const ENABLES: usize = 3;
pub const GO: usize = 1;
/// Shadow size on the wire: levels, enables, go.
pub const SHADOW_LEN: usize = LEDS + ENABLES + GO;

/// Channels covered by one enable byte.
const CHANNELS_PER_ENABLE: usize = 6;
const ALL_ENABLED: u8 = 0x3F;
/// Written to the update register to latch staged PWM/enable values.
const GO_VALUE: u8 = 0x42;
const WAKE: u8 = 0x01;

#[allow(dead_code)]
mod reg {
    pub const SHUTDOWN: u8 = 0x00;
    pub const PWM_BASE: u8 = 0x01;
    pub const ENABLE_BASE: u8 = 0x13;
    pub const UPDATE: u8 = 0x16;
}

/// In-memory mirror of registers 0x01..=0x16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedShadow {
    pub levels: [u8; LEDS],
    pub enables: [u8; ENABLES],
    pub go: u8,
}

impl Default for LedShadow {
    fn default() -> Self {
        Self {
            levels: [0; LEDS],
            enables: [ALL_ENABLED; ENABLES],
            go: GO_VALUE,
        }
    }
}

impl LedShadow {
    /// Wire layout for a write at `reg::PWM_BASE`.
    pub fn to_wire(&self) -> [u8; SHADOW_LEN] {
        let mut out = [0u8; SHADOW_LEN];
        out[..LEDS].copy_from_slice(&self.levels);
        out[LEDS..LEDS + ENABLES].copy_from_slice(&self.enables);
        out[LEDS + ENABLES] = self.go;
        out
    }
}

pub struct LedController<I2C> {
    i2c: I2C,
    shadow: LedShadow,
}

impl<I2C: I2c> LedController<I2C> {
    /// Wake the chip and latch all channels enabled at level 0.
    pub fn new(i2c: I2C) -> Result<Self> {
        let mut led = Self {
            i2c,
            shadow: LedShadow::default(),
        };

        let mut frame = [0u8; 2 + SHADOW_LEN];
        frame[0] = reg::SHUTDOWN;
        frame[1] = WAKE;
        frame[2..].copy_from_slice(&led.shadow.to_wire());
        led.i2c.write(ADDRESS, &frame).map_err(Error::i2c)?;

        info!("sn3218: awake at 0x{:02x}, {} channels enabled", ADDRESS, LEDS);
        Ok(led)
    }

    pub fn set(&mut self, channel: usize, value: u8) -> Result<()> {
        if channel >= LEDS {
            return Err(Error::InvalidArgument(Argument::Channel(channel)));
        }
        self.shadow.levels[channel] = value;
        Ok(())
    }

    /// Stage one RGB triple; group `g` drives channels 3g..3g+3. Which
    /// physical LED that is depends on board wiring.
    pub fn set_rgb(&mut self, group: usize, r: u8, g: u8, b: u8) -> Result<()> {
        if group >= LEDS / 3 {
            return Err(Error::InvalidArgument(Argument::Group(group)));
        }
        let base = group * 3;
        self.shadow.levels[base..base + 3].copy_from_slice(&[r, g, b]);
        Ok(())
    }

    pub fn set_enabled(&mut self, channel: usize, on: bool) -> Result<()> {
        if channel >= LEDS {
            return Err(Error::InvalidArgument(Argument::Channel(channel)));
        }
        let byte = &mut self.shadow.enables[channel / CHANNELS_PER_ENABLE];
        let bit = 1u8 << (channel % CHANNELS_PER_ENABLE);
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        Ok(())
    }

    /// Send the whole shadow, including the go byte that latches it.
    pub fn flush(&mut self) -> Result<()> {
        let mut frame = [0u8; 1 + SHADOW_LEN];
        frame[0] = reg::PWM_BASE;
        frame[1..].copy_from_slice(&self.shadow.to_wire());
        debug!("sn3218: flush {} bytes", SHADOW_LEN);
        self.i2c.write(ADDRESS, &frame).map_err(Error::i2c)
    }

    pub fn levels(&self) -> &[u8; LEDS] {
        &self.shadow.levels
    }

    pub fn enables(&self) -> &[u8; ENABLES] {
        &self.shadow.enables
    }

    pub fn shadow(&self) -> &LedShadow {
        &self.shadow
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
