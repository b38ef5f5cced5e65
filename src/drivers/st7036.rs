// ST7036 character LCD driver (board-independent)
// SPI write-only, EXT pin tied low, 3-line x 16-column glass.
//
// The controller has four instruction tables. Some commands are only
// decoded while a particular table is selected, so the driver keeps a
// shadow of the last function-set and switches tables on demand before
// sending those commands. Every command is followed by a blocking settle
// wait; data bytes are paced instead.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use log::{debug, info, warn};

use super::settle::SettleTimer;
use crate::error::{Argument, Error, Result};

/// SPI clock the controller is rated for on this board.
pub const SPI_FREQ_HZ: u32 = 1_000_000;

pub const COLUMNS: u8 = 16;
pub const LINES: u8 = 3;
/// DDRAM distance between the start of consecutive lines in 3-line mode.
const LINE_STRIDE: u8 = 0x10;

/// Settle after an ordinary command (26.3 us).
pub const SETTLE_NS: u32 = 26_300;
/// Settle after clear/home (1.08 ms).
pub const CLEAR_SETTLE_NS: u32 = 1_080_000;
/// Gap between consecutive data bytes.
pub const CHAR_PACING_NS: u32 = 50_000;

pub const MAX_INSTRUCTION_SET: u8 = 3;
pub const MAX_CONTRAST: u8 = 0x3F;
const DEFAULT_CONTRAST: u8 = 40;

mod cmd {
    pub const CLEAR: u8 = 0b0000_0001;
    pub const HOME: u8 = 0b0000_0010;
    pub const ENTRY_MODE: u8 = 0b0000_0100;
    pub const DISPLAY_MODE: u8 = 0b0000_1000;
    pub const SHIFT: u8 = 0b0001_0000; // table 0
    pub const DOUBLE_HEIGHT: u8 = 0b0001_0000; // table 2
    pub const BIAS: u8 = 0b0001_0100; // table 1
    pub const FUNCTION_SET: u8 = 0b0010_0000;
    pub const CONTRAST_HIGH: u8 = 0b0101_0100; // table 1, C5..C4
    pub const FOLLOWER: u8 = 0b0110_1011; // table 1
    pub const CONTRAST_LOW: u8 = 0b0111_0000; // table 1, C3..C0
    pub const SET_DDRAM: u8 = 0b1000_0000;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusWidth {
    Four,
    #[default]
    Eight,
}

/// Shadow of the controller's display configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdConfig {
    pub bus_width: BusWidth,
    pub multi_line: bool,
    pub double_height: bool,
    pub instruction_set: u8,
    pub contrast: u8,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            bus_width: BusWidth::Eight,
            multi_line: true,
            double_height: false,
            instruction_set: 0,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

// instruction table a command is decoded in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Table {
    Any,
    Is(u8),
}

fn function_set_byte(bus_width: BusWidth, multi_line: bool, double_height: bool, is: u8) -> u8 {
    cmd::FUNCTION_SET
        | if bus_width == BusWidth::Eight { 0b0001_0000 } else { 0 }
        | if multi_line { 0b0000_1000 } else { 0 }
        | if double_height { 0b0000_0100 } else { 0 }
        | is
}

fn ddram_address(column: u8, line: u8) -> u8 {
    line * LINE_STRIDE + column
}

pub struct LcdController<SPI, RS, T> {
    spi: SPI,
    rs: RS,
    timer: T,
    config: LcdConfig,
}

impl<SPI, RS, T> LcdController<SPI, RS, T>
where
    SPI: SpiDevice,
    RS: OutputPin,
    T: SettleTimer,
{
    /// Take the register-select line and SPI device, then run the
    /// power-on sequence: 8-bit/2-line/table 0, display on, increment,
    /// 3-line bias, contrast 40, clear.
    pub fn new(spi: SPI, mut rs: RS, timer: T) -> Result<Self> {
        rs.set_high().map_err(Error::pin)?;

        let mut lcd = Self {
            spi,
            rs,
            timer,
            config: LcdConfig::default(),
        };

        lcd.function_set(BusWidth::Eight, true, false, 0)?;
        lcd.display_mode(true, false, false)?;
        lcd.entry_mode(true, false)?;
        lcd.set_bias(true, true)?;
        lcd.set_contrast(DEFAULT_CONTRAST)?;
        lcd.clear()?;

        info!("st7036: initialised, contrast {}", DEFAULT_CONTRAST);
        Ok(lcd)
    }

    /// Clear DDRAM and home the cursor.
    pub fn clear(&mut self) -> Result<()> {
        self.command(Table::Any, cmd::CLEAR, CLEAR_SETTLE_NS)
    }

    pub fn home(&mut self) -> Result<()> {
        self.command(Table::Any, cmd::HOME, CLEAR_SETTLE_NS)
    }

    /// `increment` is the I/D bit (left-to-right when set), `shift` the S
    /// bit (shift the whole display on write).
    pub fn entry_mode(&mut self, increment: bool, shift: bool) -> Result<()> {
        let byte = cmd::ENTRY_MODE
            | if increment { 0b0000_0010 } else { 0 }
            | if shift { 0b0000_0001 } else { 0 };
        self.command(Table::Any, byte, SETTLE_NS)
    }

    pub fn display_mode(&mut self, on: bool, cursor: bool, blink: bool) -> Result<()> {
        let byte = cmd::DISPLAY_MODE
            | if on { 0b0000_0100 } else { 0 }
            | if cursor { 0b0000_0010 } else { 0 }
            | if blink { 0b0000_0001 } else { 0 };
        self.command(Table::Any, byte, SETTLE_NS)
    }

    /// DL, N, DH and IS2..IS1 in one byte. The shadow is only updated
    /// once the command has gone out.
    pub fn function_set(
        &mut self,
        bus_width: BusWidth,
        multi_line: bool,
        double_height: bool,
        instruction_set: u8,
    ) -> Result<()> {
        if instruction_set > MAX_INSTRUCTION_SET {
            return Err(Error::InvalidArgument(Argument::InstructionSet(
                instruction_set,
            )));
        }

        let byte = function_set_byte(bus_width, multi_line, double_height, instruction_set);
        self.send_command(byte, SETTLE_NS)?;

        self.config.bus_width = bus_width;
        self.config.multi_line = multi_line;
        self.config.double_height = double_height;
        self.config.instruction_set = instruction_set;
        Ok(())
    }

    /// `three_line` is the FX bit; it must be set for 3-line glass.
    pub fn set_bias(&mut self, bias: bool, three_line: bool) -> Result<()> {
        let byte = cmd::BIAS
            | if bias { 0b0000_1000 } else { 0 }
            | if three_line { 0b0000_0001 } else { 0 };
        self.command(Table::Is(1), byte, SETTLE_NS)
    }

    /// 6-bit contrast split over two commands, with the follower control
    /// fixed in between.
    pub fn set_contrast(&mut self, level: u8) -> Result<()> {
        if level > MAX_CONTRAST {
            return Err(Error::InvalidArgument(Argument::Contrast(level)));
        }

        self.command(Table::Is(1), cmd::CONTRAST_HIGH | ((level >> 4) & 0x03), SETTLE_NS)?;
        self.command(Table::Is(1), cmd::FOLLOWER, SETTLE_NS)?;
        self.command(Table::Is(1), cmd::CONTRAST_LOW | (level & 0x0F), SETTLE_NS)?;

        self.config.contrast = level;
        Ok(())
    }

    /// Shift the cursor (or the whole display) one position.
    pub fn shift(&mut self, display: bool, right: bool) -> Result<()> {
        let byte = cmd::SHIFT
            | if display { 0b0000_1000 } else { 0 }
            | if right { 0b0000_0100 } else { 0 };
        self.command(Table::Is(0), byte, SETTLE_NS)
    }

    /// Which pair of lines the double-height row occupies.
    pub fn double_height_position(&mut self, top: bool) -> Result<()> {
        let byte = cmd::DOUBLE_HEIGHT | if top { 0b0000_1000 } else { 0 };
        self.command(Table::Is(2), byte, SETTLE_NS)
    }

    pub fn set_cursor_position(&mut self, column: u8, line: u8) -> Result<()> {
        if column >= COLUMNS {
            return Err(Error::InvalidArgument(Argument::Column(column)));
        }
        if line >= LINES {
            return Err(Error::InvalidArgument(Argument::Line(line)));
        }
        self.command(Table::Any, cmd::SET_DDRAM | ddram_address(column, line), SETTLE_NS)
    }

    /// Write text at the cursor, one byte per character. Latin-1 code
    /// points go out unchanged; anything wider becomes `?`. No wrapping
    /// is done here, the controller decides what happens at line end.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.rs.set_high().map_err(Error::pin)?;
        for ch in text.chars() {
            self.send_data(u8::try_from(ch).unwrap_or(b'?'))?;
        }
        Ok(())
    }

    /// Write raw character codes (CGROM/CGRAM indices).
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.rs.set_high().map_err(Error::pin)?;
        for &b in bytes {
            self.send_data(b)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    pub fn release(self) -> (SPI, RS, T) {
        (self.spi, self.rs, self.timer)
    }

    // ── Low-level SPI / timing ──────────────────────────────

    fn command(&mut self, table: Table, byte: u8, settle_ns: u32) -> Result<()> {
        if let Table::Is(set) = table {
            self.select_table(set)?;
        }
        self.send_command(byte, settle_ns)
    }

    fn select_table(&mut self, set: u8) -> Result<()> {
        if self.config.instruction_set == set {
            return Ok(());
        }
        debug!(
            "st7036: instruction set {} -> {}",
            self.config.instruction_set, set
        );
        let LcdConfig {
            bus_width,
            multi_line,
            double_height,
            ..
        } = self.config;
        self.function_set(bus_width, multi_line, double_height, set)
    }

    fn send_command(&mut self, byte: u8, settle_ns: u32) -> Result<()> {
        self.rs.set_low().map_err(Error::pin)?;
        self.spi.write(&[byte]).map_err(Error::spi)?;
        if self.timer.settle_ns(settle_ns).is_err() {
            warn!("st7036: settle after 0x{:02x} interrupted", byte);
        }
        Ok(())
    }

    // caller has already raised RS
    fn send_data(&mut self, byte: u8) -> Result<()> {
        self.spi.write(&[byte]).map_err(Error::spi)?;
        if self.timer.settle_ns(CHAR_PACING_NS).is_err() {
            warn!("st7036: character pacing interrupted");
        }
        Ok(())
    }
}
