//! Header | BCM GPIO | Function        | Notes
//! -------+----------+-----------------+------------------------------
//!   3    |  2 (0)   | I2C SDA         | bus 1 (bus 0 on rev 1 boards)
//!   5    |  3 (1)   | I2C SCL         | bus 1 (bus 0 on rev 1 boards)
//!  19    | 10       | SPI0 MOSI       | LCD serial data in
//!  23    | 11       | SPI0 SCLK       | LCD clock
//!  24    |  8       | SPI0 CE0        | LCD chip select
//!  22    | 25       | LCD RS          | register select, wiringPi 6

// ----- LCD (ST7036) -----
pub const LCD_RS: u8 = 25;
pub const LCD_RS_WIRINGPI: u8 = 6;
pub const LCD_SPI_CHIP_SELECT: u8 = 0;
pub const LCD_SPI_FREQ_HZ: u32 = crate::drivers::st7036::SPI_FREQ_HZ;

// ----- LED driver (SN3218) -----
pub const LED_I2C_ADDRESS: u8 = crate::drivers::sn3218::ADDRESS;
