//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C, optimized for
//! the game's two text fields: a 2x-scaled centered line (12x16 glyphs)
//! and a normal 6x8 status line at the bottom.

use embedded_hal::i2c::I2c;

use tactus_core::traits::BeatDisplay;

use crate::font::glyph;

/// SSD1306 I2C address (typically 0x3C, sometimes 0x3D).
pub const DEFAULT_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Text grid: 21 columns of 6x8, 10 columns of 12x16.
const COLS: usize = WIDTH / 6;
const COLS_2X: usize = WIDTH / 12;

/// Pages used by the two fields.
const PRIMARY_PAGE: u8 = 2;
const SECONDARY_PAGE: u8 = 7;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    addr: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver at the default address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    /// Create a driver at an explicit address.
    pub fn with_address(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display.
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_FROM_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.clear();
        self.flush()
    }

    /// Send a command to the display.
    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[0x00, cmd])
    }

    /// Clear the frame buffer.
    pub fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Draw text at the specified position (row 0-7, col 0-20).
    pub fn draw_text(&mut self, row: u8, col: u8, text: &str) {
        if row >= PAGES as u8 {
            return;
        }

        let page = &mut self.buffer[row as usize];
        let mut x = (col as usize) * 6;

        for ch in text.chars() {
            if x + 6 > WIDTH {
                break;
            }
            page[x..x + 6].copy_from_slice(glyph(ch));
            x += 6;
        }
    }

    /// Draw 2x-scaled text spanning rows `row` and `row + 1`
    /// (col 0-9, 12x16 pixels per glyph).
    pub fn draw_text_2x(&mut self, row: u8, col: u8, text: &str) {
        if row + 1 >= PAGES as u8 {
            return;
        }

        let mut x = (col as usize) * 12;
        for ch in text.chars() {
            if x + 12 > WIDTH {
                break;
            }
            for (i, &column) in glyph(ch).iter().enumerate() {
                let doubled = double_bits(column);
                let top = (doubled & 0xFF) as u8;
                let bottom = (doubled >> 8) as u8;
                // Each source column becomes two identical columns
                for dx in 0..2 {
                    self.buffer[row as usize][x + 2 * i + dx] = top;
                    self.buffer[row as usize + 1][x + 2 * i + dx] = bottom;
                }
            }
            x += 12;
        }
    }

    /// Flush the frame buffer to the display.
    pub fn flush(&mut self) -> Result<(), I2C::Error> {
        // Horizontal addressing: one window covering the whole screen,
        // the data pointer auto-advances across page writes
        self.command(cmd::SET_COLUMN_ADDR)?;
        self.command(0)?;
        self.command((WIDTH - 1) as u8)?;
        self.command(cmd::SET_PAGE_ADDR)?;
        self.command(0)?;
        self.command((PAGES - 1) as u8)?;

        for page in 0..PAGES {
            let mut data = [0u8; WIDTH + 1];
            data[0] = 0x40; // Data mode
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.addr, &data)?;
        }

        Ok(())
    }

    /// Set display contrast (0-255).
    #[allow(dead_code)]
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }
}

impl<I2C: I2c> BeatDisplay for Ssd1306<I2C> {
    type Error = I2C::Error;

    fn show(&mut self, primary: &str, secondary: &str) -> Result<(), Self::Error> {
        self.clear();
        self.draw_text_2x(PRIMARY_PAGE, centered(primary, COLS_2X), primary);
        self.draw_text(SECONDARY_PAGE, centered(secondary, COLS), secondary);
        self.flush()
    }
}

/// Starting column that centers `text` on a grid of `cols` columns.
fn centered(text: &str, cols: usize) -> u8 {
    let len = text.chars().count().min(cols);
    ((cols - len) / 2) as u8
}

/// Double each bit of a column: bit i becomes bits 2i and 2i+1.
fn double_bits(column: u8) -> u16 {
    let mut out = 0u16;
    for i in 0..8 {
        if column & (1 << i) != 0 {
            out |= 0b11 << (2 * i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, Operation};

    #[derive(Debug, PartialEq, Eq)]
    enum MockError {}

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> embedded_hal::i2c::ErrorKind {
            match *self {}
        }
    }

    /// Write-only mock: the driver never reads from the panel.
    struct MockI2c;

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_double_bits() {
        assert_eq!(double_bits(0x00), 0x0000);
        assert_eq!(double_bits(0xFF), 0xFFFF);
        assert_eq!(double_bits(0x0F), 0x00FF);
        assert_eq!(double_bits(0xF0), 0xFF00);
        assert_eq!(double_bits(0b0000_0001), 0b0000_0011);
    }

    #[test]
    fn test_centering() {
        assert_eq!(centered("DRUM", COLS_2X), 3);
        assert_eq!(centered("Tap to start", COLS), 4);
        assert_eq!(centered("", COLS), 10);
        // Overlong text pins to column 0
        assert_eq!(centered("an overlong status line", COLS), 0);
    }

    #[test]
    fn test_draw_text_places_glyphs() {
        let mut display = Ssd1306::new(MockI2c);
        display.draw_text(7, 2, "A");
        assert_eq!(&display.buffer[7][12..18], glyph('A'));
        // Neighbors untouched
        assert_eq!(display.buffer[7][11], 0);
        assert_eq!(display.buffer[7][18], 0);
    }

    #[test]
    fn test_draw_text_2x_doubles_columns() {
        let mut display = Ssd1306::new(MockI2c);
        display.draw_text_2x(2, 0, "!");
        // '!' column 2 is 0x5F; doubled low byte lands on the top page
        let doubled = double_bits(0x5F);
        assert_eq!(display.buffer[2][4], (doubled & 0xFF) as u8);
        assert_eq!(display.buffer[2][5], (doubled & 0xFF) as u8);
        assert_eq!(display.buffer[3][4], (doubled >> 8) as u8);
    }

    #[test]
    fn test_text_clips_at_right_edge() {
        let mut display = Ssd1306::new(MockI2c);
        // 25 chars on a 21-column grid: silently clipped
        display.draw_text(0, 0, "0123456789012345678901234");
        display.draw_text_2x(4, 8, "WIDE");
    }
}
