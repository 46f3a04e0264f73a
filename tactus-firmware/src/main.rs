//! Tactus - Rhythm Trainer Firmware
//!
//! Main firmware binary for RP2040-based rhythm trainer boards. An
//! ADXL345 accelerometer picks up finger taps and an SSD1306 OLED shows
//! beat prompts; the game logic itself lives in tactus-core and is
//! driven from a single polling task.
//!
//! Named after the Latin "tactus", the conductor's beat in mensural
//! music notation.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::I2C0;
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tactus_drivers::adxl345::{Adxl345, TapConfig};
use tactus_drivers::ssd1306::Ssd1306;

mod tasks;

/// I2C bus frequency. Both the ADXL345 and the SSD1306 are fast-mode
/// capable, and the full-screen flush is noticeably snappier at 400kHz.
const I2C_FREQUENCY: u32 = 400_000;

type Bus = I2c<'static, I2C0, embassy_rp::i2c::Blocking>;

// Both devices share one bus; the game task owns both device handles
static I2C_BUS: StaticCell<RefCell<Bus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tactus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY;

    // I2C0 on GP4 (SDA) / GP5 (SCL)
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let bus = I2C_BUS.init(RefCell::new(i2c));

    let mut display = Ssd1306::new(RefCellDevice::new(bus));
    match display.init() {
        Ok(()) => info!("Display initialized"),
        Err(_) => warn!("Display init failed, continuing without it"),
    }

    let mut sensor = Adxl345::new(RefCellDevice::new(bus));
    match sensor.init(&TapConfig::default()) {
        Ok(()) => info!("Tap sensor initialized"),
        Err(_) => warn!("Tap sensor init failed, taps will not register"),
    }

    spawner.spawn(tasks::game_task(sensor, display)).unwrap();
    info!("Game task started");
}
