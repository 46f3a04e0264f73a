//! Game polling task
//!
//! Single task driving the whole game: one fixed-cadence loop that
//! samples the tap sensor, advances the core state machine, and pushes
//! changed frames to the display.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};
use embedded_hal_bus::i2c::RefCellDevice;

use tactus_core::game::Game;
use tactus_core::pattern::CATALOG;
use tactus_core::timing::POLL_MS;
use tactus_core::traits::{BeatDisplay, TapSensor};
use tactus_drivers::adxl345::Adxl345;
use tactus_drivers::ssd1306::Ssd1306;

type Bus = RefCellDevice<'static, I2c<'static, I2C0, Blocking>>;

/// Game task - polls the sensor and renders frames forever.
#[embassy_executor::task]
pub async fn game_task(sensor: Adxl345<Bus>, display: Ssd1306<Bus>) -> ! {
    info!("Game task started, {} patterns loaded", CATALOG.len());
    run(sensor, display).await
}

/// Drive the game at the fixed polling cadence.
///
/// The sensor latch is consumed on every tick, including ticks where
/// the game is not accepting input. Taps that land between judgement
/// windows are therefore discarded instead of piling up in the sensor.
async fn run<S: TapSensor, D: BeatDisplay>(mut sensor: S, mut display: D) -> ! {
    let (mut game, splash) = Game::new(CATALOG);
    if display.show(&splash.primary, &splash.secondary).is_err() {
        warn!("Display write failed");
    }

    let mut ticker = Ticker::every(Duration::from_millis(POLL_MS));
    loop {
        ticker.next().await;

        let now = Instant::now().as_millis();
        let tapped = sensor.poll_tap().unwrap_or(false);

        if let Some(frame) = game.tick(now, tapped) {
            trace!("screen: {} | {}", frame.primary.as_str(), frame.secondary.as_str());
            if display.show(&frame.primary, &frame.secondary).is_err() {
                warn!("Display write failed");
            }
        }
    }
}
