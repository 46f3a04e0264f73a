//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tactus-core for the game hardware:
//!
//! - ADXL345 accelerometer (tap sensor, I2C)
//! - SSD1306 128x64 OLED (display, I2C)
//! - 6x8 ASCII font used by the display driver

#![no_std]
#![deny(unsafe_code)]

pub mod adxl345;
pub mod font;
pub mod ssd1306;
