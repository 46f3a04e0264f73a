//! Board-agnostic game logic for the Tactus rhythm trainer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (tap sensor, display)
//! - Rhythm pattern catalog
//! - Tap-count pattern selection
//! - Beat scheduling and tap judgement
//! - Score accumulation and rating
//! - The top-level game cycle
//!
//! Everything temporal is expressed as tick-driven state machines that
//! take the current time and the latest tap sample as inputs, so the
//! whole crate runs (and is tested) on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod game;
pub mod pattern;
pub mod scheduler;
pub mod select;
pub mod tally;
pub mod timing;
pub mod traits;
