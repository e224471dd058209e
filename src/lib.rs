//! Blocking I2C driver for the SLED1734x per-key RGB LED matrix controller.
//!
//! This crate stages LED state in memory and synchronises it to up to
//! `DRIVERS` independently addressed chips over any [`embedded-hal`] I2C
//! bus, flushing only the pages that changed since the last update.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — Low-level register write primitives
//!   that handle payload framing, bulk PWM chunking, and the bounded-retry
//!   persistence policy.
//! - **[`Sled1734x`]** (public) — Validated, high-level API that runs the
//!   power-on sequence, stages colors and enable bits per chip, and flushes
//!   dirty pages on demand.
//!
//! The mapping from logical LED index to chip and channel registers is
//! board-specific and supplied by the caller as a slice of [`Led`] entries.
//!
//! # Quick start
//!
//! ```no_run
//! use sled1734x::{Config, Led, Sled1734x, DEFAULT_ADDRESS};
//!
//! static LEDS: [Led; 2] = [
//!     Led { driver: 0, r: 0x24, g: 0x25, b: 0x26 },
//!     Led { driver: 0, r: 0x27, g: 0x28, b: 0x29 },
//! ];
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c, delay: impl embedded_hal::delay::DelayNs) {
//! // Construct with any `embedded-hal` I2C implementation.
//! let mut matrix = Sled1734x::new(i2c, delay, [DEFAULT_ADDRESS], &LEDS, Config::default());
//! matrix.init();
//!
//! // Enable and light both LEDs, then push the changes to the chip.
//! matrix.set_led_control(0, true, true, true);
//! matrix.set_led_control(1, true, true, true);
//! matrix.set_color_all(255, 64, 0);
//! matrix.update(0);
//! # }
//! ```
//!
//! # Error policy
//!
//! Transfers are best-effort: a write that still fails after its
//! persistence budget is dropped silently, leaving stale (not corrupted)
//! chip state that the next flush of the same page corrects. The only
//! visibility is the [`Sled1734x::failed_transfers()`] counter.
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and a warning log on dropped writes.
//!
//! [`embedded-hal`]: embedded_hal

#![cfg_attr(not(test), no_std)]

pub use layout::Led;
pub use matrix::{Config, Sled1734x};
pub use registers::DEFAULT_ADDRESS;

mod control;
mod driver;
mod layout;
mod matrix;
mod pwm;
mod registers;
