//! Low-level register write primitives.
//!
//! Implements the single-register and bulk-PWM transfers shared by the
//! initialisation sequence and the buffer flush paths, including the
//! persistence (bounded retry) policy for the unreliable bus.
//!
//! This module is crate-private — consumers interact with [`Sled1734x`]
//! in `matrix.rs` instead.
//!
//! [`Sled1734x`]: crate::Sled1734x

use embedded_hal::i2c::I2c;

use crate::registers::{PWM_CHUNK_SIZE, PWM_FIRST, PWM_REGISTER_COUNT};

/// Low-level register writer.
///
/// Owns the I2C peripheral shared by every chip on the bus; the target chip
/// is selected per call by its 7-bit address. Transfer failures never
/// propagate past this layer: each write is attempted up to the configured
/// persistence count and then dropped, leaving only the failure counter as
/// a trace. A dropped write leaves stale (not corrupted) chip state that
/// self-corrects on the next full flush of the owning buffer.
pub(crate) struct RegisterWriter<I2C> {
    i2c: I2C,
    persistence: u8,
    failed_transfers: u32,
}

impl<I2C> RegisterWriter<I2C>
where
    I2C: I2c,
{
    /// Create a new register writer.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `persistence` — retry budget per write; `0` means a single attempt
    pub fn new(i2c: I2C, persistence: u8) -> Self {
        Self {
            i2c,
            persistence,
            failed_transfers: 0,
        }
    }

    /// Write a single `[register, value]` pair to the chip at `address`.
    pub fn write_register(&mut self, address: u8, register: u8, value: u8) {
        self.transmit(address, &[register, value]);
    }

    /// Write a full 144-byte PWM page to the chip at `address`.
    ///
    /// The page is split into 9 chunks of [`PWM_CHUNK_SIZE`] data bytes, one
    /// transfer per chunk, chunk `k` addressed at `0x24 + 16k`. Chunking
    /// exists because the bus transfer has a practical payload ceiling; the
    /// chunk size matches the chip's addressing stride.
    pub fn write_pwm_window(&mut self, address: u8, pwm: &[u8; PWM_REGISTER_COUNT]) {
        for (chunk_index, chunk) in pwm.chunks_exact(PWM_CHUNK_SIZE).enumerate() {
            let mut payload = [0u8; PWM_CHUNK_SIZE + 1];
            payload[0] = PWM_FIRST + (chunk_index * PWM_CHUNK_SIZE) as u8;
            payload[1..].copy_from_slice(chunk);
            self.transmit(address, &payload);
        }
    }

    /// Number of writes whose final attempt failed since construction.
    pub fn failed_transfers(&self) -> u32 {
        self.failed_transfers
    }

    /// Release the underlying I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Best-effort delivery: up to `max(persistence, 1)` attempts, stopping
    /// at the first success. Intermediate failures are discarded without
    /// backoff — the retry is a bus reliability workaround, not a rate
    /// limiter.
    fn transmit(&mut self, address: u8, payload: &[u8]) {
        let attempts = self.persistence.max(1);
        for _ in 0..attempts {
            if self.i2c.write(address, payload).is_ok() {
                return;
            }
        }
        self.failed_transfers = self.failed_transfers.saturating_add(1);
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "write to {=u8:#x} dropped after {=u8} attempts",
            address,
            attempts
        );
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
