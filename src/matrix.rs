//! High-level interface for the SLED1734x LED matrix controller.
//!
//! [`Sled1734x`] combines the register writer with the PWM and control
//! stagers, drives the power-on sequence, and flushes dirty pages to the
//! chips on demand.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::control::ControlPages;
use crate::driver::RegisterWriter;
use crate::layout::Led;
use crate::pwm::PwmPages;
use crate::registers::{
    BANK_FRAME_0, BANK_FUNCTION, BLINK_CONTROL_FIRST, BLINK_CONTROL_LAST, COMMAND_REGISTER,
    CONFIG_PICTURE_MODE, LED_CONTROL_FIRST, LED_CONTROL_LAST, PWM_FIRST, PWM_LAST,
    REG_AUDIO_SYNC, REG_CONFIG, REG_PICTURE_FRAME, REG_SHUTDOWN, SETTLE_DELAY_MS,
    SHUTDOWN_NORMAL, SHUTDOWN_SOFTWARE,
};

/// Driver configuration.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Retry budget per register write; `0` (the default) means a single
    /// attempt. Retries stop at the first success.
    pub persistence: u8,
}

/// Driver for up to `DRIVERS` SLED1734x chips sharing one I2C bus.
///
/// All color and enable mutations are staged in memory; nothing reaches the
/// bus until [`update()`](Self::update) flushes the dirty pages of one chip.
/// The caller invokes `update()` on its own cadence (typically once per main
/// loop iteration, once per chip).
///
/// Transfer failures are absorbed per the persistence policy and only
/// visible through [`failed_transfers()`](Self::failed_transfers) — a
/// dropped write leaves stale chip state that the next flush of the same
/// page overwrites.
///
/// # Lifecycle
///
/// 1. [`Sled1734x::new()`] — constructs the driver without any I2C traffic.
/// 2. [`Sled1734x::init()`] — runs the power-on sequence on every chip.
/// 3. Stage changes via [`set_color()`](Self::set_color) /
///    [`set_led_control()`](Self::set_led_control).
/// 4. [`Sled1734x::update()`] — flushes one chip's dirty pages.
///
/// # Example
///
/// ```no_run
/// use sled1734x::{Config, Led, Sled1734x, DEFAULT_ADDRESS};
///
/// // Board layout: logical LED 0 routed to chip 0, channels 0/1/2.
/// static LEDS: [Led; 1] = [Led { driver: 0, r: 0x24, g: 0x25, b: 0x26 }];
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c, delay: impl embedded_hal::delay::DelayNs) {
/// let mut matrix = Sled1734x::new(i2c, delay, [DEFAULT_ADDRESS], &LEDS, Config::default());
/// matrix.init();
/// matrix.set_led_control(0, true, true, true);
/// matrix.set_color(0, 255, 0, 128);
/// matrix.update(0);
/// # }
/// ```
pub struct Sled1734x<'a, I2C, D, const DRIVERS: usize> {
    writer: RegisterWriter<I2C>,
    delay: D,
    addresses: [u8; DRIVERS],
    leds: &'a [Led],
    pwm: PwmPages<DRIVERS>,
    control: ControlPages<DRIVERS>,
}

impl<'a, I2C, D, const DRIVERS: usize> Sled1734x<'a, I2C, D, DRIVERS>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Construct the driver. No I2C traffic is generated; call
    /// [`init()`](Self::init) before staging colors.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral shared by all chips (takes ownership)
    /// * `delay` — blocking delay provider, used only during `init()`
    /// * `addresses` — 7-bit chip address per driver index
    /// * `leds` — board routing table, indexed by logical LED number
    /// * `config` — persistence policy
    pub fn new(
        i2c: I2C,
        delay: D,
        addresses: [u8; DRIVERS],
        leds: &'a [Led],
        config: Config,
    ) -> Self {
        Self {
            writer: RegisterWriter::new(i2c, config.persistence),
            delay,
            addresses,
            leds,
            pwm: PwmPages::new(),
            control: ControlPages::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    /// Run the power-on sequence on every configured chip, in driver-index
    /// order. Fire-and-forget: there is no read-back to verify against.
    pub fn init(&mut self) {
        for driver in 0..DRIVERS {
            self.init_chip(self.addresses[driver]);
        }
    }

    /// Power-on sequence for one chip: shut down, settle, configure picture
    /// mode on frame 0, zero every control and PWM register, power back up,
    /// and leave the frame-0 bank selected for normal operation.
    fn init_chip(&mut self, address: u8) {
        self.writer
            .write_register(address, COMMAND_REGISTER, BANK_FUNCTION);
        self.writer
            .write_register(address, REG_SHUTDOWN, SHUTDOWN_SOFTWARE);

        // Oscillator settle time; earlier writes are undefined per datasheet.
        self.delay.delay_ms(SETTLE_DELAY_MS);

        self.writer
            .write_register(address, REG_CONFIG, CONFIG_PICTURE_MODE);
        self.writer.write_register(address, REG_PICTURE_FRAME, 0x00);
        self.writer.write_register(address, REG_AUDIO_SYNC, 0x00);

        for register in LED_CONTROL_FIRST..=LED_CONTROL_LAST {
            self.writer.write_register(address, register, 0x00);
        }
        for register in BLINK_CONTROL_FIRST..=BLINK_CONTROL_LAST {
            self.writer.write_register(address, register, 0x00);
        }
        for register in PWM_FIRST..=PWM_LAST {
            self.writer.write_register(address, register, 0x00);
        }

        self.writer
            .write_register(address, COMMAND_REGISTER, BANK_FUNCTION);
        self.writer
            .write_register(address, REG_SHUTDOWN, SHUTDOWN_NORMAL);
        self.writer
            .write_register(address, COMMAND_REGISTER, BANK_FRAME_0);
    }

    // -----------------------------------------------------------------------
    // Staging
    // -----------------------------------------------------------------------

    /// Stage one LED's color. An `index` outside the routing table is a
    /// silent no-op: nothing is mutated and no page becomes dirty.
    pub fn set_color(&mut self, index: usize, r: u8, g: u8, b: u8) {
        if let Some(led) = self.leds.get(index) {
            self.pwm.set_color(led, r, g, b);
        }
    }

    /// Stage the same color on every LED in the routing table.
    pub fn set_color_all(&mut self, r: u8, g: u8, b: u8) {
        for led in self.leds {
            self.pwm.set_color(led, r, g, b);
        }
    }

    /// Stage one LED's per-channel enable bits. An `index` outside the
    /// routing table is a silent no-op.
    pub fn set_led_control(&mut self, index: usize, r_on: bool, g_on: bool, b_on: bool) {
        if let Some(led) = self.leds.get(index) {
            self.control.set_enabled(led, r_on, g_on, b_on);
        }
    }

    // -----------------------------------------------------------------------
    // Flushing
    // -----------------------------------------------------------------------

    /// Flush both of one chip's pages if dirty. A `driver` index outside
    /// `0..DRIVERS` is a silent no-op.
    pub fn update(&mut self, driver: usize) {
        self.update_pwm_buffers(driver);
        self.update_led_control_registers(driver);
    }

    /// Flush one chip's PWM page if dirty: 9 bulk transfers of 16 registers
    /// each. The dirty flag is cleared whether or not the transfers
    /// succeeded.
    pub fn update_pwm_buffers(&mut self, driver: usize) {
        let Some(&address) = self.addresses.get(driver) else {
            return;
        };
        if self.pwm.dirty(driver) {
            if let Some(page) = self.pwm.page(driver) {
                self.writer.write_pwm_window(address, page);
            }
        }
        self.pwm.clear_dirty(driver);
    }

    /// Flush one chip's LED control page if dirty: 18 single-register writes
    /// to addresses `0x00..=0x11`. The dirty flag is cleared whether or not
    /// the transfers succeeded.
    pub fn update_led_control_registers(&mut self, driver: usize) {
        let Some(&address) = self.addresses.get(driver) else {
            return;
        };
        if self.control.dirty(driver) {
            if let Some(page) = self.control.page(driver) {
                for (register, &value) in page.iter().enumerate() {
                    self.writer.write_register(address, register as u8, value);
                }
            }
        }
        self.control.clear_dirty(driver);
    }

    // -----------------------------------------------------------------------
    // Diagnostics / teardown
    // -----------------------------------------------------------------------

    /// Number of writes dropped after exhausting their persistence budget
    /// since construction. Saturates at `u32::MAX`.
    pub fn failed_transfers(&self) -> u32 {
        self.writer.failed_transfers()
    }

    /// Release the underlying I2C peripheral and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.writer.release(), self.delay)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
