//! SLED1734x register map and protocol constants.
//!
//! The chip exposes its registers through banks ("frames") selected via the
//! command register: frame 0 holds the LED control, blink control and PWM
//! pages used during normal operation, while the function bank holds the
//! configuration, shutdown and audio-sync registers touched only during
//! initialisation.

// ---------------------------------------------------------------------------
// Bank selection
// ---------------------------------------------------------------------------

/// Command register selecting which bank subsequent writes target.
pub const COMMAND_REGISTER: u8 = 0xFD;

/// Function bank selector value for [`COMMAND_REGISTER`].
pub const BANK_FUNCTION: u8 = 0x0B;

/// Frame-0 bank selector value for [`COMMAND_REGISTER`].
pub const BANK_FRAME_0: u8 = 0x00;

// ---------------------------------------------------------------------------
// Function bank registers
// ---------------------------------------------------------------------------

/// Configuration register (display mode selection).
pub const REG_CONFIG: u8 = 0x00;

/// Picture mode value for [`REG_CONFIG`]: display a single static frame.
pub const CONFIG_PICTURE_MODE: u8 = 0x00;

/// Picture frame register: selects which frame picture mode displays.
pub const REG_PICTURE_FRAME: u8 = 0x01;

/// Audio sync register; `0` disables brightness modulation from audio input.
pub const REG_AUDIO_SYNC: u8 = 0x06;

/// Software shutdown register.
pub const REG_SHUTDOWN: u8 = 0x0A;

/// Value for [`REG_SHUTDOWN`] entering software shutdown.
pub const SHUTDOWN_SOFTWARE: u8 = 0x00;

/// Value for [`REG_SHUTDOWN`] resuming normal operation.
pub const SHUTDOWN_NORMAL: u8 = 0x01;

// ---------------------------------------------------------------------------
// Frame-0 bank pages
// ---------------------------------------------------------------------------

/// First register of the frame-0 LED control (enable bitmask) page.
pub const LED_CONTROL_FIRST: u8 = 0x00;

/// Last register of the frame-0 LED control page.
pub const LED_CONTROL_LAST: u8 = 0x11;

/// First register of the blink control page.
pub const BLINK_CONTROL_FIRST: u8 = 0x12;

/// Last register of the blink control page.
pub const BLINK_CONTROL_LAST: u8 = 0x23;

/// First register of the PWM (brightness) page.
pub const PWM_FIRST: u8 = 0x24;

/// Last register of the PWM page.
pub const PWM_LAST: u8 = 0xB3;

// ---------------------------------------------------------------------------
// Buffer geometry
// ---------------------------------------------------------------------------

/// Number of PWM registers per chip (one per physical LED channel).
pub const PWM_REGISTER_COUNT: usize = 144;

/// Number of LED control registers per chip (144 channel-enable bits).
pub const CONTROL_REGISTER_COUNT: usize = 18;

/// Data bytes per bulk PWM transfer; matches the chip's addressing stride.
pub const PWM_CHUNK_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Factory-default 7-bit I2C address (AD pin tied to GND).
pub const DEFAULT_ADDRESS: u8 = 0x74;

/// Settle delay in milliseconds after software shutdown, per datasheet:
/// the internal oscillator must stabilise before further configuration.
pub const SETTLE_DELAY_MS: u32 = 10;
