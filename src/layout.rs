//! Board layout routing entry.
//!
//! Every keyboard wires its logical LED indices to chip channels differently,
//! so the routing table lives with the board definition, not in this crate.
//! The table is a slice of [`Led`] entries indexed by logical LED number.

/// Routing of one logical RGB LED to its chip and channel registers.
///
/// `r`, `g` and `b` are PWM register addresses in `0x24..=0xB3` on the chip
/// selected by `driver`. The three offsets of one entry must be distinct, and
/// no offset may be shared between entries routed to the same chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Led {
    /// Chip instance index, `0..DRIVERS`.
    pub driver: u8,
    /// PWM register address of the red channel.
    pub r: u8,
    /// PWM register address of the green channel.
    pub g: u8,
    /// PWM register address of the blue channel.
    pub b: u8,
}
