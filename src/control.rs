//! LED control (channel enable) staging.
//!
//! One 18-byte bitmask page per chip instance: 144 bits, one per physical
//! LED channel, laid out so that the channel at PWM offset `o` maps to
//! register `(o - 0x24) / 8`, bit `(o - 0x24) % 8`.

use crate::layout::Led;
use crate::registers::{CONTROL_REGISTER_COUNT, PWM_FIRST};

/// Staged LED control pages for `DRIVERS` chip instances.
pub(crate) struct ControlPages<const DRIVERS: usize> {
    pages: [[u8; CONTROL_REGISTER_COUNT]; DRIVERS],
    dirty: [bool; DRIVERS],
}

impl<const DRIVERS: usize> ControlPages<DRIVERS> {
    pub fn new() -> Self {
        Self {
            pages: [[0; CONTROL_REGISTER_COUNT]; DRIVERS],
            dirty: [false; DRIVERS],
        }
    }

    /// Stage one LED's three channel-enable bits and mark the owning chip's
    /// page dirty. Bits outside the LED's three channels are untouched.
    pub fn set_enabled(&mut self, led: &Led, r_on: bool, g_on: bool, b_on: bool) {
        let Some(page) = self.pages.get_mut(led.driver as usize) else {
            return;
        };
        Self::set_bit(page, led.r, r_on);
        Self::set_bit(page, led.g, g_on);
        Self::set_bit(page, led.b, b_on);
        self.dirty[led.driver as usize] = true;
    }

    pub fn page(&self, driver: usize) -> Option<&[u8; CONTROL_REGISTER_COUNT]> {
        self.pages.get(driver)
    }

    pub fn dirty(&self, driver: usize) -> bool {
        self.dirty.get(driver).copied().unwrap_or(false)
    }

    pub fn clear_dirty(&mut self, driver: usize) {
        if let Some(flag) = self.dirty.get_mut(driver) {
            *flag = false;
        }
    }

    fn set_bit(page: &mut [u8; CONTROL_REGISTER_COUNT], offset: u8, on: bool) {
        let channel = offset.wrapping_sub(PWM_FIRST) as usize;
        let Some(byte) = page.get_mut(channel / 8) else {
            return;
        };
        let bit = channel % 8;
        if on {
            *byte |= 1 << bit;
        } else {
            *byte &= !(1 << bit);
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Channels 1, 9 and 17: three distinct bytes of the mask.
    const LED: Led = Led {
        driver: 0,
        r: 0x25,
        g: 0x2D,
        b: 0x35,
    };

    #[test]
    fn enable_bits_round_trip() {
        let mut control = ControlPages::<1>::new();
        control.set_enabled(&LED, true, false, true);

        let page = control.page(0).unwrap();
        assert_eq!(page[0], 1 << 1); // red: register 0, bit 1
        assert_eq!(page[1], 0); // green stays off: register 1, bit 1
        assert_eq!(page[2], 1 << 1); // blue: register 2, bit 1
        assert!(control.dirty(0));
    }

    #[test]
    fn unrelated_bits_are_preserved() {
        let mut control = ControlPages::<1>::new();
        let neighbor = Led {
            driver: 0,
            r: 0x24,
            g: 0x2C,
            b: 0x34,
        };
        control.set_enabled(&neighbor, true, true, true);
        control.set_enabled(&LED, true, false, true);

        let page = control.page(0).unwrap();
        assert_eq!(page[0], (1 << 0) | (1 << 1));
        assert_eq!(page[1], 1 << 0);
        assert_eq!(page[2], (1 << 0) | (1 << 1));
    }

    #[test]
    fn disabling_clears_previously_set_bits() {
        let mut control = ControlPages::<1>::new();
        control.set_enabled(&LED, true, true, true);
        control.set_enabled(&LED, false, false, false);

        assert!(control.page(0).unwrap().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn shared_byte_channels_do_not_clobber_each_other() {
        // Two LEDs whose channels land in the same mask byte.
        let a = Led {
            driver: 0,
            r: 0x24,
            g: 0x25,
            b: 0x26,
        };
        let b = Led {
            driver: 0,
            r: 0x27,
            g: 0x28,
            b: 0x29,
        };
        let mut control = ControlPages::<1>::new();
        control.set_enabled(&a, true, true, true);
        control.set_enabled(&b, true, false, true);

        assert_eq!(control.page(0).unwrap()[0], 0b0010_1111);
    }
}
