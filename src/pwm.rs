//! PWM framebuffer staging.
//!
//! One 144-byte brightness page per chip instance, mutated in memory and
//! flushed to hardware only when its dirty flag is set. Page index `i`
//! corresponds to PWM register `0x24 + i`.

use crate::layout::Led;
use crate::registers::{PWM_FIRST, PWM_REGISTER_COUNT};

/// Staged PWM pages for `DRIVERS` chip instances.
pub(crate) struct PwmPages<const DRIVERS: usize> {
    pages: [[u8; PWM_REGISTER_COUNT]; DRIVERS],
    dirty: [bool; DRIVERS],
}

impl<const DRIVERS: usize> PwmPages<DRIVERS> {
    pub fn new() -> Self {
        Self {
            pages: [[0; PWM_REGISTER_COUNT]; DRIVERS],
            dirty: [false; DRIVERS],
        }
    }

    /// Stage one LED's three channel intensities and mark the owning chip's
    /// page dirty. A routing entry naming a chip outside `0..DRIVERS` is
    /// ignored.
    pub fn set_color(&mut self, led: &Led, r: u8, g: u8, b: u8) {
        let Some(page) = self.pages.get_mut(led.driver as usize) else {
            return;
        };
        if let Some(channel) = Self::channel(page, led.r) {
            *channel = r;
        }
        if let Some(channel) = Self::channel(page, led.g) {
            *channel = g;
        }
        if let Some(channel) = Self::channel(page, led.b) {
            *channel = b;
        }
        self.dirty[led.driver as usize] = true;
    }

    pub fn page(&self, driver: usize) -> Option<&[u8; PWM_REGISTER_COUNT]> {
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

    fn channel(page: &mut [u8; PWM_REGISTER_COUNT], offset: u8) -> Option<&mut u8> {
        page.get_mut(offset.wrapping_sub(PWM_FIRST) as usize)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const LED_CHIP_0: Led = Led {
        driver: 0,
        r: 0x24,
        g: 0x25,
        b: 0x26,
    };
    const LED_CHIP_1: Led = Led {
        driver: 1,
        r: 0x30,
        g: 0x40,
        b: 0xB3,
    };

    #[test]
    fn set_color_reads_back_at_resolved_offsets() {
        let mut pwm = PwmPages::<2>::new();
        pwm.set_color(&LED_CHIP_1, 0x11, 0x22, 0x33);

        let page = pwm.page(1).unwrap();
        assert_eq!(page[0x30 - 0x24], 0x11);
        assert_eq!(page[0x40 - 0x24], 0x22);
        assert_eq!(page[0xB3 - 0x24], 0x33);
    }

    #[test]
    fn set_color_marks_only_owning_chip_dirty() {
        let mut pwm = PwmPages::<2>::new();
        pwm.set_color(&LED_CHIP_1, 1, 2, 3);

        assert!(!pwm.dirty(0));
        assert!(pwm.dirty(1));
        assert!(pwm.page(0).unwrap().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn set_color_order_independent_for_disjoint_leds() {
        let mut forward = PwmPages::<2>::new();
        forward.set_color(&LED_CHIP_0, 10, 20, 30);
        forward.set_color(&LED_CHIP_1, 40, 50, 60);

        let mut backward = PwmPages::<2>::new();
        backward.set_color(&LED_CHIP_1, 40, 50, 60);
        backward.set_color(&LED_CHIP_0, 10, 20, 30);

        assert_eq!(forward.page(0), backward.page(0));
        assert_eq!(forward.page(1), backward.page(1));
    }

    #[test]
    fn clear_dirty_is_per_chip() {
        let mut pwm = PwmPages::<2>::new();
        pwm.set_color(&LED_CHIP_0, 1, 1, 1);
        pwm.set_color(&LED_CHIP_1, 1, 1, 1);

        pwm.clear_dirty(0);
        assert!(!pwm.dirty(0));
        assert!(pwm.dirty(1));
    }

    #[test]
    fn entry_routed_to_missing_chip_is_ignored() {
        let mut pwm = PwmPages::<1>::new();
        let stray = Led {
            driver: 1,
            r: 0x24,
            g: 0x25,
            b: 0x26,
        };
        pwm.set_color(&stray, 255, 255, 255);

        assert!(!pwm.dirty(0));
        assert!(pwm.page(0).unwrap().iter().all(|&byte| byte == 0));
    }
}
