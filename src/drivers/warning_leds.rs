//! Warning LED bank driver.
//!
//! Three discrete indicator LEDs: low temperature, high temperature and
//! low humidity. A dumb output stage — which LEDs should be lit is
//! decided by the threshold evaluator, never here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Snapshot of which warning LEDs are lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedStates {
    pub low_temp: bool,
    pub high_temp: bool,
    pub low_humidity: bool,
}

pub struct WarningLeds {
    current: LedStates,
}

impl WarningLeds {
    pub fn new() -> Self {
        Self {
            current: LedStates::default(),
        }
    }

    pub fn set_low_temp(&mut self, lit: bool) {
        hw_init::gpio_write(pins::LOW_TEMP_LED_GPIO, lit);
        self.current.low_temp = lit;
    }

    pub fn set_high_temp(&mut self, lit: bool) {
        hw_init::gpio_write(pins::HIGH_TEMP_LED_GPIO, lit);
        self.current.high_temp = lit;
    }

    pub fn set_low_humidity(&mut self, lit: bool) {
        hw_init::gpio_write(pins::LOW_HUM_LED_GPIO, lit);
        self.current.low_humidity = lit;
    }

    pub fn all_off(&mut self) {
        self.set_low_temp(false);
        self.set_high_temp(false);
        self.set_low_humidity(false);
    }

    pub fn current(&self) -> LedStates {
        self.current
    }
}
