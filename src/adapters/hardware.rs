//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the climate sensor and every actuator driver, exposing them
//! through [`SensorPort`], [`DisplayPort`] and [`IndicatorPort`]. This is
//! the only module in the system that touches actual hardware; on
//! non-espidf targets the underlying drivers use simulation stubs.

use crate::app::ports::{DisplayPort, IndicatorPort, SensorPort};
use crate::drivers::display::Max7219Display;
use crate::drivers::heat_mat::HeatMatDriver;
use crate::drivers::warning_leds::WarningLeds;
use crate::error::SensorError;
use crate::sensors::dht::{ClimateReading, DhtSensor};

// The sensor driver is generic over its pin and delay providers; pick
// the concrete pair per target here so the rest of the system stays
// monomorphic.
#[cfg(target_os = "espidf")]
pub type DhtPin = esp_idf_hal::gpio::PinDriver<
    'static,
    esp_idf_hal::gpio::AnyIOPin,
    esp_idf_hal::gpio::InputOutput,
>;
#[cfg(target_os = "espidf")]
pub type DhtDelay = esp_idf_hal::delay::Ets;

#[cfg(not(target_os = "espidf"))]
pub type DhtPin = crate::sensors::dht::sim::SimPin;
#[cfg(not(target_os = "espidf"))]
pub type DhtDelay = crate::sensors::dht::sim::SimDelay;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor: DhtSensor<DhtPin, DhtDelay>,
    display: Max7219Display,
    leds: WarningLeds,
    heater: HeatMatDriver,
}

impl HardwareAdapter {
    pub fn new(
        sensor: DhtSensor<DhtPin, DhtDelay>,
        display: Max7219Display,
        leds: WarningLeds,
        heater: HeatMatDriver,
    ) -> Self {
        Self {
            sensor,
            display,
            leds,
            heater,
        }
    }

    /// Wake the display chain. The service blanks it through
    /// [`DisplayPort`] when it starts.
    pub fn init_display(&mut self) {
        self.display.init();
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.sensor.read()
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn show_reading(&mut self, reading: &ClimateReading) {
        self.display.show(reading);
    }

    fn clear_display(&mut self) {
        self.display.clear();
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_low_temp_warning(&mut self, lit: bool) {
        self.leds.set_low_temp(lit);
    }

    fn set_high_temp_warning(&mut self, lit: bool) {
        self.leds.set_high_temp(lit);
    }

    fn set_low_humidity_warning(&mut self, lit: bool) {
        self.leds.set_low_humidity(lit);
    }

    fn set_heater(&mut self, on: bool) {
        self.heater.set(on);
    }

    fn all_off(&mut self) {
        self.leds.all_off();
        self.heater.set(false);
    }
}
