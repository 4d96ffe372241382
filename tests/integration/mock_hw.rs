//! Mock hardware adapter for integration tests.
//!
//! Records every display and actuator call so tests can assert on the
//! full command history, and serves scripted sensor results — all without
//! touching a GPIO or SPI register.

use std::collections::VecDeque;

use frogkeeper::SensorError;
use frogkeeper::app::events::AppEvent;
use frogkeeper::app::ports::{DisplayPort, EventSink, IndicatorPort, SensorPort};
use frogkeeper::sensors::dht::ClimateReading;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Show { humidity: f32, temperature_c: f32 },
    ClearDisplay,
    LowTempLed(bool),
    HighTempLed(bool),
    LowHumLed(bool),
    Heater(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Results served to `read_climate`, front first. An empty script
    /// reads as a silent sensor.
    pub sensor_script: VecDeque<Result<ClimateReading, SensorError>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            sensor_script: VecDeque::new(),
        }
    }

    pub fn push_reading(&mut self, humidity: f32, temperature_c: f32) {
        self.sensor_script.push_back(Ok(ClimateReading {
            humidity,
            temperature_c,
        }));
    }

    pub fn push_failure(&mut self, e: SensorError) {
        self.sensor_script.push_back(Err(e));
    }

    pub fn show_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Show { .. }))
            .count()
    }

    pub fn last_shown(&self) -> Option<(f32, f32)> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::Show {
                humidity,
                temperature_c,
            } => Some((*humidity, *temperature_c)),
            _ => None,
        })
    }

    fn last_flag(&self, pick: impl Fn(&HwCall) -> Option<bool>) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::AllOff => Some(false),
                other => pick(other),
            })
            .unwrap_or(false)
    }

    pub fn heater_on(&self) -> bool {
        self.last_flag(|c| match c {
            HwCall::Heater(on) => Some(*on),
            _ => None,
        })
    }

    pub fn low_temp_led(&self) -> bool {
        self.last_flag(|c| match c {
            HwCall::LowTempLed(lit) => Some(*lit),
            _ => None,
        })
    }

    pub fn high_temp_led(&self) -> bool {
        self.last_flag(|c| match c {
            HwCall::HighTempLed(lit) => Some(*lit),
            _ => None,
        })
    }

    pub fn low_hum_led(&self) -> bool {
        self.last_flag(|c| match c {
            HwCall::LowHumLed(lit) => Some(*lit),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.sensor_script
            .pop_front()
            .unwrap_or(Err(SensorError::Timeout))
    }
}

impl DisplayPort for MockHardware {
    fn show_reading(&mut self, reading: &ClimateReading) {
        self.calls.push(HwCall::Show {
            humidity: reading.humidity,
            temperature_c: reading.temperature_c,
        });
    }

    fn clear_display(&mut self) {
        self.calls.push(HwCall::ClearDisplay);
    }
}

impl IndicatorPort for MockHardware {
    fn set_low_temp_warning(&mut self, lit: bool) {
        self.calls.push(HwCall::LowTempLed(lit));
    }

    fn set_high_temp_warning(&mut self, lit: bool) {
        self.calls.push(HwCall::HighTempLed(lit));
    }

    fn set_low_humidity_warning(&mut self, lit: bool) {
        self.calls.push(HwCall::LowHumLed(lit));
    }

    fn set_heater(&mut self, on: bool) {
        self.calls.push(HwCall::Heater(on));
    }

    fn all_off(&mut self) {
        self.calls.push(HwCall::AllOff);
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
