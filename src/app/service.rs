//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the last valid reading and the alarm outputs. All
//! I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       AppService        │
//!  DisplayPort ◀── │  reading · thresholds   │
//! IndicatorPort ◀──└────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::thresholds::{AlarmState, ThresholdEvaluator};
use crate::sensors::dht::ClimateReading;

use super::events::{AppEvent, TelemetryData};
use super::ports::{DisplayPort, EventSink, IndicatorPort, SensorPort};

/// The application service orchestrates all domain logic.
pub struct AppService {
    evaluator: ThresholdEvaluator,
    /// Last frame that passed validation. `None` until the sensor has
    /// produced one good frame — a zero default would spuriously assert
    /// the low-temperature and low-humidity alarms from boot.
    reading: Option<ClimateReading>,
    alarms: AlarmState,
    heater_on: bool,
    read_failures: u32,
    tick_count: u64,
}

impl AppService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            evaluator: ThresholdEvaluator::new(config),
            reading: None,
            alarms: AlarmState::default(),
            heater_on: false,
            read_failures: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup and force every output into its safe state: a
    /// blanked display, dark LEDs, released relay.
    pub fn start(
        &mut self,
        hw: &mut (impl DisplayPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        hw.clear_display();
        hw.all_off();
        sink.emit(&AppEvent::Started);
        info!("AppService started; waiting for first sensor frame");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read → render → evaluate → outputs.
    ///
    /// The `hw` parameter satisfies **all three** hardware ports — this
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + DisplayPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Read the sensor. A bad frame is absorbed: the previous
        //    reading stays in effect and simply lags one interval.
        match hw.read_climate() {
            Ok(reading) => {
                self.reading = Some(reading);
                sink.emit(&AppEvent::Reading(reading));
            }
            Err(e) => {
                self.read_failures += 1;
                warn!("sensor read failed ({e}); keeping previous reading");
                sink.emit(&AppEvent::ReadFailed(e));
            }
        }

        // 2. Before the first valid frame there is nothing trustworthy
        //    to show or act on.
        let Some(reading) = self.reading else {
            return;
        };

        hw.show_reading(&reading);

        let alarms = self.evaluator.evaluate(&reading);
        if alarms != self.alarms {
            sink.emit(&AppEvent::AlarmsChanged(alarms));
        }
        self.alarms = alarms;
        self.heater_on = alarms.heater_on();

        // 3. Drive every output explicitly — no latched state survives a
        //    band change.
        hw.set_low_temp_warning(alarms.low_temp);
        hw.set_high_temp_warning(alarms.high_temp);
        hw.set_low_humidity_warning(alarms.low_humidity);
        hw.set_heater(self.heater_on);
    }

    // ── Telemetry ─────────────────────────────────────────────

    pub fn build_telemetry(&self, uptime_secs: u64) -> TelemetryData {
        TelemetryData {
            uptime_secs,
            reading: self.reading,
            alarms: self.alarms,
            heater_on: self.heater_on,
            read_failures: self.read_failures,
            ticks: self.tick_count,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn reading(&self) -> Option<ClimateReading> {
        self.reading
    }

    pub fn alarms(&self) -> AlarmState {
        self.alarms
    }

    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    pub fn read_failures(&self) -> u32 {
        self.read_failures
    }
}
