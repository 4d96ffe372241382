//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — today that is the serial log.

use crate::control::thresholds::AlarmState;
use crate::error::SensorError;
use crate::sensors::dht::ClimateReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service started; outputs stay off until the first
    /// valid sensor frame arrives.
    Started,

    /// A fresh validated reading arrived.
    Reading(ClimateReading),

    /// A sensor transaction failed; the previous reading stays in effect
    /// for this interval.
    ReadFailed(SensorError),

    /// The warning/heater outputs changed.
    AlarmsChanged(AlarmState),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub uptime_secs: u64,
    /// Last valid reading, or `None` before the first good frame.
    pub reading: Option<ClimateReading>,
    pub alarms: AlarmState,
    pub heater_on: bool,
    pub read_failures: u32,
    pub ticks: u64,
}
