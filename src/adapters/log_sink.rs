//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production). The
//! per-reading line sits at `debug!` so a release log-level filter
//! silences it without touching the code.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Reading(r) => {
                debug!(
                    "Humidity = {:.1}%, Temperature = {:.1}\u{00b0}C",
                    r.humidity, r.temperature_c
                );
            }
            AppEvent::ReadFailed(e) => {
                warn!("READ | bad frame ({e}); previous reading retained");
            }
            AppEvent::AlarmsChanged(a) => {
                info!(
                    "ALARM | low_temp={} high_temp={} low_hum={} heater={}",
                    a.low_temp,
                    a.high_temp,
                    a.low_humidity,
                    a.heater_on(),
                );
            }
            AppEvent::Telemetry(t) => match t.reading {
                Some(r) => info!(
                    "TELEM | up={}s | H={:.1}% T={:.1}\u{00b0}C | heater={} | \
                     bad_frames={} ticks={}",
                    t.uptime_secs,
                    r.humidity,
                    r.temperature_c,
                    t.heater_on,
                    t.read_failures,
                    t.ticks,
                ),
                None => info!(
                    "TELEM | up={}s | no reading yet | bad_frames={} ticks={}",
                    t.uptime_secs, t.read_failures, t.ticks,
                ),
            },
            AppEvent::Started => {
                info!("START | outputs held off until first sensor frame");
            }
        }
    }
}
