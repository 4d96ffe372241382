//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! The hardware adapter implements these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches a peripheral directly.

use crate::error::SensorError;
use crate::sensors::dht::ClimateReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one full single-wire transaction per call.
pub trait SensorPort {
    /// Attempt a sensor read. A failed transaction leaves the caller's
    /// state untouched; the next poll interval is the retry point.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → digit bank)
// ───────────────────────────────────────────────────────────────

/// Rendering port for the 7-segment bank.
pub trait DisplayPort {
    /// Render a reading on the digit bank.
    fn show_reading(&mut self, reading: &ClimateReading);

    /// Blank the bank.
    fn clear_display(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → warning outputs)
// ───────────────────────────────────────────────────────────────

/// Write-side port: warning LEDs and the heat-mat relay.
pub trait IndicatorPort {
    fn set_low_temp_warning(&mut self, lit: bool);

    fn set_high_temp_warning(&mut self, lit: bool);

    fn set_low_humidity_warning(&mut self, lit: bool);

    /// Energise or release the heat-mat relay.
    fn set_heater(&mut self, on: bool);

    /// Kill every output (LEDs and relay) — safe startup/shutdown state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// anything else tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
