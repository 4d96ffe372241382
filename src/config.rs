//! System configuration parameters
//!
//! All tunable parameters for the FrogKeeper system. There is no runtime
//! configuration surface — `SystemConfig::default()` carries the build-time
//! values and is constructed once at boot.

/// Core system configuration
#[derive(Debug, Clone)]
pub struct SystemConfig {
    // --- Climate thresholds ---
    /// Temperature (°C) at or below which the heat mat and the
    /// low-temperature warning engage.
    pub low_temp_c: f32,
    /// Temperature (°C) at or above which the high-temperature warning
    /// engages.
    pub high_temp_c: f32,
    /// Relative humidity (%) at or below which the low-humidity warning
    /// engages.
    pub low_humidity_pct: f32,

    // --- Display ---
    /// MAX7219 intensity register value (0-15).
    pub display_brightness: u8,

    // --- Timing ---
    /// Sensor poll / control loop interval (milliseconds).
    pub poll_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds for a White's tree frog enclosure
            low_temp_c: 22.0,
            high_temp_c: 28.0,
            low_humidity_pct: 75.0,

            // Display
            display_brightness: 4,

            // Timing
            poll_interval_ms: 1000,      // 1 Hz
            telemetry_interval_secs: 60, // 1/min
        }
    }
}
