//! FrogKeeper Firmware — Main Entry Point
//!
//! Hexagonal architecture with a timer-driven control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter              LogEventSink   Esp32Time   │
//! │  (Sensor+Display+Indicator)   (EventSink)    (uptime)    │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ─────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │             AppService (pure logic)                │  │
//! │  │  reading lifecycle · thresholds · telemetry        │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{IOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;

use frogkeeper::adapters::hardware::HardwareAdapter;
use frogkeeper::adapters::log_sink::LogEventSink;
use frogkeeper::adapters::time::Esp32TimeAdapter;
use frogkeeper::app::events::AppEvent;
use frogkeeper::app::ports::EventSink;
use frogkeeper::app::service::AppService;
use frogkeeper::config::SystemConfig;
use frogkeeper::drivers::display::Max7219Display;
use frogkeeper::drivers::heat_mat::HeatMatDriver;
use frogkeeper::drivers::warning_leds::WarningLeds;
use frogkeeper::drivers::{hw_init, hw_timer};
use frogkeeper::events::{self, Event};
use frogkeeper::sensors::dht::DhtSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("FrogKeeper v{} starting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("peripheral init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // The sensor line is the one pin driven through esp-idf-hal: it needs
    // open-drain input/output switching, which the typed PinDriver gives
    // us for free (pins::DHT_GPIO = GPIO5).
    let peripherals = Peripherals::take()?;
    let dht_pin = PinDriver::input_output_od(peripherals.pins.gpio5.downgrade())?;
    let sensor = DhtSensor::new(dht_pin, Ets);

    // ── 3. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        sensor,
        Max7219Display::new(config.display_brightness),
        WarningLeds::new(),
        HeatMatDriver::new(),
    );
    hw.init_display();

    let mut sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    // ── 4. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config);
    app.start(&mut hw, &mut sink);

    // ── 5. Control timer ──────────────────────────────────────
    hw_timer::start_control_timer(config.poll_interval_ms);

    info!("System ready. Entering control loop.");

    let ticks_per_telemetry = u64::from(config.telemetry_interval_secs)
        .saturating_mul(1000)
        .checked_div(u64::from(config.poll_interval_ms))
        .unwrap_or(60)
        .max(1);
    let mut ticks_since_telemetry: u64 = 0;

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        // On hardware the control timer pushes ticks from the esp_timer
        // task and the main task naps briefly between drains. On the
        // host the sleep loop itself is the tick source.
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(50));

        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.poll_interval_ms,
            )));
            events::push_event(Event::ControlTick);
        }

        events::drain_events(|event| match event {
            Event::ControlTick => {
                app.tick(&mut hw, &mut sink);

                ticks_since_telemetry += 1;
                if ticks_since_telemetry >= ticks_per_telemetry {
                    ticks_since_telemetry = 0;
                    events::push_event(Event::TelemetryTick);
                }
            }

            Event::TelemetryTick => {
                sink.emit(&AppEvent::Telemetry(
                    app.build_telemetry(time.uptime_secs()),
                ));
            }
        });
    }
}
