//! Integration tests for the AppService → ports → outputs pipeline.
//!
//! These run on the host (x86_64) and verify the full control cycle —
//! sensor read, display render, threshold evaluation, output drive —
//! against the recording mock, without any real hardware.

use crate::mock_hw::{HwCall, MockHardware, RecordingSink};

use frogkeeper::SensorError;
use frogkeeper::app::events::AppEvent;
use frogkeeper::app::service::AppService;
use frogkeeper::config::SystemConfig;

fn make_app() -> (AppService, MockHardware, RecordingSink) {
    let config = SystemConfig::default();
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_all_outputs_off() {
    let (_app, hw, sink) = make_app();
    assert_eq!(hw.calls, vec![HwCall::ClearDisplay, HwCall::AllOff]);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started]));
}

#[test]
fn no_output_until_first_valid_frame() {
    let (mut app, mut hw, mut sink) = make_app();

    for _ in 0..3 {
        hw.push_failure(SensorError::Timeout);
        app.tick(&mut hw, &mut sink);
    }

    // Nothing beyond the startup clear: no render, no indicator writes,
    // no heater command from a zero-default reading.
    assert_eq!(hw.calls, vec![HwCall::ClearDisplay, HwCall::AllOff]);
    assert_eq!(hw.show_count(), 0);
    assert!(!hw.heater_on());
    assert_eq!(app.read_failures(), 3);
}

// ── Nominal cycle ─────────────────────────────────────────────

#[test]
fn comfortable_reading_renders_and_raises_nothing() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 25.0);
    app.tick(&mut hw, &mut sink);

    assert_eq!(hw.last_shown(), Some((85.0, 25.0)));
    assert!(!hw.low_temp_led());
    assert!(!hw.high_temp_led());
    assert!(!hw.low_hum_led());
    assert!(!hw.heater_on());

    let captured = app.reading().expect("reading retained");
    assert!((captured.temperature_c - 25.0).abs() < f32::EPSILON);
    assert_eq!(app.alarms(), frogkeeper::control::thresholds::AlarmState::default());
}

#[test]
fn cold_reading_lights_warning_and_heater() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 18.5);
    app.tick(&mut hw, &mut sink);

    assert!(hw.low_temp_led());
    assert!(!hw.high_temp_led());
    assert!(hw.heater_on());
    assert!(app.heater_on());
}

#[test]
fn hot_reading_lights_warning_without_heater() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 31.0);
    app.tick(&mut hw, &mut sink);

    assert!(hw.high_temp_led());
    assert!(!hw.low_temp_led());
    assert!(!hw.heater_on());
}

#[test]
fn dry_reading_lights_humidity_warning() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(60.0, 25.0);
    app.tick(&mut hw, &mut sink);

    assert!(hw.low_hum_led());
    assert!(!hw.low_temp_led());
    assert!(!hw.high_temp_led());
}

// ── Boundary classification ───────────────────────────────────

#[test]
fn threshold_boundaries_are_inclusive() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(75.0, 22.0);
    app.tick(&mut hw, &mut sink);
    assert!(hw.low_temp_led());
    assert!(hw.low_hum_led());
    assert!(hw.heater_on());

    hw.push_reading(80.0, 28.0);
    app.tick(&mut hw, &mut sink);
    assert!(hw.high_temp_led());
    assert!(!hw.low_temp_led());
    assert!(!hw.heater_on());
}

// ── Band transitions ──────────────────────────────────────────

#[test]
fn jump_from_low_to_high_band_releases_heater() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 18.0);
    app.tick(&mut hw, &mut sink);
    assert!(hw.heater_on());
    assert!(hw.low_temp_led());

    // One interval later the probe sits in direct sun.
    hw.push_reading(85.0, 33.0);
    app.tick(&mut hw, &mut sink);
    assert!(!hw.heater_on());
    assert!(!hw.low_temp_led());
    assert!(hw.high_temp_led());
}

#[test]
fn alarm_change_emits_one_event() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 25.0);
    hw.push_reading(85.0, 25.1);
    hw.push_reading(85.0, 18.0);
    for _ in 0..3 {
        app.tick(&mut hw, &mut sink);
    }

    let alarm_events = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::AlarmsChanged(_)))
        .count();
    assert_eq!(alarm_events, 1, "only the low-band entry changes the alarms");
}

// ── Fail-soft policy ──────────────────────────────────────────

#[test]
fn bad_frame_keeps_previous_reading_in_effect() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 18.0);
    app.tick(&mut hw, &mut sink);
    hw.push_failure(SensorError::ChecksumMismatch);
    app.tick(&mut hw, &mut sink);

    // The stale reading is still rendered and still drives the outputs.
    assert_eq!(hw.show_count(), 2);
    assert_eq!(hw.last_shown(), Some((85.0, 18.0)));
    assert!(hw.heater_on());
    assert_eq!(app.read_failures(), 1);
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::ReadFailed(SensorError::ChecksumMismatch))),
    );
}

#[test]
fn recovery_after_bad_frames_updates_outputs() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(85.0, 18.0);
    hw.push_failure(SensorError::Timeout);
    hw.push_reading(85.0, 25.0);
    for _ in 0..3 {
        app.tick(&mut hw, &mut sink);
    }

    assert_eq!(hw.last_shown(), Some((85.0, 25.0)));
    assert!(!hw.heater_on());
    assert!(!hw.low_temp_led());
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_snapshot_reflects_state() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.push_reading(70.0, 20.0);
    hw.push_failure(SensorError::Timeout);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    let t = app.build_telemetry(120);
    assert_eq!(t.uptime_secs, 120);
    assert_eq!(t.ticks, 2);
    assert_eq!(t.read_failures, 1);
    assert!(t.heater_on);
    let reading = t.reading.expect("a reading was captured");
    assert!((reading.humidity - 70.0).abs() < f32::EPSILON);
    assert!(t.alarms.low_temp);
    assert!(t.alarms.low_humidity);
}
