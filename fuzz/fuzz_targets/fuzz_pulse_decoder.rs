//! Fuzz target: `frame_from_pulses`
//!
//! Drives arbitrary transition-duration sequences into the pulse
//! classifier and asserts that it never panics and that any accepted
//! frame is internally consistent.
//!
//! cargo fuzz run fuzz_pulse_decoder

#![no_main]

use frogkeeper::sensors::dht::frame_from_pulses;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = frame_from_pulses(data) {
        assert!(
            frame.checksum_ok(),
            "an accepted frame must carry a valid checksum"
        );
        let reading = frame.to_reading();
        assert!(
            reading.humidity.is_finite() && reading.temperature_c.is_finite(),
            "decoded values must be finite"
        );
    }
});
