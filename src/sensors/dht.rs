//! DHT22 (AM2302) single-wire climate sensor driver.
//!
//! The sensor speaks a timing-based one-pin protocol: the MCU pulls the
//! line low to request a measurement, releases it, and the sensor answers
//! with a preamble followed by 40 data bits, each encoded in the width of
//! a high pulse. The driver busy-polls the line at roughly 1 µs, records
//! how long each level is held, and classifies the widths into bits.
//!
//! The driver is generic over `embedded-hal` 1.0 traits: an open-drain
//! [`InputPin`] + [`OutputPin`] data line and a [`DelayNs`] provider.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: an `esp-idf-hal` open-drain `PinDriver` plus the `Ets`
//! busy-wait delay. On host/test: [`sim::SimPin`] replays a scripted
//! waveform so the full transaction (start signal, acquisition,
//! classification, validation) runs under `cargo test`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

/// Maximum number of level transitions in one transaction: the response
/// preamble plus 40 data bits at two transitions per bit, with headroom.
pub const MAX_TIMINGS: usize = 100;
/// Poll count at which a stable level is declared dead (silent sensor).
pub const TIMEOUT_TICKS: u8 = 255;
/// A high pulse longer than this many ~1 µs polls encodes a `1` bit.
pub const BIT_ONE_THRESHOLD: u8 = 16;
/// Data bits per frame.
pub const FRAME_BITS: usize = 40;
/// Bytes per frame: humidity high/low, temperature high/low, checksum.
pub const FRAME_BYTES: usize = 5;

/// Start signal: hold the line low at least 18 ms; 20 ms gives margin.
const START_SIGNAL_LOW_MS: u32 = 20;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A single validated humidity and temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    /// Relative humidity (% RH).
    pub humidity: f32,
    /// Temperature (°C).
    pub temperature_c: f32,
}

// ---------------------------------------------------------------------------
// Raw frame
// ---------------------------------------------------------------------------

/// The five raw bytes of one sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    pub bytes: [u8; FRAME_BYTES],
}

impl RawFrame {
    /// The checksum byte is the low 8 bits of the sum of the data bytes.
    pub fn checksum_ok(&self) -> bool {
        let [b0, b1, b2, b3, sum] = self.bytes;
        b0.wrapping_add(b1).wrapping_add(b2).wrapping_add(b3) == sum
    }

    /// Decode the frame into engineering units.
    ///
    /// Both values are normally a ×10 fixed-point 16-bit field. Some
    /// sensor variants instead put a whole-number value in the high byte
    /// and noise in the low byte; the out-of-range fallbacks pick those
    /// up. Bit 15 of the temperature field is a sign flag.
    pub fn to_reading(&self) -> ClimateReading {
        let [hh, hl, th, tl, _] = self.bytes;

        let mut humidity = f32::from((u16::from(hh) << 8) | u16::from(hl)) / 10.0;
        if humidity > 100.0 {
            humidity = f32::from(hh);
        }

        let mut temperature_c = f32::from((u16::from(th & 0x7F) << 8) | u16::from(tl)) / 10.0;
        if temperature_c > 125.0 {
            temperature_c = f32::from(th);
        }
        if th & 0x80 != 0 {
            temperature_c = -temperature_c;
        }

        ClimateReading {
            humidity,
            temperature_c,
        }
    }
}

// ---------------------------------------------------------------------------
// Pulse classification
// ---------------------------------------------------------------------------

/// Classify a transition-duration sequence into a frame.
///
/// `pulses[i]` is the number of polls the line held its level before the
/// i-th transition; an entry of [`TIMEOUT_TICKS`] marks the point where
/// the line went silent and acquisition stopped. Every second transition
/// from index 4 onward is the high phase of one data bit; its width
/// decides the bit, accumulated MSB-first.
pub fn frame_from_pulses(pulses: &[u8]) -> Result<RawFrame, SensorError> {
    let mut bytes = [0u8; FRAME_BYTES];
    let mut bits = 0usize;

    for (i, &count) in pulses.iter().enumerate() {
        if count == TIMEOUT_TICKS {
            break;
        }
        if i >= 4 && i % 2 == 0 && bits < FRAME_BITS {
            bytes[bits / 8] <<= 1;
            if count > BIT_ONE_THRESHOLD {
                bytes[bits / 8] |= 1;
            }
            bits += 1;
        }
    }

    if bits < FRAME_BITS {
        return Err(SensorError::Timeout);
    }
    let frame = RawFrame { bytes };
    if !frame.checksum_ok() {
        return Err(SensorError::ChecksumMismatch);
    }
    Ok(frame)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Driver for a DHT-class sensor on one open-drain data line.
pub struct DhtSensor<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> DhtSensor<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Run exactly one protocol transaction and decode it.
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.send_start_signal()?;
        let pulses = self.sample_transitions()?;
        frame_from_pulses(&pulses).map(|frame| frame.to_reading())
    }

    fn send_start_signal(&mut self) -> Result<(), SensorError> {
        self.pin.set_low().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_ms(START_SIGNAL_LOW_MS);
        // Release the line: the pull-up takes it high and the sensor
        // answers with its response preamble.
        self.pin.set_high().map_err(|_| SensorError::Gpio)?;
        Ok(())
    }

    /// Measure how long the line holds each level, one entry per
    /// transition, until the frame ends or the line goes silent.
    fn sample_transitions(&mut self) -> Result<heapless::Vec<u8, MAX_TIMINGS>, SensorError> {
        let mut pulses = heapless::Vec::new();
        let mut last = true;

        for _ in 0..MAX_TIMINGS {
            let mut count: u8 = 0;
            loop {
                let level = self.pin.is_high().map_err(|_| SensorError::Gpio)?;
                if level != last {
                    last = level;
                    break;
                }
                count += 1;
                self.delay.delay_us(1);
                if count == TIMEOUT_TICKS {
                    break;
                }
            }
            // Capacity equals the loop bound, so the push cannot fail.
            let _ = pulses.push(count);
            if count == TIMEOUT_TICKS {
                break;
            }
        }
        Ok(pulses)
    }
}

// ---------------------------------------------------------------------------
// Host simulation
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "espidf"))]
pub mod sim {
    //! Host-side doubles for the sensor pin and delay.

    use core::convert::Infallible;
    use std::collections::VecDeque;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

    /// Replays a scripted single-wire waveform.
    ///
    /// Each script entry is the number of consecutive polls the line
    /// holds one level, alternating from `initial`. Once the script is
    /// exhausted the line holds its final level forever — the signature
    /// of a silent or disconnected sensor.
    pub struct SimPin {
        holds: VecDeque<u16>,
        level: bool,
        remaining: u16,
    }

    impl SimPin {
        pub fn new(initial: bool, holds: &[u16]) -> Self {
            let mut holds: VecDeque<u16> = holds.iter().copied().collect();
            let remaining = holds.pop_front().unwrap_or(u16::MAX);
            Self {
                holds,
                level: initial,
                remaining,
            }
        }

        /// A line that never toggles — every transaction times out.
        pub fn silent() -> Self {
            Self::new(true, &[])
        }
    }

    impl ErrorType for SimPin {
        type Error = Infallible;
    }

    impl InputPin for SimPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            if self.remaining == 0 {
                match self.holds.pop_front() {
                    Some(next) => {
                        self.level = !self.level;
                        self.remaining = next;
                    }
                    // Script exhausted: hold the final level forever.
                    None => self.remaining = u16::MAX,
                }
            }
            self.remaining = self.remaining.saturating_sub(1);
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|level| !level)
        }
    }

    impl OutputPin for SimPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    /// `DelayNs` that returns immediately: simulated waveforms advance
    /// per poll, not per wall-clock microsecond.
    pub struct SimDelay;

    impl DelayNs for SimDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
