//! MAX7219 8-digit 7-segment display driver.
//!
//! The controller multiplexes eight Code-B-decoded digits and can be
//! daisy-chained; every register write is broadcast to all cascaded
//! modules through [`hw_init`]'s chip-select-framed helpers. Digit
//! encoding is a pure function so the layout is testable without a bus.

use crate::drivers::hw_init;
use crate::sensors::dht::ClimateReading;

// Register command set (MAX7219 datasheet, table 2).
pub const CMD_NOOP: u8 = 0;
/// First digit register; DIGIT0..DIGIT7 occupy 1..=8.
pub const CMD_DIGIT0: u8 = 1;
pub const CMD_DECODE_MODE: u8 = 9;
pub const CMD_BRIGHTNESS: u8 = 10;
pub const CMD_SCAN_LIMIT: u8 = 11;
pub const CMD_SHUTDOWN: u8 = 12;
pub const CMD_DISPLAY_TEST: u8 = 15;

/// Digits on the physical bank.
pub const DIGIT_COUNT: usize = 8;
/// Code-B value that renders as a blank digit.
pub const BLANK: u8 = 0x0F;
/// OR-mask that lights a digit's decimal point.
pub const POINT: u8 = 0x80;

/// Lay a reading out on the 8-digit bank.
///
/// Slots fill least-significant first: humidity ones/tens/hundreds in
/// slots 0-2 with the decimal point on slot 0 and a blank separator in
/// slot 3; temperature ones/tens in slots 5-6 with the point on slot 5.
/// Slot 4 keeps a literal 0 — under the slot-5 point it reads as the
/// tenths digit of the whole-number temperature. The hundreds digit
/// lands in slot 7 and is immediately blanked, so three-digit
/// magnitudes lose their top digit, and the sign is dropped at digit
/// extraction — the bank has no minus glyph under decode mode.
pub fn encode_reading(reading: &ClimateReading) -> [u8; DIGIT_COUNT] {
    let mut digits = [0u8; DIGIT_COUNT];

    let mut hum = reading.humidity as u32;
    for slot in digits.iter_mut().take(3) {
        *slot = (hum % 10) as u8;
        hum /= 10;
    }
    digits[0] |= POINT;
    digits[3] = BLANK;

    let mut temp = (reading.temperature_c as i32).unsigned_abs();
    for slot in digits.iter_mut().skip(5) {
        *slot = (temp % 10) as u8;
        temp /= 10;
    }
    digits[5] |= POINT;
    digits[7] = BLANK;

    digits
}

/// Driver for the cascaded display bank.
pub struct Max7219Display {
    brightness: u8,
}

impl Max7219Display {
    pub fn new(brightness: u8) -> Self {
        Self {
            brightness: brightness.min(15),
        }
    }

    /// One-time wake-up sequence: leave shutdown, disable display test,
    /// scan all eight digits, put every digit in Code-B decode mode,
    /// wake, set intensity.
    pub fn init(&mut self) {
        hw_init::display_write(CMD_SHUTDOWN, 0);
        hw_init::display_write(CMD_DISPLAY_TEST, 0);
        hw_init::display_write(CMD_SCAN_LIMIT, 7);
        hw_init::display_write(CMD_DECODE_MODE, 0xFF);
        hw_init::display_write(CMD_SHUTDOWN, 1);
        hw_init::display_write(CMD_BRIGHTNESS, self.brightness);
    }

    /// Render a reading on the bank.
    pub fn show(&mut self, reading: &ClimateReading) {
        self.set_digits(encode_reading(reading));
    }

    /// Write a digit buffer out. The bank is physically addressed in
    /// reverse: buffer slot 7 lands in the first digit register. The
    /// refresh runs as a burst with no settling delay between registers.
    pub fn set_digits(&mut self, digits: [u8; DIGIT_COUNT]) {
        for offset in 0..DIGIT_COUNT {
            hw_init::display_write_fast(
                CMD_DIGIT0 + offset as u8,
                digits[DIGIT_COUNT - 1 - offset],
            );
        }
    }

    /// Blank the bank. Under Code-B decode a raw 0 renders as the digit
    /// "0", so a cleared display reads as a row of zeros.
    pub fn clear(&mut self) {
        for offset in 0..DIGIT_COUNT {
            hw_init::display_write(CMD_DIGIT0 + offset as u8, 0);
        }
    }
}
