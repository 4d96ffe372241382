//! GPIO / peripheral pin assignments for the FrogKeeper main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Climate sensor (DHT22 / AM2302 single-wire)
// ---------------------------------------------------------------------------

/// Bidirectional data line: driven low for the start signal, then released
/// (open-drain high) and sampled while the sensor clocks out its frame.
/// External 10 kΩ pull-up to 3V3.
pub const DHT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// 7-segment display (MAX7219 cascade, SPI2)
// ---------------------------------------------------------------------------

pub const SPI_SCK_GPIO: i32 = 6;
pub const SPI_MOSI_GPIO: i32 = 7;
/// Chip select is driven manually as a plain GPIO (active low) so a digit
/// refresh burst can hold one select window across cascaded modules.
pub const SPI_CS_GPIO: i32 = 10;

/// SPI clock for the display driver (1 MHz — MAX7219 tops out at 10 MHz).
pub const DISPLAY_SPI_HZ: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Warning LEDs
// ---------------------------------------------------------------------------

/// Lit while the enclosure is at or below the low-temperature threshold.
pub const LOW_TEMP_LED_GPIO: i32 = 11;
/// Lit while the enclosure is at or above the high-temperature threshold.
pub const HIGH_TEMP_LED_GPIO: i32 = 12;
/// Lit while relative humidity is at or below the low-humidity threshold.
pub const LOW_HUM_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Heat mat relay
// ---------------------------------------------------------------------------

/// Digital output to the heat-mat relay driver (active HIGH).
pub const HEAT_MAT_GPIO: i32 = 2;
