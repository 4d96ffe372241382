//! Sensor subsystem.
//!
//! One sensor lives here: the DHT-class single-wire climate probe that
//! supplies both humidity and temperature for the whole control loop.

pub mod dht;
