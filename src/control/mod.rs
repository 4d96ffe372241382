//! Control logic — pure decision-making, zero I/O.

pub mod thresholds;
