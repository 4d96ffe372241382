//! Timer-driven event queue.
//!
//! Events are produced by the periodic `esp_timer` callback (control tick)
//! and by the telemetry cadence in the main loop; they are consumed by the
//! main control loop one at a time.
//!
//! Timer callbacks run in the ESP timer task, not the main task, so the
//! queue is a lock-free SPSC ring over a static buffer — the same pattern
//! an ISR-fed queue would use, and trivially correct with one producer
//! context and one consumer.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Maximum number of pending events.
/// Power of 2 for cheap ring-index wrapping.
const EVENT_QUEUE_CAP: usize = 16;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Control loop tick: read the sensor, refresh the display, evaluate
    /// thresholds.
    ControlTick = 1,
    /// Telemetry report timer fired.
    TelemetryTick = 2,
}

static EVENT_HEAD: AtomicUsize = AtomicUsize::new(0);
static EVENT_TAIL: AtomicUsize = AtomicUsize::new(0);
// SAFETY: one producer (timer task / main loop), one consumer (main loop).
// Each slot is written before EVENT_HEAD is released and read before
// EVENT_TAIL is released, so no slot is ever accessed concurrently.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Lock-free; safe to call from the timer task context.
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: only the single producer writes slots, and this slot is not
    // visible to the consumer until the Release store below.
    unsafe {
        EVENT_BUFFER[head] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: the slot at `tail` was published by the producer's Release
    // store and is not rewritten until EVENT_TAIL advances past it.
    let raw = unsafe { EVENT_BUFFER[tail] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        1 => Some(Event::ControlTick),
        2 => Some(Event::TelemetryTick),
        _ => None,
    }
}
