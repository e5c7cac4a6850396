//! Hook into the event timer subsystem
//!
//! The clock never walks the timer list itself. The tick interrupt only asks
//! whether the nearest expiration has been reached and, if so, leaves a poll
//! request for the etimer process to pick up outside interrupt context.

use crate::clock::{time_reached, ClockTime};

/// Queries the clock makes against the event timer list
pub trait EventTimers {
    /// Any timer armed?
    fn pending(&self) -> bool;

    /// Tick of the nearest expiration. Only meaningful while `pending()`.
    fn next_expiration(&self) -> ClockTime;
}

/// For boards without an event timer subsystem
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEventTimers;

impl EventTimers for NoEventTimers {
    fn pending(&self) -> bool {
        false
    }

    fn next_expiration(&self) -> ClockTime {
        0
    }
}

/// True when a pending timer's expiration is at or before `now`.
pub fn expired<E: EventTimers + ?Sized>(timers: &E, now: ClockTime) -> bool {
    timers.pending() && time_reached(now, timers.next_expiration())
}
