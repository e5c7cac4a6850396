//! Sleep-timer tick clock for the CC2540 BLE SoC
//!
//! The 32 kHz sleep timer runs in every power mode. Its 24-bit compare is
//! re-armed on each match so the compare interrupt fires [`CLOCK_SECOND`]
//! times per second, and every firing is one tick.
//!
//! A board wires it up like this:
//!
//! ```ignore
//! static TICKS: Mutex<RefCell<Option<TickSource<'static, Cc2540>>>> =
//!     Mutex::new(RefCell::new(None));
//!
//! let source = cc2540_clock::clock_init(
//!     &mut unsafe { Cc2540::new() },
//!     unsafe { Cc2540::new() },
//! )?;
//! interrupt::free(|cs| TICKS.borrow(cs).replace(Some(source)));
//!
//! // ST_IRQ (vector 5)
//! fn sleep_timer_isr() {
//!     interrupt::free(|cs| {
//!         if let Some(source) = TICKS.borrow(cs).borrow_mut().as_mut() {
//!             source.on_interrupt(&ETIMERS);
//!         }
//!     });
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod etimer;
pub mod hal;
pub mod os;

pub use clock::{time_reached, Clock, ClockError, ClockStatus, ClockTime, TickSource};
pub use config::{CLOCK_SECOND, JIFFY_MS, TICK_INTERVAL};
pub use etimer::{EventTimers, NoEventTimers};

use hal::{ClockControl, SleepTimerRegisters};

/// The system clock
pub static CLOCK: Clock = Clock::new();

/// Start [`CLOCK`]. Call once, before anything else in this crate.
pub fn clock_init<C, R>(control: &mut C, regs: R) -> Result<TickSource<'static, R>, ClockError>
where
    C: ClockControl + ?Sized,
    R: SleepTimerRegisters,
{
    CLOCK.init(control, regs)
}

/// Ticks since [`clock_init`]
#[inline]
pub fn clock_time() -> ClockTime {
    CLOCK.time()
}

/// Seconds since [`clock_init`], truncated
#[inline]
pub fn clock_seconds() -> u32 {
    CLOCK.seconds()
}

/// Busy-wait for `ms` milliseconds (whole jiffies). Not from interrupt context.
pub fn clock_delay(ms: u32) {
    CLOCK.delay_ms(ms)
}

/// Busy-wait for `ticks` ticks. Not from interrupt context.
pub fn clock_wait(ticks: ClockTime) {
    CLOCK.wait(ticks)
}

/// Consume the etimer poll request raised by the tick interrupt.
pub fn etimer_poll_requested() -> bool {
    CLOCK.take_poll_request()
}
