//! Tick clock driven by the sleep timer compare interrupt
//!
//! [`Clock`] is the mainline side: it can be placed in a `static`, read from
//! anywhere and spun on. [`TickSource`] is handed out once by
//! [`Clock::init`] and owns the sleep timer; the board's interrupt handler
//! calls [`TickSource::on_interrupt`] on every compare match.

use core::fmt;

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::config::{CLOCK_SECOND, JIFFY_MS, TICK_INTERVAL};
use crate::etimer::{self, EventTimers};
use crate::hal::clock_source::{self, ClockControl};
use crate::hal::sleep_timer::{SleepTimer, SleepTimerRegisters, U24};
use crate::os::{PollSignal, RunState, TickCounter};

/// Tick count since `clock_init`. Wraps after 2^32 ticks (~388 days at 128 Hz).
pub type ClockTime = u32;

/// Wraparound-safe `now >= deadline`, valid while the two are less than
/// 2^31 ticks apart.
#[inline]
pub fn time_reached(now: ClockTime, deadline: ClockTime) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// `init` was already called; the sleep timer belongs to the first caller
    AlreadyRunning,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::AlreadyRunning => f.write_str("clock already initialized"),
        }
    }
}

pub struct Clock {
    ticks: TickCounter,
    poll: PollSignal,
    state: RunState,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            ticks: TickCounter::new(),
            poll: PollSignal::new(),
            state: RunState::new(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn starting_at(ticks: ClockTime) -> Self {
        Self {
            ticks: TickCounter::starting_at(ticks),
            poll: PollSignal::new(),
            state: RunState::new(),
        }
    }

    /// Start the clock: switch to the 32 MHz crystal, arm the first compare
    /// and enable the sleep timer interrupt.
    ///
    /// The returned [`TickSource`] must be handed to the interrupt handler.
    /// Global interrupts are left as they are.
    pub fn init<C, R>(&self, control: &mut C, regs: R) -> Result<TickSource<'_, R>, ClockError>
    where
        C: ClockControl + ?Sized,
        R: SleepTimerRegisters,
    {
        if self.state.is_running() {
            return Err(ClockError::AlreadyRunning);
        }

        clock_source::init_system_clock(control);

        let mut timer = SleepTimer::new(regs);
        let compare = timer.arm_next_compare(TICK_INTERVAL);
        log::debug!("sleep timer compare armed at {:#08x}", compare.get());
        timer.enable_interrupt();

        self.state.start();
        log::info!(
            "clock running: {} ticks/s, {} counts per tick",
            CLOCK_SECOND,
            TICK_INTERVAL.get()
        );

        Ok(TickSource {
            clock: self,
            timer,
        })
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Current tick count. No side effects, safe from any context.
    #[inline]
    pub fn time(&self) -> ClockTime {
        self.ticks.get()
    }

    /// Whole seconds since start
    #[inline]
    pub fn seconds(&self) -> u32 {
        self.time() / CLOCK_SECOND
    }

    /// Spin until `ticks` ticks have elapsed.
    ///
    /// Never call this from the tick interrupt: the counter only advances
    /// there.
    pub fn wait(&self, ticks: ClockTime) {
        let start = self.time();
        while self.time().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }

    /// Spin for `ms` milliseconds, rounded down to whole jiffies.
    pub fn delay_ms(&self, ms: u32) {
        self.wait(ms / JIFFY_MS);
    }

    /// Take the poll request left by the tick interrupt, if any.
    pub fn take_poll_request(&self) -> bool {
        self.poll.take()
    }

    pub fn status(&self) -> ClockStatus {
        let ticks = self.time();
        ClockStatus {
            ticks,
            seconds: ticks / CLOCK_SECOND,
            poll_pending: self.poll.is_raised(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt side of a running [`Clock`]
pub struct TickSource<'a, R> {
    clock: &'a Clock,
    timer: SleepTimer<R>,
}

impl<'a, R: SleepTimerRegisters> TickSource<'a, R> {
    /// Sleep timer compare interrupt body.
    ///
    /// Counts the tick, re-arms the compare before anything else can delay
    /// it, then leaves a poll request if an event timer is due.
    pub fn on_interrupt<E: EventTimers + ?Sized>(&mut self, timers: &E) {
        let now = self.clock.ticks.increment();

        self.timer.arm_next_compare(TICK_INTERVAL);

        if etimer::expired(timers, now) {
            self.clock.poll.raise();
        }

        self.timer.clear_interrupt_flag();
    }

    pub fn clock(&self) -> &'a Clock {
        self.clock
    }

    /// Raw sleep timer counter
    pub fn raw_counter(&mut self) -> U24 {
        self.timer.read_raw_counter()
    }

    pub fn timer(&self) -> &SleepTimer<R> {
        &self.timer
    }

    /// Register access for simulated timers. Re-arming from here bypasses
    /// the interrupt, so firmware never calls it.
    #[doc(hidden)]
    pub fn timer_mut(&mut self) -> &mut SleepTimer<R> {
        &mut self.timer
    }
}

/// Snapshot for console output: `ticks=<n> seconds=<s> poll=<yes|no>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    pub ticks: ClockTime,
    pub seconds: u32,
    pub poll_pending: bool,
}

impl uDisplay for ClockStatus {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let poll = if self.poll_pending { "yes" } else { "no" };
        uwrite!(f, "ticks={} seconds={} poll={}", self.ticks, self.seconds, poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::string::String;

    struct Console(String);

    impl uWrite for Console {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn time_reached_handles_wrap() {
        assert!(time_reached(10, 10));
        assert!(time_reached(11, 10));
        assert!(!time_reached(9, 10));
        assert!(time_reached(2, u32::MAX));
        assert!(!time_reached(u32::MAX, 2));
    }

    #[test]
    fn seconds_truncate() {
        assert_eq!(Clock::starting_at(CLOCK_SECOND - 1).seconds(), 0);
        assert_eq!(Clock::starting_at(CLOCK_SECOND).seconds(), 1);
        assert_eq!(Clock::starting_at(7 * CLOCK_SECOND + CLOCK_SECOND / 2).seconds(), 7);
    }

    #[test]
    fn seconds_follow_the_counter_through_wrap() {
        let clock = Clock::starting_at(u32::MAX);
        assert_eq!(clock.seconds(), u32::MAX / CLOCK_SECOND);

        clock.ticks.increment();
        assert_eq!(clock.time(), 0);
        assert_eq!(clock.seconds(), 0);
    }

    #[test]
    fn zero_tick_wait_returns_immediately() {
        let clock = Clock::starting_at(u32::MAX - 1);
        clock.wait(0);
        clock.delay_ms(JIFFY_MS - 1);
        assert_eq!(clock.time(), u32::MAX - 1);
    }

    #[test]
    fn wait_crosses_counter_wrap() {
        let clock = Clock::starting_at(u32::MAX - 5);

        std::thread::scope(|s| {
            let waiter = s.spawn(|| {
                let start = clock.time();
                clock.wait(20);
                clock.time().wrapping_sub(start)
            });

            let mut fired = 0;
            while !waiter.is_finished() {
                assert!(fired < 100_000, "wait never returned");
                clock.ticks.increment();
                fired += 1;
                std::thread::sleep(std::time::Duration::from_micros(20));
            }
            assert!(waiter.join().unwrap() >= 20);
        });
        assert!(clock.time() >= 14 && clock.time() < u32::MAX - 5);
    }

    #[test]
    fn status_renders_for_console() {
        let ticks = 2 * CLOCK_SECOND + CLOCK_SECOND / 3;
        let clock = Clock::starting_at(ticks);
        clock.poll.raise();

        let mut console = Console(String::new());
        uwrite!(console, "{}", clock.status()).unwrap();
        assert_eq!(console.0, std::format!("ticks={} seconds=2 poll=yes", ticks));

        if CLOCK_SECOND == 128 {
            let clock = Clock::starting_at(300);
            let mut console = Console(String::new());
            uwrite!(console, "{}", clock.status()).unwrap();
            assert_eq!(console.0, "ticks=300 seconds=2 poll=no");
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(
            std::format!("{}", ClockError::AlreadyRunning),
            "clock already initialized"
        );
    }
}
