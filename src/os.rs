//! State shared between the sleep timer interrupt and mainline code
//!
//! Both cells have exactly one writer context. Targets with native 32-bit
//! atomics use plain atomic loads and stores; no read-modify-write
//! instruction is needed with a single writer. On narrower cores (8051, AVR,
//! msp430) a 32-bit load is several byte reads that the tick interrupt can
//! split, so the word is only touched with interrupts masked:
//! `avr_device::interrupt::free` on AVR, `critical_section::with` elsewhere.

use crate::clock::ClockTime;

#[cfg(target_has_atomic = "32")]
mod imp {
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    pub struct Word(AtomicU32);

    impl Word {
        pub const fn new(value: u32) -> Self {
            Self(AtomicU32::new(value))
        }

        #[inline]
        pub fn get(&self) -> u32 {
            self.0.load(Ordering::Acquire)
        }

        #[inline]
        pub fn set(&self, value: u32) {
            self.0.store(value, Ordering::Release);
        }
    }

    pub struct Flag(AtomicBool);

    impl Flag {
        pub const fn new() -> Self {
            Self(AtomicBool::new(false))
        }

        #[inline]
        pub fn get(&self) -> bool {
            self.0.load(Ordering::Acquire)
        }

        #[inline]
        pub fn set(&self, value: bool) {
            self.0.store(value, Ordering::Release);
        }
    }
}

#[cfg(all(not(target_has_atomic = "32"), target_arch = "avr"))]
mod imp {
    use avr_device::interrupt::{self, Mutex};
    use core::cell::Cell;

    pub struct Word(Mutex<Cell<u32>>);

    impl Word {
        pub const fn new(value: u32) -> Self {
            Self(Mutex::new(Cell::new(value)))
        }

        #[inline]
        pub fn get(&self) -> u32 {
            interrupt::free(|cs| self.0.borrow(cs).get())
        }

        #[inline]
        pub fn set(&self, value: u32) {
            interrupt::free(|cs| self.0.borrow(cs).set(value));
        }
    }

    pub struct Flag(Mutex<Cell<bool>>);

    impl Flag {
        pub const fn new() -> Self {
            Self(Mutex::new(Cell::new(false)))
        }

        #[inline]
        pub fn get(&self) -> bool {
            interrupt::free(|cs| self.0.borrow(cs).get())
        }

        #[inline]
        pub fn set(&self, value: bool) {
            interrupt::free(|cs| self.0.borrow(cs).set(value));
        }
    }
}

#[cfg(all(not(target_has_atomic = "32"), not(target_arch = "avr")))]
mod imp {
    use core::cell::Cell;
    use critical_section::Mutex;

    pub struct Word(Mutex<Cell<u32>>);

    impl Word {
        pub const fn new(value: u32) -> Self {
            Self(Mutex::new(Cell::new(value)))
        }

        #[inline]
        pub fn get(&self) -> u32 {
            critical_section::with(|cs| self.0.borrow(cs).get())
        }

        #[inline]
        pub fn set(&self, value: u32) {
            critical_section::with(|cs| self.0.borrow(cs).set(value));
        }
    }

    pub struct Flag(Mutex<Cell<bool>>);

    impl Flag {
        pub const fn new() -> Self {
            Self(Mutex::new(Cell::new(false)))
        }

        #[inline]
        pub fn get(&self) -> bool {
            critical_section::with(|cs| self.0.borrow(cs).get())
        }

        #[inline]
        pub fn set(&self, value: bool) {
            critical_section::with(|cs| self.0.borrow(cs).set(value));
        }
    }
}

/// Number of ticks since the clock started
///
/// Written only by the tick interrupt, readable from any context.
pub struct TickCounter {
    count: imp::Word,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            count: imp::Word::new(0),
        }
    }

    #[cfg(test)]
    pub(crate) const fn starting_at(count: ClockTime) -> Self {
        Self {
            count: imp::Word::new(count),
        }
    }

    /// Current tick count
    #[inline]
    pub fn get(&self) -> ClockTime {
        self.count.get()
    }

    /// Advance by one tick and return the new count. Interrupt context only.
    #[inline]
    pub(crate) fn increment(&self) -> ClockTime {
        let count = self.count.get().wrapping_add(1);
        self.count.set(count);
        count
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Deferred "re-poll your timer list" request raised by the tick interrupt
pub struct PollSignal {
    requested: imp::Flag,
}

impl PollSignal {
    pub const fn new() -> Self {
        Self {
            requested: imp::Flag::new(),
        }
    }

    #[inline]
    pub(crate) fn raise(&self) {
        self.requested.set(true);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.requested.get()
    }

    /// Consume a pending request.
    ///
    /// A request raised between the load and the clear is folded into the
    /// one being consumed: the consumer walks the whole timer list anyway.
    pub fn take(&self) -> bool {
        if self.requested.get() {
            self.requested.set(false);
            true
        } else {
            false
        }
    }
}

impl Default for PollSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot latch used for the Uninitialized -> Running transition
pub(crate) struct RunState {
    running: imp::Flag,
}

impl RunState {
    pub const fn new() -> Self {
        Self {
            running: imp::Flag::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    #[inline]
    pub fn start(&self) {
        self.running.set(true);
    }
}
