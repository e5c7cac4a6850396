//! Simulated CC2540 sleep timer and clock control registers

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cc2540_clock::hal::{ClockControl, SleepTimerRegisters, StByte, U24};
use cc2540_clock::{Clock, ClockTime, EventTimers, TickSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Read(StByte),
    Write(StByte, u8),
    LoadPoll(bool),
    InterruptEnabled,
    FlagCleared,
    EtimerQuery(ClockTime),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct SimSleepTimer {
    pub counter: U24,
    pub compare: U24,
    staged: [u8; 2],
    latched: [u8; 2],
    pub busy_polls: u32,
    pub interrupt_enabled: bool,
    pub interrupt_flag: bool,
    pub log: Log,
}

impl SimSleepTimer {
    pub fn new(counter: u32) -> Self {
        Self {
            counter: U24::new(counter),
            compare: U24::ZERO,
            staged: [0; 2],
            latched: [0; 2],
            busy_polls: 0,
            interrupt_enabled: false,
            interrupt_flag: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Run the counter up to the compare match plus `latency` counts of
    /// interrupt entry delay, and raise STIF.
    pub fn fire(&mut self, latency: u32) {
        self.counter = self.compare.wrapping_add(U24::new(latency));
        self.interrupt_flag = true;
    }

    pub fn take_log(&self) -> Vec<Event> {
        self.log.borrow_mut().drain(..).collect()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl SleepTimerRegisters for SimSleepTimer {
    fn read_byte(&mut self, byte: StByte) -> u8 {
        self.record(Event::Read(byte));
        let [low, mid, high] = self.counter.to_le_bytes();
        match byte {
            StByte::Low => {
                self.latched = [mid, high];
                low
            }
            StByte::Mid => self.latched[0],
            StByte::High => self.latched[1],
        }
    }

    fn write_byte(&mut self, byte: StByte, value: u8) {
        self.record(Event::Write(byte, value));
        match byte {
            StByte::Low => {
                self.compare = U24::from_le_bytes([value, self.staged[0], self.staged[1]]);
            }
            StByte::Mid => self.staged[0] = value,
            StByte::High => self.staged[1] = value,
        }
    }

    fn load_ready(&mut self) -> bool {
        let ready = if self.busy_polls == 0 {
            true
        } else {
            self.busy_polls -= 1;
            false
        };
        self.record(Event::LoadPoll(ready));
        ready
    }

    fn enable_interrupt(&mut self) {
        self.record(Event::InterruptEnabled);
        self.interrupt_enabled = true;
    }

    fn clear_interrupt_flag(&mut self) {
        self.record(Event::FlagCleared);
        self.interrupt_flag = false;
    }
}

/// CLKCONCMD/CLKCONSTA pair starting from the reset value
pub struct SimClockControl {
    pub command: u8,
    pub status: u8,
    pub settle_polls: u32,
}

impl SimClockControl {
    pub fn new(settle_polls: u32) -> Self {
        Self {
            command: 0xC9,
            status: 0xC9,
            settle_polls,
        }
    }
}

impl ClockControl for SimClockControl {
    fn command(&mut self) -> u8 {
        self.command
    }

    fn set_command(&mut self, value: u8) {
        self.command = value;
    }

    fn status(&mut self) -> u8 {
        if self.settle_polls == 0 {
            self.status = self.command;
        } else {
            self.settle_polls -= 1;
        }
        self.status
    }
}

/// Event timer list with at most one timer, logging every query
pub struct SimEventTimers<'a> {
    pub expiration: Cell<Option<ClockTime>>,
    clock: &'a Clock,
    log: Log,
}

impl<'a> SimEventTimers<'a> {
    pub fn new(clock: &'a Clock, log: Log) -> Self {
        Self {
            expiration: Cell::new(None),
            clock,
            log,
        }
    }
}

impl EventTimers for SimEventTimers<'_> {
    fn pending(&self) -> bool {
        self.log
            .borrow_mut()
            .push(Event::EtimerQuery(self.clock.time()));
        self.expiration.get().is_some()
    }

    fn next_expiration(&self) -> ClockTime {
        self.expiration.get().unwrap_or(0)
    }
}

/// One compare match followed by the interrupt handler
pub fn fire<E: EventTimers + ?Sized>(source: &mut TickSource<'_, SimSleepTimer>, timers: &E) {
    source.timer_mut().registers_mut().fire(3);
    source.on_interrupt(timers);
}
