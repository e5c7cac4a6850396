//! CC2540 register backend
//!
//! The 8051 SFRs are mirrored in XDATA at `0x7000 + sfr`, so every register
//! the clock needs is reachable through a plain volatile pointer.

use core::ptr;

use super::clock_source::ClockControl;
use super::sleep_timer::{SleepTimerRegisters, StByte};

pub const ST0: u8 = 0x95;
pub const ST1: u8 = 0x96;
pub const ST2: u8 = 0x97;
pub const STLOAD: u8 = 0xAD;
pub const IEN0: u8 = 0xA8;
pub const IRCON: u8 = 0xC0;
pub const CLKCONCMD: u8 = 0xC6;
pub const CLKCONSTA: u8 = 0x9E;

const STLOAD_LDRDY: u8 = 1 << 0;
const IEN0_STIE: u8 = 1 << 5;
const IRCON_STIF: u8 = 1 << 7;

pub struct Cc2540 {
    base: *mut u8,
}

// The SFR block is global hardware, not thread-local memory.
unsafe impl Send for Cc2540 {}

impl Cc2540 {
    pub const XDATA_SFR_BASE: usize = 0x7000;

    /// # Safety
    /// Only one handle may drive a given register at a time.
    pub unsafe fn new() -> Self {
        Self::with_base(Self::XDATA_SFR_BASE as *mut u8)
    }

    /// # Safety
    /// `base` must be valid for volatile reads and writes of 256 bytes.
    pub unsafe fn with_base(base: *mut u8) -> Self {
        Self { base }
    }

    #[inline]
    fn read(&self, sfr: u8) -> u8 {
        unsafe { ptr::read_volatile(self.base.add(sfr as usize)) }
    }

    #[inline]
    fn write(&mut self, sfr: u8, value: u8) {
        unsafe { ptr::write_volatile(self.base.add(sfr as usize), value) }
    }

    #[inline]
    fn modify(&mut self, sfr: u8, f: impl FnOnce(u8) -> u8) {
        let value = f(self.read(sfr));
        self.write(sfr, value);
    }
}

impl SleepTimerRegisters for Cc2540 {
    fn read_byte(&mut self, byte: StByte) -> u8 {
        match byte {
            StByte::Low => self.read(ST0),
            StByte::Mid => self.read(ST1),
            StByte::High => self.read(ST2),
        }
    }

    fn write_byte(&mut self, byte: StByte, value: u8) {
        match byte {
            StByte::Low => self.write(ST0, value),
            StByte::Mid => self.write(ST1, value),
            StByte::High => self.write(ST2, value),
        }
    }

    fn load_ready(&mut self) -> bool {
        self.read(STLOAD) & STLOAD_LDRDY != 0
    }

    fn enable_interrupt(&mut self) {
        self.modify(IEN0, |r| r | IEN0_STIE);
    }

    fn clear_interrupt_flag(&mut self) {
        self.modify(IRCON, |r| r & !IRCON_STIF);
    }
}

impl ClockControl for Cc2540 {
    fn command(&mut self) -> u8 {
        self.read(CLKCONCMD)
    }

    fn set_command(&mut self, value: u8) {
        self.write(CLKCONCMD, value);
    }

    fn status(&mut self) -> u8 {
        self.read(CLKCONSTA)
    }
}
