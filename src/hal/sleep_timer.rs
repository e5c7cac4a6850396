use core::convert::Infallible;

/// 24-bit sleep timer value, kept in the low bits of a `u32`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U24(u32);

impl U24 {
    const MASK: u32 = 0x00FF_FFFF;

    pub const ZERO: U24 = U24(0);
    pub const MAX: U24 = U24(Self::MASK);

    /// Truncates `value` to 24 bits.
    #[inline]
    pub const fn new(value: u32) -> Self {
        U24(value & Self::MASK)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Addition modulo 2^24
    #[inline]
    pub const fn wrapping_add(self, rhs: U24) -> Self {
        U24::new(self.0.wrapping_add(rhs.0))
    }

    /// Subtraction modulo 2^24; `compare.wrapping_sub(counter)` is the number
    /// of counts left before the compare fires.
    #[inline]
    pub const fn wrapping_sub(self, rhs: U24) -> Self {
        U24::new(self.0.wrapping_sub(rhs.0))
    }

    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 3]) -> Self {
        U24(bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16)
    }

    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 3] {
        [self.0 as u8, (self.0 >> 8) as u8, (self.0 >> 16) as u8]
    }
}

/// One byte of the ST2:ST1:ST0 register triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StByte {
    Low = 0,
    Mid = 1,
    High = 2,
}

/// Register-level access to a sleep timer
///
/// Reads return the running counter, writes set the compare value. Reading
/// `Low` latches `Mid` and `High`; writing `Low` loads the new compare value.
pub trait SleepTimerRegisters {
    fn read_byte(&mut self, byte: StByte) -> u8;
    fn write_byte(&mut self, byte: StByte, value: u8);

    /// STLOAD.LDRDY: a new compare value may be written
    fn load_ready(&mut self) -> bool;

    fn enable_interrupt(&mut self);
    fn clear_interrupt_flag(&mut self);
}

pub struct SleepTimer<R> {
    regs: R,
}

impl<R: SleepTimerRegisters> SleepTimer<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Snapshot of the free-running counter.
    pub fn read_raw_counter(&mut self) -> U24 {
        // ST0 first: it latches ST1 and ST2
        let low = self.regs.read_byte(StByte::Low);
        let mid = self.regs.read_byte(StByte::Mid);
        let high = self.regs.read_byte(StByte::High);
        U24::from_le_bytes([low, mid, high])
    }

    /// Write `compare` if the timer accepts a load right now.
    pub fn try_load_compare(&mut self, compare: U24) -> nb::Result<(), Infallible> {
        if !self.regs.load_ready() {
            return Err(nb::Error::WouldBlock);
        }

        let [low, mid, high] = compare.to_le_bytes();
        // ST0 last: writing it adopts the whole value
        self.regs.write_byte(StByte::High, high);
        self.regs.write_byte(StByte::Mid, mid);
        self.regs.write_byte(StByte::Low, low);
        Ok(())
    }

    /// Schedule the next interrupt `interval` counts from now and return the
    /// compare value written.
    ///
    /// LDRDY is polled without a timeout; it is normally set already.
    pub fn arm_next_compare(&mut self, interval: U24) -> U24 {
        let compare = self.read_raw_counter().wrapping_add(interval);
        match nb::block!(self.try_load_compare(compare)) {
            Ok(()) => compare,
            Err(never) => match never {},
        }
    }

    #[inline]
    pub fn enable_interrupt(&mut self) {
        self.regs.enable_interrupt();
    }

    #[inline]
    pub fn clear_interrupt_flag(&mut self) {
        self.regs.clear_interrupt_flag();
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn release(self) -> R {
        self.regs
    }
}
