use embedded_hal::blocking::delay::DelayMs;

use crate::clock::Clock;

/// Blocking millisecond delays on top of the tick clock
///
/// Resolution is one jiffy; shorter delays return immediately. Never use
/// this from the tick interrupt.
pub struct Delay<'a> {
    clock: &'a Clock,
}

impl<'a> Delay<'a> {
    pub fn new(clock: &'a Clock) -> Self {
        Self { clock }
    }
}

impl DelayMs<u32> for Delay<'_> {
    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl DelayMs<u16> for Delay<'_> {
    fn delay_ms(&mut self, ms: u16) {
        self.clock.delay_ms(u32::from(ms));
    }
}

impl DelayMs<u8> for Delay<'_> {
    fn delay_ms(&mut self, ms: u8) {
        self.clock.delay_ms(u32::from(ms));
    }
}
