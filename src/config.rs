//! Configuration constants for the sleep-timer clock

use crate::hal::sleep_timer::U24;

/// Sleep timer input clock in Hz (32 kHz crystal)
pub const SLEEP_TIMER_HZ: u32 = 32 * 1024;

/// Clock ticks per second, set at build time through `CLOCK_CONF_SECOND`
pub const CLOCK_SECOND: u32 = parse_decimal(env!("CLOCK_CONF_SECOND"));

/// Length of one tick in whole milliseconds
pub const JIFFY_MS: u32 = 1000 / CLOCK_SECOND;

/// Sleep timer counts between two tick interrupts
pub const TICK_INTERVAL: U24 = U24::new(SLEEP_TIMER_HZ / CLOCK_SECOND);

const _: () = assert!(CLOCK_SECOND > 0 && CLOCK_SECOND <= 1000);
const _: () = assert!(SLEEP_TIMER_HZ % CLOCK_SECOND == 0);
const _: () = assert!(SLEEP_TIMER_HZ / CLOCK_SECOND <= U24::MAX.get());

const fn parse_decimal(s: &str) -> u32 {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty());

    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit >= b'0' && digit <= b'9');
        value = value * 10 + (digit - b'0') as u32;
        i += 1;
    }
    value
}
