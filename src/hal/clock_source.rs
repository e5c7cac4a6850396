//! System clock source selection
//!
//! The radio needs the 32 MHz crystal oscillator, so the system clock is
//! switched from the 16 MHz RC oscillator to XOSC at full speed.

use core::convert::Infallible;

/// CLKCONCMD.OSC: set selects the 16 MHz RC oscillator
pub const CLKCON_OSC: u8 = 1 << 6;
/// CLKCONCMD.CLKSPD: system clock divider, 0 is 32 MHz
pub const CLKCON_CLKSPD_MASK: u8 = 0x07;

/// Clock control command/status register pair
pub trait ClockControl {
    /// CLKCONCMD
    fn command(&mut self) -> u8;
    fn set_command(&mut self, value: u8);
    /// CLKCONSTA, follows CLKCONCMD once the change has taken effect
    fn status(&mut self) -> u8;
}

/// Ready once the hardware reports the commanded configuration as active.
pub fn try_confirm<C: ClockControl + ?Sized>(control: &mut C) -> nb::Result<(), Infallible> {
    if control.status() == control.command() {
        Ok(())
    } else {
        Err(nb::Error::WouldBlock)
    }
}

/// Select the 32 MHz crystal and wait for it to take over.
///
/// Hangs if the oscillator never comes up.
pub fn init_system_clock<C: ClockControl + ?Sized>(control: &mut C) {
    let command = control.command() & !CLKCON_OSC;
    control.set_command(command);

    let command = control.command() & !CLKCON_CLKSPD_MASK;
    control.set_command(command);

    match nb::block!(try_confirm(control)) {
        Ok(()) => log::debug!("32 MHz XOSC active, CLKCONCMD={:#04x}", command),
        Err(never) => match never {},
    }
}
