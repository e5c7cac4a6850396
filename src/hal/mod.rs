#[cfg(feature = "cc2540")]
pub mod cc2540;
pub mod clock_source;
pub mod delay;
pub mod sleep_timer;

// Re-export commonly used types
#[cfg(feature = "cc2540")]
pub use cc2540::Cc2540;
pub use clock_source::{init_system_clock, ClockControl};
pub use delay::Delay;
pub use sleep_timer::{SleepTimer, SleepTimerRegisters, StByte, U24};
