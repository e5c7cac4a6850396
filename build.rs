use std::env;

// 32 kHz sleep timer crystal
const SLEEP_TIMER_HZ: u32 = 32 * 1024;
const DEFAULT_CLOCK_SECOND: u32 = 128;

fn main() {
    println!("cargo:rerun-if-env-changed=CLOCK_CONF_SECOND");
    println!("cargo:rerun-if-changed=build.rs");

    let clock_second = match env::var("CLOCK_CONF_SECOND") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .unwrap_or_else(|_| panic!("CLOCK_CONF_SECOND must be an integer, got {:?}", raw)),
        Err(_) => DEFAULT_CLOCK_SECOND,
    };

    if clock_second == 0 || clock_second > 1000 {
        panic!("CLOCK_CONF_SECOND must be within 1..=1000, got {}", clock_second);
    }
    if SLEEP_TIMER_HZ % clock_second != 0 {
        panic!(
            "CLOCK_CONF_SECOND ({}) must divide the {} Hz sleep timer clock",
            clock_second, SLEEP_TIMER_HZ
        );
    }

    // Tick rate for the clock constants
    println!("cargo:rustc-env=CLOCK_CONF_SECOND={}", clock_second);
}
