//!Test doubles shared across module tests
use core::cell::Cell;

use embedded_time::clock::Error;
use embedded_time::fraction::Fraction;
use embedded_time::{Clock, Instant};
use env_logger::Env;

pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("trace"))
        .is_test(true)
        .try_init();
}

/// Manually advanced millisecond clock
///
/// With an `auto` step the clock also moves forward on every read, so
/// busy-wait loops terminate without a real time source.
pub struct TestClock {
    now: Cell<u64>,
    auto_step: u64,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            auto_step: 0,
        }
    }

    pub fn auto(step_ms: u64) -> Self {
        Self {
            now: Cell::new(0),
            auto_step: step_ms,
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for TestClock {
    type T = u64;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, Error> {
        let now = self.now.get();
        self.now.set(now + self.auto_step);
        Ok(Instant::new(now))
    }
}
