use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of time for the simulated processing delay.
///
/// Production code sleeps for real; tests use [`ManualPacer`], whose clock
/// only moves when something sleeps on it.
pub trait Pacer {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPacer;

impl Pacer for SystemPacer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: `sleep` advances time instantly.
#[derive(Debug)]
pub struct ManualPacer {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualPacer {
    pub fn new() -> Self {
        ManualPacer { origin: Instant::now(), offset: Cell::new(Duration::ZERO) }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Total virtual time slept or advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualPacer {
    fn default() -> Self {
        ManualPacer::new()
    }
}

impl Pacer for ManualPacer {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_on_sleep() {
        let pacer = ManualPacer::new();
        let t0 = pacer.now();
        assert_eq!(pacer.now(), t0);
        pacer.sleep(Duration::from_millis(2500));
        assert_eq!(pacer.now() - t0, Duration::from_millis(2500));
    }
}
