//! Time sources for the loop

use std::time::{Duration, Instant};

/// Millisecond clock the runner paces itself against
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> f64;

    /// Block for `ms` milliseconds (callers never pass a negative value)
    fn sleep_ms(&mut self, ms: f64);
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn sleep_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

/// Simulated clock: sleeping advances time instantly
///
/// Runs a loop as fast as the CPU allows while still feeding it the
/// deltas it would see in real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: f64) {
        self.advance(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_ignores_negative() {
        let mut clock = ManualClock::new();
        clock.sleep_ms(5.0);
        clock.sleep_ms(-3.0);
        assert_eq!(clock.now_ms(), 5.0);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let mut clock = SystemClock::default();
        let a = clock.now_ms();
        clock.sleep_ms(1.0);
        assert!(clock.now_ms() > a);
    }
}
