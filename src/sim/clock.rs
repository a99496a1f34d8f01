//! Simulation time source
//!
//! A single monotonic millisecond counter advanced once per tick. Every timer
//! in the simulation reads `now` from here, so all comparisons inside one tick
//! agree with each other and tests never wait on a wall clock.

use serde::{Deserialize, Serialize};

/// Monotonic simulation clock (milliseconds since the run started)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    now_ms: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds
    #[inline]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move time forward (never backward)
    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
    }

    /// Milliseconds elapsed since `since`
    #[inline]
    pub fn elapsed_since(&self, since: u64) -> u64 {
        self.now_ms.saturating_sub(since)
    }
}

/// A "last fired + delay" timer. Ready once strictly more than `delay_ms`
/// has passed since the last trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub last_ms: u64,
    pub delay_ms: u64,
}

impl Cooldown {
    pub fn new(started_ms: u64, delay_ms: u64) -> Self {
        Self {
            last_ms: started_ms,
            delay_ms,
        }
    }

    #[inline]
    pub fn is_ready(&self, now: u64) -> bool {
        now.saturating_sub(self.last_ms) > self.delay_ms
    }

    /// Restart the timer from `now`, optionally with a new delay
    pub fn trigger(&mut self, now: u64, next_delay_ms: u64) {
        self.last_ms = now;
        self.delay_ms = next_delay_ms;
    }
}

/// A timed on/off flag: active until `duration_ms` has passed since `started_ms`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timed {
    pub active: bool,
    pub started_ms: u64,
    pub duration_ms: u64,
}

impl Timed {
    pub fn start(&mut self, now: u64, duration_ms: u64) {
        self.active = true;
        self.started_ms = now;
        self.duration_ms = duration_ms;
    }

    /// Clear the flag once its duration is exceeded; returns true on expiry
    pub fn expire(&mut self, now: u64) -> bool {
        if self.active && now.saturating_sub(self.started_ms) > self.duration_ms {
            self.active = false;
            return true;
        }
        false
    }

    /// Milliseconds left while active
    pub fn remaining(&self, now: u64) -> u64 {
        if !self.active {
            return 0;
        }
        (self.started_ms + self.duration_ms).saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_monotonically() {
        let mut clock = Clock::new();
        assert_eq!(clock.now(), 0);
        clock.advance(16);
        clock.advance(16);
        assert_eq!(clock.now(), 32);
        assert_eq!(clock.elapsed_since(10), 22);
        assert_eq!(clock.elapsed_since(100), 0);
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut cd = Cooldown::new(0, 200);
        assert!(!cd.is_ready(200));
        assert!(cd.is_ready(201));

        cd.trigger(201, 50);
        assert!(!cd.is_ready(251));
        assert!(cd.is_ready(252));
    }

    #[test]
    fn test_timed_expiry() {
        let mut t = Timed::default();
        assert!(!t.expire(1_000));

        t.start(100, 1000);
        assert_eq!(t.remaining(600), 500);
        assert!(!t.expire(1100));
        assert!(t.active);
        assert!(t.expire(1101));
        assert!(!t.active);
        assert_eq!(t.remaining(1200), 0);
    }
}
