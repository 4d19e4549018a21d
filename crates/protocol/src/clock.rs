//! Wall-clock source for command encoding
//!
//! The rebirth command carries the current time. Encoders take a `Clock`
//! so tests can pin the timestamp.

use chrono::Utc;

/// Source of the current time in milliseconds since the Unix epoch
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}
