//! Wall-clock abstraction for the countdown component.
//!
//! The countdown never assumes a clock reading means anything on its own;
//! all of its arithmetic is the difference between two samples taken from
//! the same [`Clock`]. That keeps the engine correct when ticks arrive late
//! or get coalesced by the host, and it makes the whole state machine
//! testable without sleeping: hand the model a [`ManualClock`] and advance
//! it by hand.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_countdown::clock::{Clock, ManualClock};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualClock::new());
//! let before = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now() - before, Duration::from_secs(5));
//! ```

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A source of monotonically non-decreasing timestamps.
///
/// Implementations must guarantee that successive calls to [`now`](Clock::now)
/// within one model's lifetime never go backwards. Nothing else is assumed:
/// the countdown only ever subtracts one sample from another.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The host's monotonic clock, backed by [`Instant::now`].
///
/// This is the clock every model uses unless one is injected with
/// [`with_clock`](crate::countdown::Model::with_clock).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually driven clock for deterministic tests.
///
/// Time only moves when [`advance`](ManualClock::advance) is called, so a
/// test can simulate an arbitrarily late tick, a paused stretch of real
/// time, or an exact zero crossing.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now(), start + Duration::from_millis(250));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward by `amount`.
    pub fn advance(&self, amount: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += amount;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
