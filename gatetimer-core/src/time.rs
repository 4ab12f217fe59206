//! Time management for the timing loops
//!
//! Everything in the engine is driven by a monotonic millisecond clock that
//! the caller samples once per tick and passes in. This module provides:
//! - The [`Timestamp`] type and the [`TimeSource`] abstraction
//! - A checked elapsed-time helper used by every timeout in the crate
//! - [`FixedTime`] for deterministic tests and [`StdClock`] for host builds
//!
//! ## Stale clocks
//!
//! The primary and background loops each snapshot the clock independently. A
//! command written by the primary loop can carry a start time that is *newer*
//! than the background loop's own snapshot, so `now - start` would underflow.
//! [`elapsed_since`] returns `None` for that case and callers treat it as
//! "no time has elapsed yet".

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;

    /// Get precision in milliseconds
    fn precision_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, or `None` if `now` is older
#[inline]
pub fn elapsed_since(now: Timestamp, since: Timestamp) -> Option<u64> {
    now.checked_sub(since)
}

/// Like [`elapsed_since`] but a stale `now` reads as zero elapsed
#[inline]
pub fn elapsed_or_zero(now: Timestamp, since: Timestamp) -> u64 {
    now.saturating_sub(since)
}

/// Clamp a millisecond span into a lap duration
#[inline]
pub fn span_ms(later: Timestamp, earlier: Timestamp) -> u32 {
    u32::try_from(later.saturating_sub(earlier)).unwrap_or(u32::MAX)
}

/// Monotonic clock backed by `std::time::Instant`
///
/// Starts at 0 when created, so timestamps match the device's "ms since boot".
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose zero is now
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute time, backwards jumps included
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp = self.timestamp.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}
