//! Buffer Sizes
//!
//! Capacities of the fixed-size rings and queues. Everything is allocated
//! inline at construction, so these numbers are the whole memory budget.

/// Completed laps kept in the lap ring.
///
/// 10 laps × 4 bytes. Older laps are overwritten once the ring wraps; the
/// dashboard keeps its own full history from the lap events.
pub const LAP_HISTORY_SIZE: usize = 10;

/// Filtered samples kept in the RSSI ring.
///
/// 100 × 1 byte. Only the latest sample is read back.
pub const RSSI_HISTORY_SIZE: usize = 100;

/// Default capacity of [`crate::EventLog`].
pub const DEFAULT_EVENT_LOG_SIZE: usize = 16;

/// Capacity of the outbound event queue between the engine and the web feed.
///
/// heapless SPSC queues hold `N - 1` items; 8 covers a full countdown plus a
/// lap without the feed polling.
pub const EVENT_QUEUE_SIZE: usize = 8;
