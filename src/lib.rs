pub mod booking;
pub mod cli;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod models;

pub use models::*;

/// Slot grid granularity offered to customers, in minutes.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 15;

/// Minimum length of a rental that starts and ends on the same day, in hours.
pub const SAME_DAY_MIN_HOURS: i64 = 6;
