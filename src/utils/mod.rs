//! Utility functions for string and date formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{hour_minute, long_date, short_date, time_range, truncate};
