//! Utility functions module
//!
//! Time formatting, clock sources and signal handling.

pub mod clock;
pub mod signals;
pub mod time_format;

// Re-export main functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use signals::shutdown_signal;
pub use time_format::{format_milliseconds, format_seconds, seconds_to_milliseconds, TimeBreakdown};
