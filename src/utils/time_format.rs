//! Millisecond duration breakdown

use serde::{Deserialize, Serialize};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// A duration split into hours, minutes, seconds and milliseconds
///
/// The `total_*` fields keep the full precision of the input. Hours are not
/// folded into days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: f64,
    pub total_seconds: f64,
    pub total_milliseconds: f64,
}

/// Convert seconds to milliseconds
pub fn seconds_to_milliseconds(seconds: f64) -> f64 {
    seconds * MS_PER_SECOND
}

/// Break a duration given in seconds into its components
pub fn format_seconds(seconds: f64) -> TimeBreakdown {
    format_milliseconds(seconds_to_milliseconds(seconds))
}

/// Break a duration given in milliseconds into its components
///
/// Components of a negative duration are truncated toward zero, so each of
/// them carries the sign of the input. Non-finite input yields an all-zero
/// breakdown.
pub fn format_milliseconds(milliseconds: f64) -> TimeBreakdown {
    if !milliseconds.is_finite() {
        return TimeBreakdown::default();
    }

    let sign = if milliseconds < 0.0 { -1.0 } else { 1.0 };
    let abs = milliseconds.abs();

    let hours = (abs / MS_PER_HOUR).trunc();
    let minutes = ((abs % MS_PER_HOUR) / MS_PER_MINUTE).trunc();
    let seconds = ((abs % MS_PER_MINUTE) / MS_PER_SECOND).trunc();
    let rest = abs % MS_PER_SECOND;

    TimeBreakdown {
        hours: (sign * hours) as i64,
        minutes: (sign * minutes) as i64,
        seconds: (sign * seconds) as i64,
        milliseconds: sign * rest,
        total_seconds: milliseconds / MS_PER_SECOND,
        total_milliseconds: milliseconds,
    }
}
