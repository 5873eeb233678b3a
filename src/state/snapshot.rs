//! Read-only timer view handed to callbacks and the host

use serde::{Deserialize, Serialize};

use super::TimerState;
use crate::utils::{format_milliseconds, format_seconds, TimeBreakdown};

/// Formatted projection of a [`TimerState`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Breakdown of the current value
    #[serde(flatten)]
    pub current: TimeBreakdown,
    /// Current value in raw seconds
    pub time: u64,
    pub finish_time: TimeBreakdown,
    pub total_pause_time: TimeBreakdown,
    pub pause_time: TimeBreakdown,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_finished: bool,
    /// Epoch milliseconds at which the current pause began
    pub pause_start: Option<i64>,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            current: format_seconds(state.time as f64),
            time: state.time,
            finish_time: format_seconds(state.finish_time as f64),
            total_pause_time: format_milliseconds(state.total_pause_time as f64),
            pause_time: format_seconds(state.pause_time as f64),
            is_running: state.is_running,
            is_paused: state.is_paused,
            // Moving the counter off the target clears the finished flag
            is_finished: state.is_finished && state.is_terminal(),
            pause_start: state.pause_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_formats_fields() {
        let state = TimerState {
            time: 3_661,
            finish_time: 7_200,
            total_pause_time: 1_500,
            pause_time: 65,
            is_paused: true,
            pause_start: Some(99),
            ..TimerState::default()
        };
        let snapshot = TimerSnapshot::from(&state);
        assert_eq!(snapshot.time, 3_661);
        assert_eq!((snapshot.current.hours, snapshot.current.minutes, snapshot.current.seconds), (1, 1, 1));
        assert_eq!(snapshot.finish_time.hours, 2);
        assert_eq!(snapshot.total_pause_time.seconds, 1);
        assert_eq!(snapshot.total_pause_time.milliseconds, 500.0);
        assert_eq!(snapshot.pause_time.minutes, 1);
        assert_eq!(snapshot.pause_time.total_seconds, 65.0);
        assert!(snapshot.is_paused);
        assert_eq!(snapshot.pause_start, Some(99));
    }

    #[test]
    fn test_finished_only_while_terminal() {
        let finished = TimerState {
            time: 0,
            is_finished: true,
            ..TimerState::default()
        };
        assert!(TimerSnapshot::from(&finished).is_finished);

        let moved = TimerState { time: 5, ..finished };
        assert!(!TimerSnapshot::from(&moved).is_finished);
    }

    #[test]
    fn test_snapshot_serializes_flat_breakdown() {
        let snapshot = TimerSnapshot::from(&TimerState {
            time: 2,
            ..TimerState::default()
        });
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["time"], 2);
        assert_eq!(json["seconds"], 2);
        assert_eq!(json["total_milliseconds"], 2000.0);
        assert_eq!(json["pause_start"], serde_json::Value::Null);
        assert_eq!(json["pause_time"]["total_seconds"], 0.0);
    }
}
