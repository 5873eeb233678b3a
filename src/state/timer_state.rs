//! Timer state record and its initial configuration

use serde::{Deserialize, Serialize};

/// Initial values a timer is (re)built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Starting value in seconds
    pub time: u64,
    /// Target in seconds when counting up, 0 when counting down
    pub finish_time: u64,
    pub count_up: bool,
    pub auto_start: bool,
}

impl TimerConfig {
    /// Build a countdown from `seconds` to zero
    pub fn countdown(seconds: u64) -> Self {
        Self {
            time: seconds,
            finish_time: 0,
            count_up: false,
            auto_start: false,
        }
    }

    /// Build a count-up from zero to `seconds`
    pub fn count_up_to(seconds: u64) -> Self {
        Self {
            time: 0,
            finish_time: seconds,
            count_up: true,
            auto_start: false,
        }
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}

/// Full timer state, changed only through [`reduce`](super::reduce)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    /// Current value in seconds
    pub time: u64,
    /// Target in seconds when counting up
    pub finish_time: u64,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_finished: bool,
    /// Epoch milliseconds at which the current pause began
    pub pause_start: Option<i64>,
    /// Sealed pause duration of all finished pause episodes, in milliseconds
    pub total_pause_time: u64,
    /// Length of the current pause episode in seconds
    pub pause_time: u64,
    pub count_up: bool,
}

impl TimerState {
    /// Create the state a timer starts in for `config`
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            time: config.time,
            finish_time: config.finish_time,
            is_running: config.auto_start,
            count_up: config.count_up,
            ..Self::default()
        }
    }

    /// The value this timer counts toward
    pub fn target(&self) -> u64 {
        if self.count_up { self.finish_time } else { 0 }
    }

    /// Whether the counter sits on its target
    pub fn at_target(&self) -> bool {
        self.time == self.target()
    }

    /// Whether the counter reached its target and stopped
    pub fn is_terminal(&self) -> bool {
        self.time == self.finish_time && !self.is_running
    }

    /// Whether a pause episode is in progress
    pub fn in_pause_episode(&self) -> bool {
        self.pause_start.is_some()
    }
}

/// Effective total pause time in milliseconds at `now_millis`
///
/// Outside a pause episode this is the sealed total. During one, the time
/// since the pause began is added, never less than zero so that a clock
/// stepping backwards cannot shrink the total.
pub fn pause_elapsed(state: &TimerState, now_millis: i64) -> u64 {
    match state.pause_start {
        None => state.total_pause_time,
        Some(start) => {
            let running = now_millis.saturating_sub(start).max(0) as u64;
            state.total_pause_time.saturating_add(running)
        }
    }
}
