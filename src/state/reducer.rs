//! Timer transitions

use super::timer_state::{pause_elapsed, TimerConfig, TimerState};

/// Events that drive a [`TimerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Start,
    Pause,
    /// One second of running time
    Tick,
    /// One second of pause time
    PauseTick,
    /// Rebuild the state from a configuration
    Reset(TimerConfig),
    /// Overwrite the counter without touching anything else
    SetTime(u64),
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Start => "start",
            TimerEvent::Pause => "pause",
            TimerEvent::Tick => "tick",
            TimerEvent::PauseTick => "pause-tick",
            TimerEvent::Reset(_) => "reset",
            TimerEvent::SetTime(_) => "set-time",
        }
    }
}

/// Apply `event` to `state` at wall-clock time `now_millis`
pub fn reduce(state: &TimerState, event: TimerEvent, now_millis: i64) -> TimerState {
    match event {
        TimerEvent::Start => TimerState {
            is_running: true,
            is_paused: false,
            is_finished: false,
            total_pause_time: pause_elapsed(state, now_millis),
            pause_start: None,
            pause_time: 0,
            ..state.clone()
        },
        TimerEvent::Pause => TimerState {
            is_running: false,
            is_paused: true,
            pause_start: Some(now_millis),
            ..state.clone()
        },
        TimerEvent::Tick => tick(state),
        TimerEvent::PauseTick => {
            if state.is_running {
                return state.clone();
            }
            TimerState {
                pause_time: state.pause_time + 1,
                ..state.clone()
            }
        }
        TimerEvent::Reset(config) => TimerState::new(&config),
        TimerEvent::SetTime(value) => TimerState {
            time: value,
            ..state.clone()
        },
    }
}

fn tick(state: &TimerState) -> TimerState {
    if !state.is_running {
        return state.clone();
    }

    let next = if state.count_up {
        state.time.checked_add(1).filter(|&t| t < state.finish_time)
    } else {
        state.time.checked_sub(1).filter(|&t| t > 0)
    };

    match next {
        Some(time) => TimerState {
            time,
            ..state.clone()
        },
        None => TimerState {
            time: state.target(),
            is_running: false,
            is_finished: true,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut state: TimerState, events: &[TimerEvent]) -> TimerState {
        for event in events {
            state = reduce(&state, *event, 0);
        }
        state
    }

    #[test]
    fn test_start() {
        let state = reduce(&TimerState::default(), TimerEvent::Start, 0);
        assert!(state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.pause_start, None);
        assert_eq!(state.pause_time, 0);
    }

    #[test]
    fn test_pause() {
        let state = reduce(&TimerState::default(), TimerEvent::Pause, 42);
        assert!(!state.is_running);
        assert!(state.is_paused);
        assert_eq!(state.pause_start, Some(42));
    }

    #[test]
    fn test_repeated_pause_restamps_pause_start() {
        let state = reduce(&TimerState::default(), TimerEvent::Pause, 1_000);
        let again = reduce(&state, TimerEvent::Pause, 4_000);
        assert_eq!(again.pause_start, Some(4_000));
        assert!(again.is_paused);
        assert!(!again.is_running);
        assert_eq!(TimerState { pause_start: state.pause_start, ..again }, state);
    }

    #[test]
    fn test_repeated_start_is_idempotent() {
        let started = reduce(&TimerState::default(), TimerEvent::Start, 0);
        assert_eq!(reduce(&started, TimerEvent::Start, 5_000), started);
    }

    #[test]
    fn test_tick_is_noop_when_not_running() {
        let states = [
            TimerState::new(&TimerConfig::countdown(5)),
            TimerState::new(&TimerConfig::count_up_to(5)),
            reduce(&TimerState::new(&TimerConfig::countdown(5)), TimerEvent::Pause, 0),
            TimerState::default(),
        ];
        for state in states {
            assert_eq!(reduce(&state, TimerEvent::Tick, 0), state);
        }
    }

    #[test]
    fn test_countdown_converges() {
        let n = 7;
        let mut state = reduce(&TimerState::new(&TimerConfig::countdown(n)), TimerEvent::Start, 0);
        for i in 1..n {
            state = reduce(&state, TimerEvent::Tick, 0);
            assert_eq!(state.time, n - i);
            assert!(state.is_running);
        }
        state = reduce(&state, TimerEvent::Tick, 0);
        assert_eq!(state.time, 0);
        assert!(!state.is_running);
        assert!(state.is_finished);

        let after = reduce(&state, TimerEvent::Tick, 0);
        assert_eq!(after, state);
    }

    #[test]
    fn test_count_up_converges() {
        let state = run(
            TimerState::new(&TimerConfig::count_up_to(2)),
            &[TimerEvent::Start, TimerEvent::Tick],
        );
        assert_eq!(state.time, 1);
        assert!(state.is_running);

        let state = run(state, &[TimerEvent::Tick]);
        assert_eq!(state.time, 2);
        assert!(!state.is_running);

        let state = run(state, &[TimerEvent::Tick]);
        assert_eq!(state.time, 2);
        assert!(!state.is_running);
    }

    #[test]
    fn test_count_up_clamps_when_time_passed_target() {
        let state = run(
            TimerState::new(&TimerConfig::count_up_to(3)),
            &[TimerEvent::SetTime(10), TimerEvent::Start, TimerEvent::Tick],
        );
        assert_eq!(state.time, 3);
        assert!(!state.is_running);
    }

    #[test]
    fn test_countdown_from_zero_stops_on_first_tick() {
        let state = run(
            TimerState::new(&TimerConfig::countdown(0)),
            &[TimerEvent::Start, TimerEvent::Tick],
        );
        assert_eq!(state.time, 0);
        assert!(!state.is_running);
    }

    #[test]
    fn test_pause_tick_while_paused() {
        let state = run(
            TimerState::new(&TimerConfig::countdown(5)),
            &[TimerEvent::Pause, TimerEvent::PauseTick, TimerEvent::PauseTick],
        );
        assert_eq!(state.pause_time, 2);
    }

    #[test]
    fn test_pause_tick_ignored_while_running() {
        let state = run(
            TimerState::new(&TimerConfig::countdown(5)),
            &[TimerEvent::Start, TimerEvent::PauseTick],
        );
        assert_eq!(state.pause_time, 0);
    }

    #[test]
    fn test_pause_tick_counts_on_idle_never_paused_timer() {
        // Only `is_running` gates pause ticks
        let state = run(TimerState::new(&TimerConfig::countdown(5)), &[TimerEvent::PauseTick]);
        assert!(!state.is_paused);
        assert_eq!(state.pause_time, 1);
    }

    #[test]
    fn test_resume_seals_pause_time() {
        let state = TimerState::new(&TimerConfig::countdown(5));
        let state = reduce(&state, TimerEvent::Start, 0);
        let state = reduce(&state, TimerEvent::Pause, 10_000);
        let state = reduce(&state, TimerEvent::PauseTick, 11_000);
        let state = reduce(&state, TimerEvent::PauseTick, 12_000);
        let state = reduce(&state, TimerEvent::PauseTick, 13_000);
        let state = reduce(&state, TimerEvent::Start, 13_000);
        assert!(state.total_pause_time >= 3_000);
        assert_eq!(state.pause_time, 0);
        assert_eq!(state.pause_start, None);

        // A second episode accumulates on top of the first
        let state = reduce(&state, TimerEvent::Pause, 20_000);
        let state = reduce(&state, TimerEvent::Start, 22_500);
        assert_eq!(state.total_pause_time, 5_500);
    }

    #[test]
    fn test_resume_with_skewed_clock_keeps_total() {
        let state = TimerState {
            pause_start: Some(50_000),
            total_pause_time: 2_000,
            is_paused: true,
            ..TimerState::default()
        };
        let state = reduce(&state, TimerEvent::Start, 40_000);
        assert_eq!(state.total_pause_time, 2_000);
    }

    #[test]
    fn test_reset_replaces_state() {
        let config = TimerConfig {
            time: 5,
            finish_time: 10,
            count_up: true,
            auto_start: true,
        };
        let state = run(
            TimerState::new(&config),
            &[TimerEvent::Start, TimerEvent::Tick, TimerEvent::Pause, TimerEvent::PauseTick],
        );
        let state = reduce(&state, TimerEvent::Reset(config), 0);
        assert_eq!(state.time, 5);
        assert_eq!(state.finish_time, 10);
        assert!(state.is_running);
        assert!(state.count_up);
        assert!(!state.is_paused);
        assert_eq!(state.pause_start, None);
        assert_eq!(state.total_pause_time, 0);
        assert_eq!(state.pause_time, 0);
    }

    #[test]
    fn test_set_time_touches_only_time() {
        let state = run(TimerState::new(&TimerConfig::countdown(1)), &[TimerEvent::Pause]);
        let updated = reduce(&state, TimerEvent::SetTime(42), 0);
        assert_eq!(updated.time, 42);
        assert_eq!(TimerState { time: state.time, ..updated }, state);
    }
}
