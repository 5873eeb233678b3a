//! Lifecycle callbacks and the watchers that decide when they fire

use std::{fmt, sync::Arc};

use crate::state::{TimerEvent, TimerSnapshot, TimerState};

/// Shared callback invoked with the latest snapshot
pub type Callback = Arc<dyn Fn(&TimerSnapshot) + Send + Sync>;

/// Lifecycle points a caller can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Start,
    Pause,
    Reset,
    Tick,
    Finish,
}

/// User callbacks, all optional
#[derive(Clone, Default)]
pub struct TimerCallbacks {
    pub on_start: Option<Callback>,
    pub on_pause: Option<Callback>,
    pub on_reset: Option<Callback>,
    pub on_tick: Option<Callback>,
    pub on_finish: Option<Callback>,
}

impl TimerCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl Fn(&TimerSnapshot) + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(f));
        self
    }

    pub fn on_pause(mut self, f: impl Fn(&TimerSnapshot) + Send + Sync + 'static) -> Self {
        self.on_pause = Some(Arc::new(f));
        self
    }

    pub fn on_reset(mut self, f: impl Fn(&TimerSnapshot) + Send + Sync + 'static) -> Self {
        self.on_reset = Some(Arc::new(f));
        self
    }

    pub fn on_tick(mut self, f: impl Fn(&TimerSnapshot) + Send + Sync + 'static) -> Self {
        self.on_tick = Some(Arc::new(f));
        self
    }

    pub fn on_finish(mut self, f: impl Fn(&TimerSnapshot) + Send + Sync + 'static) -> Self {
        self.on_finish = Some(Arc::new(f));
        self
    }

    /// Callback registered for `hook`, if any
    pub fn get(&self, hook: Hook) -> Option<&Callback> {
        match hook {
            Hook::Start => self.on_start.as_ref(),
            Hook::Pause => self.on_pause.as_ref(),
            Hook::Reset => self.on_reset.as_ref(),
            Hook::Tick => self.on_tick.as_ref(),
            Hook::Finish => self.on_finish.as_ref(),
        }
    }
}

impl fmt::Debug for TimerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("on_tick", &self.on_tick.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

/// One state transition as seen by the watchers
pub struct Transition<'a> {
    pub event: TimerEvent,
    pub before: &'a TimerState,
    pub after: &'a TimerState,
    /// Whether finish was already reported for the current terminal episode
    pub finish_notified: bool,
}

type Watcher = fn(&Transition<'_>) -> bool;

fn started(t: &Transition<'_>) -> bool {
    !t.before.is_running && t.after.is_running
}

fn paused(t: &Transition<'_>) -> bool {
    !t.before.is_paused && t.after.is_paused
}

fn was_reset(t: &Transition<'_>) -> bool {
    matches!(t.event, TimerEvent::Reset(_))
}

fn ticked(t: &Transition<'_>) -> bool {
    t.event == TimerEvent::Tick
}

fn finished(t: &Transition<'_>) -> bool {
    t.after.is_terminal() && !t.finish_notified
}

/// Watchers in firing order
const WATCHERS: [(Hook, Watcher); 5] = [
    (Hook::Start, started),
    (Hook::Pause, paused),
    (Hook::Reset, was_reset),
    (Hook::Tick, ticked),
    (Hook::Finish, finished),
];

/// Hooks triggered by `transition`, in firing order
pub fn triggered(transition: &Transition<'_>) -> Vec<Hook> {
    WATCHERS
        .iter()
        .filter(|(_, watcher)| watcher(transition))
        .map(|(hook, _)| *hook)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{reduce, TimerConfig};

    fn hooks(event: TimerEvent, before: &TimerState, finish_notified: bool) -> Vec<Hook> {
        let after = reduce(before, event, 0);
        triggered(&Transition {
            event,
            before,
            after: &after,
            finish_notified,
        })
    }

    #[test]
    fn test_start_from_idle() {
        let idle = TimerState::new(&TimerConfig::countdown(5));
        assert_eq!(hooks(TimerEvent::Start, &idle, false), vec![Hook::Start]);
    }

    #[test]
    fn test_start_while_running_fires_nothing() {
        let running = TimerState::new(&TimerConfig::countdown(5).with_auto_start(true));
        assert!(hooks(TimerEvent::Start, &running, false).is_empty());
    }

    #[test]
    fn test_pause_fires_once() {
        let running = TimerState::new(&TimerConfig::countdown(5).with_auto_start(true));
        assert_eq!(hooks(TimerEvent::Pause, &running, false), vec![Hook::Pause]);
        let paused = reduce(&running, TimerEvent::Pause, 0);
        assert!(hooks(TimerEvent::Pause, &paused, false).is_empty());
    }

    #[test]
    fn test_reset_orders_start_before_reset() {
        let paused = reduce(&TimerState::new(&TimerConfig::countdown(5)), TimerEvent::Pause, 0);
        let config = TimerConfig::countdown(5).with_auto_start(true);
        assert_eq!(
            hooks(TimerEvent::Reset(config), &paused, false),
            vec![Hook::Start, Hook::Reset]
        );
    }

    #[test]
    fn test_last_tick_fires_tick_then_finish() {
        let running = TimerState::new(&TimerConfig::countdown(1).with_auto_start(true));
        assert_eq!(hooks(TimerEvent::Tick, &running, false), vec![Hook::Tick, Hook::Finish]);
    }

    #[test]
    fn test_finish_latched() {
        let finished = TimerState::new(&TimerConfig::countdown(0));
        assert_eq!(hooks(TimerEvent::SetTime(0), &finished, false), vec![Hook::Finish]);
        assert!(hooks(TimerEvent::SetTime(0), &finished, true).is_empty());
    }

    #[test]
    fn test_builder_registers_callbacks() {
        let callbacks = TimerCallbacks::new().on_tick(|_| {}).on_finish(|_| {});
        assert!(callbacks.get(Hook::Tick).is_some());
        assert!(callbacks.get(Hook::Finish).is_some());
        assert!(callbacks.get(Hook::Start).is_none());
    }
}
