//! Timer controller: binds the reducer to tokio tickers and user callbacks

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::callbacks::{triggered, Callback, Hook, TimerCallbacks, Transition};
use crate::{
    error::{Result, TimerError},
    state::{pause_elapsed, reduce, TimerConfig, TimerEvent, TimerSnapshot, TimerState},
    tasks::ticker_task,
    utils::{Clock, SystemClock},
};

/// Period of both tickers
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Caller-facing construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerOptions {
    /// Seconds to count down from, or to count up to. Negative values count as 0
    pub time: i64,
    pub count_up: bool,
    pub auto_start: bool,
}

impl TimerOptions {
    pub fn countdown(seconds: i64) -> Self {
        Self {
            time: seconds,
            ..Self::default()
        }
    }

    pub fn count_up(seconds: i64) -> Self {
        Self {
            time: seconds,
            count_up: true,
            ..Self::default()
        }
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Reducer configuration for these options
    pub fn config(&self) -> TimerConfig {
        let seconds = self.time.max(0) as u64;
        let config = if self.count_up {
            TimerConfig::count_up_to(seconds)
        } else {
            TimerConfig::countdown(seconds)
        };
        config.with_auto_start(self.auto_start)
    }
}

/// The two periodic schedules a controller can arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerKind {
    /// Advances `time` while running
    Run,
    /// Advances `pause_time` while paused
    Pause,
}

impl TickerKind {
    fn event(self) -> TimerEvent {
        match self {
            TickerKind::Run => TimerEvent::Tick,
            TickerKind::Pause => TimerEvent::PauseTick,
        }
    }
}

impl fmt::Display for TickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerKind::Run => write!(f, "run"),
            TickerKind::Pause => write!(f, "pause"),
        }
    }
}

struct Ticker {
    id: u64,
    task: JoinHandle<()>,
}

impl Ticker {
    fn cancel(self) {
        self.task.abort();
    }
}

struct Inner {
    state: TimerState,
    config: TimerConfig,
    callbacks: TimerCallbacks,
    finish_notified: bool,
    run_ticker: Option<Ticker>,
    pause_ticker: Option<Ticker>,
    next_ticker_id: u64,
    disposed: bool,
}

impl Inner {
    fn ticker(&self, kind: TickerKind) -> Option<&Ticker> {
        match kind {
            TickerKind::Run => self.run_ticker.as_ref(),
            TickerKind::Pause => self.pause_ticker.as_ref(),
        }
    }

    fn cancel_tickers(&mut self) {
        if let Some(ticker) = self.run_ticker.take() {
            ticker.cancel();
        }
        if let Some(ticker) = self.pause_ticker.take() {
            ticker.cancel();
        }
    }
}

/// State shared between a controller and its ticker tasks
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl Shared {
    /// Apply a ticker firing; `Ok(false)` tells the ticker it was cancelled
    pub(crate) fn fire(self: &Arc<Self>, kind: TickerKind, id: u64) -> Result<bool> {
        Ok(self.transition(kind.event(), Some((kind, id)))?.is_some())
    }

    /// Run `event` through the reducer, re-arm tickers and notify watchers
    ///
    /// Returns `None` when the controller is disposed or the firing ticker is
    /// no longer the armed one.
    fn transition(
        self: &Arc<Self>,
        event: TimerEvent,
        ticker: Option<(TickerKind, u64)>,
    ) -> Result<Option<TimerSnapshot>> {
        let (snapshot, pending) = {
            let mut inner = self.inner.lock()?;
            if inner.disposed {
                return Ok(None);
            }
            if let Some((kind, id)) = ticker {
                if inner.ticker(kind).map(|t| t.id) != Some(id) {
                    return Ok(None);
                }
            }

            let now = self.clock.now_millis();
            let before = inner.state.clone();
            let mut after = reduce(&before, event, now);
            if matches!(event, TimerEvent::Reset(_) | TimerEvent::Start)
                && after.is_running
                && after.at_target()
            {
                // Nothing left to count: stop now instead of after the first interval
                after = reduce(&after, TimerEvent::Tick, now);
            }
            debug!("Timer event {}: time={} running={} paused={}",
                   event.name(), after.time, after.is_running, after.is_paused);

            if matches!(event, TimerEvent::Reset(_) | TimerEvent::Start) {
                inner.finish_notified = false;
            }
            let hooks = triggered(&Transition {
                event,
                before: &before,
                after: &after,
                finish_notified: inner.finish_notified,
            });
            if hooks.contains(&Hook::Finish) {
                inner.finish_notified = true;
            }

            inner.state = after;
            self.sync_tickers(&mut inner);

            let snapshot = TimerSnapshot::from(&inner.state);
            self.snapshot_tx.send_replace(snapshot.clone());

            let pending: Vec<(Hook, Callback)> = hooks
                .into_iter()
                .filter_map(|hook| inner.callbacks.get(hook).map(|cb| (hook, Arc::clone(cb))))
                .collect();
            (snapshot, pending)
        };

        // Lock released: callbacks may call back into the controller
        for (hook, callback) in pending {
            debug!("Invoking {:?} callback", hook);
            callback(&snapshot);
        }

        Ok(Some(snapshot))
    }

    /// Arm exactly the ticker the current state calls for
    fn sync_tickers(self: &Arc<Self>, inner: &mut Inner) {
        let want_run = inner.state.is_running;
        let want_pause = !inner.state.is_running && inner.state.is_paused;

        if want_run != inner.run_ticker.is_some() {
            if want_run {
                inner.run_ticker = Some(self.spawn_ticker(inner, TickerKind::Run));
            } else if let Some(ticker) = inner.run_ticker.take() {
                debug!("Cancelling run ticker #{}", ticker.id);
                ticker.cancel();
            }
        }

        if want_pause != inner.pause_ticker.is_some() {
            if want_pause {
                inner.pause_ticker = Some(self.spawn_ticker(inner, TickerKind::Pause));
            } else if let Some(ticker) = inner.pause_ticker.take() {
                debug!("Cancelling pause ticker #{}", ticker.id);
                ticker.cancel();
            }
        }
    }

    fn spawn_ticker(self: &Arc<Self>, inner: &mut Inner, kind: TickerKind) -> Ticker {
        let id = inner.next_ticker_id;
        inner.next_ticker_id += 1;
        let task = self.runtime.spawn(ticker_task(Arc::downgrade(self), kind, id));
        Ticker { id, task }
    }
}

/// Countdown/count-up timer driven by tokio
///
/// Operations are synchronous. Callbacks run on the thread that caused the
/// transition (the caller, or a ticker task), after the internal lock is
/// released. Dropping the controller disposes it.
pub struct TimerController {
    shared: Arc<Shared>,
}

impl TimerController {
    /// Create a controller using the system clock
    ///
    /// Must be called inside a tokio runtime. The new timer is reset from
    /// `options`, which fires `on_reset` (and `on_start` when auto-starting).
    pub fn new(options: TimerOptions, callbacks: TimerCallbacks) -> Result<Self> {
        Self::with_clock(options, callbacks, Arc::new(SystemClock))
    }

    /// Create a controller reading wall-clock time from `clock`
    pub fn with_clock(
        options: TimerOptions,
        callbacks: TimerCallbacks,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let config = options.config();
        let initial = TimerState::default();
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::from(&initial));

        let controller = Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: initial,
                    config,
                    callbacks,
                    finish_notified: false,
                    run_ticker: None,
                    pause_ticker: None,
                    next_ticker_id: 0,
                    disposed: false,
                }),
                clock,
                runtime,
                snapshot_tx,
            }),
        };

        info!("Creating timer: time={}s count_up={} auto_start={}",
              config.time.max(config.finish_time), config.count_up, config.auto_start);
        controller.shared.transition(TimerEvent::Reset(config), None)?;
        Ok(controller)
    }

    fn dispatch(&self, event: TimerEvent) -> Result<TimerSnapshot> {
        match self.shared.transition(event, None)? {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self.snapshot()),
        }
    }

    /// Start or resume counting
    pub fn start(&self) -> Result<TimerSnapshot> {
        info!("Starting timer");
        self.dispatch(TimerEvent::Start)
    }

    /// Pause counting and begin a pause episode
    pub fn pause(&self) -> Result<TimerSnapshot> {
        info!("Pausing timer");
        self.dispatch(TimerEvent::Pause)
    }

    /// Rebuild the timer from its current configuration
    pub fn reset(&self) -> Result<TimerSnapshot> {
        let config = self.config()?;
        info!("Resetting timer");
        self.dispatch(TimerEvent::Reset(config))
    }

    /// Overwrite the counter; the value is not checked against the target
    pub fn set_time(&self, seconds: u64) -> Result<TimerSnapshot> {
        info!("Setting timer to {}s", seconds);
        self.dispatch(TimerEvent::SetTime(seconds))
    }

    /// Replace the options, resetting the timer if they changed
    ///
    /// Returns whether a reset happened.
    pub fn update_config(&self, options: TimerOptions) -> Result<bool> {
        let config = options.config();
        {
            let mut inner = self.shared.inner.lock()?;
            if inner.disposed || inner.config == config {
                return Ok(false);
            }
            inner.config = config;
        }
        info!("Timer configuration changed, resetting");
        self.dispatch(TimerEvent::Reset(config))?;
        Ok(true)
    }

    /// Replace the lifecycle callbacks
    pub fn set_callbacks(&self, callbacks: TimerCallbacks) -> Result<()> {
        self.shared.inner.lock()?.callbacks = callbacks;
        Ok(())
    }

    /// Current configuration
    pub fn config(&self) -> Result<TimerConfig> {
        Ok(self.shared.inner.lock()?.config)
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Receiver that observes every snapshot change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Total pause time in milliseconds including the pause in progress
    pub fn pause_elapsed(&self) -> Result<u64> {
        let inner = self.shared.inner.lock()?;
        Ok(pause_elapsed(&inner.state, self.shared.clock.now_millis()))
    }

    /// Which ticker is currently armed
    pub fn active_ticker(&self) -> Result<Option<TickerKind>> {
        let inner = self.shared.inner.lock()?;
        Ok(if inner.run_ticker.is_some() {
            Some(TickerKind::Run)
        } else if inner.pause_ticker.is_some() {
            Some(TickerKind::Pause)
        } else {
            None
        })
    }

    /// Cancel both tickers; afterwards every operation leaves the state alone
    ///
    /// The last published snapshot is replaced by a stopped one, since
    /// nothing advances a disposed timer.
    pub fn dispose(&self) -> Result<()> {
        let mut inner = self.shared.inner.lock()?;
        if !inner.disposed {
            inner.disposed = true;
            inner.cancel_tickers();
            self.shared.snapshot_tx.send_replace(TimerSnapshot {
                is_running: false,
                ..TimerSnapshot::from(&inner.state)
            });
            info!("Timer disposed");
        }
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.inner.lock().map(|inner| inner.disposed).unwrap_or(true)
    }
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        // A poisoned lock cannot be recovered here; the tickers still stop
        // once they fail to upgrade their weak reference
        let _ = self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_config_countdown() {
        let config = TimerOptions::countdown(30).auto_start(true).config();
        assert_eq!(config, TimerConfig { time: 30, finish_time: 0, count_up: false, auto_start: true });
    }

    #[test]
    fn test_options_config_count_up() {
        let config = TimerOptions::count_up(30).config();
        assert_eq!(config, TimerConfig { time: 0, finish_time: 30, count_up: true, auto_start: false });
    }

    #[test]
    fn test_options_clamp_negative_time() {
        assert_eq!(TimerOptions::countdown(-5).config().time, 0);
        assert_eq!(TimerOptions::count_up(-5).config().finish_time, 0);
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: TimerOptions = serde_json::from_str(r#"{"time": 90}"#).unwrap();
        assert_eq!(options, TimerOptions::countdown(90));
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = TimerController::new(TimerOptions::default(), TimerCallbacks::new());
        assert!(matches!(result, Err(TimerError::NoRuntime)));
    }
}
