//! Pausable Timer - countdown/count-up timer with pause tracking
//!
//! The timer is a pure state machine ([`state`]) driven by a controller
//! ([`controller`]) that ticks it once per second on tokio, tracks how long it
//! has been paused and reports lifecycle transitions through callbacks. The
//! binary hosts one timer behind a small HTTP API ([`api`]).

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{Hook, TickerKind, TimerCallbacks, TimerController, TimerOptions};
pub use error::TimerError;
pub use state::{AppState, TimerEvent, TimerSnapshot, TimerState};
pub use utils::{format_milliseconds, format_seconds, shutdown_signal, TimeBreakdown};
