//! Timer controller module
//!
//! Owns a timer's state, its run and pause tickers, and the callbacks fired at
//! lifecycle transitions.

pub mod callbacks;
pub mod timer_controller;

// Re-export main types
pub use callbacks::{Callback, Hook, TimerCallbacks};
pub use timer_controller::{TickerKind, TimerController, TimerOptions, TICK_INTERVAL};
pub(crate) use timer_controller::Shared;
