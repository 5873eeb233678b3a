//! Error types for the timer library

use thiserror::Error;

/// Failures that can surface from a [`TimerController`](crate::controller::TimerController)
#[derive(Debug, Error)]
pub enum TimerError {
    /// The controller spawns its tickers on tokio and must be created inside a runtime
    #[error("timer controller must be created inside a tokio runtime")]
    NoRuntime,

    /// A thread panicked while holding the timer lock
    #[error("failed to lock timer state: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for TimerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        TimerError::LockPoisoned(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;
