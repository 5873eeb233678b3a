//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{controller::TimerOptions, state::TimerSnapshot};

/// API response structure for timer operation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a running response
    pub fn running(message: String, timer: TimerSnapshot) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create a paused response
    pub fn paused(message: String, timer: TimerSnapshot) -> Self {
        Self::new("paused".to_string(), message, timer)
    }

    /// Create a response whose status follows the snapshot
    pub fn from_snapshot(message: String, timer: TimerSnapshot) -> Self {
        let status = if timer.is_running {
            "running"
        } else if timer.is_paused {
            "paused"
        } else if timer.is_finished {
            "finished"
        } else {
            "idle"
        };
        Self::new(status.to_string(), message, timer)
    }
}

/// Body of POST /time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetTimeRequest {
    pub value: u64,
}

/// Response of PUT /config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Whether the new options differed and reset the timer
    pub reset: bool,
    pub options: TimerOptions,
    pub timer: TimerSnapshot,
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    /// Total pause time including a pause in progress
    pub pause_elapsed_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
