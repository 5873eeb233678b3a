//! Server state shared by the HTTP handlers

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{
    controller::{TimerController, TimerOptions},
    error::Result,
    state::TimerSnapshot,
};

/// Server state: the hosted timer plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub timer: TimerController,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(timer: TimerController, port: u16, host: String) -> Self {
        Self {
            timer,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Run a timer operation and record it as the last action
    pub fn perform<T, F>(&self, action: &str, op: F) -> Result<T>
    where
        F: FnOnce(&TimerController) -> Result<T>,
    {
        let result = op(&self.timer)?;

        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    pub fn start(&self) -> Result<TimerSnapshot> {
        self.perform("start", |timer| timer.start())
    }

    pub fn pause(&self) -> Result<TimerSnapshot> {
        self.perform("pause", |timer| timer.pause())
    }

    pub fn reset(&self) -> Result<TimerSnapshot> {
        self.perform("reset", |timer| timer.reset())
    }

    pub fn set_time(&self, seconds: u64) -> Result<TimerSnapshot> {
        self.perform("set-time", |timer| timer.set_time(seconds))
    }

    /// Apply new options; returns whether the timer was reset and the snapshot after it
    pub fn update_config(&self, options: TimerOptions) -> Result<(bool, TimerSnapshot)> {
        self.perform("config", |timer| {
            let reset = timer.update_config(options)?;
            Ok((reset, timer.snapshot()))
        })
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
