//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{controller::TimerOptions, state::AppState};
use super::responses::{ApiResponse, ConfigResponse, HealthResponse, SetTimeRequest, StatusResponse};

/// Handle POST /start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(snapshot) => {
            info!("Start endpoint called - timer running");
            Ok(Json(ApiResponse::running("Timer started".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(snapshot) => {
            info!("Pause endpoint called - timer paused");
            Ok(Json(ApiResponse::paused("Timer paused".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Reset the timer to its configuration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(snapshot) => {
            info!("Reset endpoint called - timer reset to {}s", snapshot.time);
            Ok(Json(ApiResponse::from_snapshot("Timer reset".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /time - Overwrite the current value
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetTimeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_time(request.value) {
        Ok(snapshot) => {
            info!("Time endpoint called - timer set to {}s", request.value);
            Ok(Json(ApiResponse::from_snapshot(
                format!("Timer set to {}s", request.value),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to set timer value: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /config - Replace the timer options
pub async fn config_handler(
    State(state): State<Arc<AppState>>,
    Json(options): Json<TimerOptions>,
) -> Result<Json<ConfigResponse>, StatusCode> {
    match state.update_config(options) {
        Ok((reset, timer)) => {
            info!("Config endpoint called - reset={}", reset);
            Ok(Json(ConfigResponse { reset, options, timer }))
        }
        Err(e) => {
            error!("Failed to update timer config: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let pause_elapsed_ms = match state.timer.pause_elapsed() {
        Ok(ms) => ms,
        Err(e) => {
            error!("Failed to read pause time: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.timer.snapshot(),
        pause_elapsed_ms,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
