//! Pausable Timer - countdown/count-up timer with an HTTP control surface
//!
//! This is the main entry point for the pausable-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pausable_timer::{
    api::create_router,
    config::Config,
    controller::{TimerCallbacks, TimerController},
    state::AppState,
    utils::shutdown_signal,
};

/// Callbacks that log the hosted timer's lifecycle
fn logging_callbacks() -> TimerCallbacks {
    TimerCallbacks::new()
        .on_start(|s| info!("Timer started at {}s", s.time))
        .on_pause(|s| info!("Timer paused at {}s", s.time))
        .on_reset(|s| info!("Timer reset to {}s", s.time))
        .on_tick(|s| {
            tracing::debug!("Tick: {:02}:{:02}:{:02}", s.current.hours, s.current.minutes, s.current.seconds)
        })
        .on_finish(|s| {
            info!("Timer finished at {}s after {:.0}ms paused", s.time, s.total_pause_time.total_milliseconds)
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pausable_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pausable-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, time={}s, count_up={}, auto_start={}",
          config.host, config.port, config.time, config.count_up, config.auto_start);

    let timer = TimerController::new(config.timer_options(), logging_callbacks())?;
    let state = Arc::new(AppState::new(timer, config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the timer");
    info!("  POST /pause  - Pause the timer");
    info!("  POST /reset  - Reset the timer");
    info!("  POST /time   - Set the current value ({{\"value\": seconds}})");
    info!("  PUT  /config - Replace timer options");
    info!("  GET  /status - Current timer snapshot");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.timer.dispose()?;
    info!("Server shutdown complete");
    Ok(())
}
