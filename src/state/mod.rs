//! State management module
//!
//! The timer state record, its transitions and the snapshot derived from it,
//! plus the server state shared by the HTTP handlers.

pub mod app_state;
pub mod reducer;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use reducer::{reduce, TimerEvent};
pub use snapshot::TimerSnapshot;
pub use timer_state::{pause_elapsed, TimerConfig, TimerState};
