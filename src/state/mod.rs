//! State management module
//!
//! This module contains the timer record, its pure transition logic, and
//! the shared application state wrapped around it.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Applied, Command, Phase, TimerState};
