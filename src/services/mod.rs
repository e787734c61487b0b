//! Side-effect services module
//!
//! This module contains the best-effort session completion alert.

pub mod alert;

// Re-export main functions
pub use alert::run_completion_alert;
