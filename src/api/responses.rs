//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Phase, TimerState};

/// Request body for applying a new session length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinutesRequest {
    /// Raw minutes text exactly as typed; coerced server-side
    pub minutes: String,
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: Phase,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a response whose status reflects the resulting timer phase
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        Self {
            status: timer.phase(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with the full snapshot and derived display values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub phase: Phase,
    pub clock: String,
    pub is_critical: bool,
    pub studied: String,
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
