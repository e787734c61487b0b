//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{ApiResponse, HealthResponse, MinutesRequest, StatusResponse};

/// Handle POST /start - Begin or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(applied) => {
            let message = if applied.state.is_running {
                "Countdown running".to_string()
            } else {
                "Nothing left to count down; reset or set minutes first".to_string()
            };
            info!("Start endpoint called - {}", message);
            Ok(Json(ApiResponse::from_timer(message, applied.state)))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(applied) => {
            info!("Pause endpoint called - countdown paused");
            Ok(Json(ApiResponse::from_timer(
                "Countdown paused".to_string(),
                applied.state,
            )))
        }
        Err(e) => {
            error!("Failed to pause countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Reset to the configured session length
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(applied) => {
            let message = format!(
                "Countdown reset to {} minutes",
                applied.state.configured_minutes
            );
            info!("Reset endpoint called - {}", message);
            Ok(Json(ApiResponse::from_timer(message, applied.state)))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /minutes - Apply a new session length from raw text
pub async fn minutes_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_minutes(&request.minutes) {
        Ok(applied) => {
            let message = format!(
                "Session length set to {} minutes",
                applied.state.configured_minutes
            );
            info!("Minutes endpoint called - {}", message);
            Ok(Json(ApiResponse::from_timer(message, applied.state)))
        }
        Err(e) => {
            error!("Failed to apply session length: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer snapshot and displays
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        phase: timer.phase(),
        clock: timer.clock(),
        is_critical: timer.is_critical(),
        studied: timer.studied_display(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        timer,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
