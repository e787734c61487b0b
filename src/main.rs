//! Study Timer - A state-managed HTTP server for countdown study sessions
//!
//! This is the main entry point for the study-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, minutes={}",
        config.host, config.port, config.minutes
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.minutes,
        config.on_complete.clone(),
    ));

    // Start the countdown background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(timer_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start   - Start the countdown");
    info!("  POST /pause   - Pause the countdown");
    info!("  POST /reset   - Reset to the configured session length");
    info!("  POST /minutes - Apply a new session length");
    info!("  GET  /status  - Current timer status and displays");
    info!("  GET  /health  - Health check");

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

    info!("Server shutdown complete");
    Ok(())
}
