//! Session completion alert

use tokio::process::Command;
use tracing::{info, warn};

use crate::state::TimerState;

/// Run the completion alert for a finished session. Best-effort: every
/// failure is logged and swallowed, never propagated to the countdown.
pub async fn run_completion_alert(command: Option<String>, snapshot: TimerState) {
    info!(
        "Session finished: {} completed, {} studied",
        snapshot.completed_sessions,
        snapshot.studied_display()
    );

    let Some(command) = command else {
        return;
    };

    if let Err(e) = run_alert_command(&command).await {
        warn!("Completion alert failed: {}", e);
    }
}

/// Execute the configured alert command through the shell
async fn run_alert_command(command: &str) -> Result<(), String> {
    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute alert command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "Alert command exited with {}: {}",
            output.status, stderr
        ));
    }

    info!("Alert command executed");
    Ok(())
}
