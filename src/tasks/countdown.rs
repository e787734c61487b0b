//! Countdown driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, error, info};

use crate::{services::run_completion_alert, state::AppState};

/// Cadence of the countdown
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that owns the countdown interval. At most one interval
/// exists at any moment: it is created when a running snapshot arrives and
/// dropped on pause, reset, reconfiguration, or completion.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut state_rx = state.state_change_tx.subscribe();

    loop {
        // Wait for a command to put the timer into a running state
        match state_rx.recv().await {
            Ok(current) => {
                if !current.is_running {
                    debug!(
                        "Timer not running ({:?}), countdown stays idle",
                        current.phase()
                    );
                    continue;
                }

                info!(
                    "Countdown running with {}s remaining",
                    current.remaining_seconds
                );

                // First tick lands a full period from now; a plain interval
                // would fire immediately and eat a second
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

                loop {
                    tokio::select! {
                        // Timer tick - advance the countdown
                        _ = interval.tick() => {
                            match state.tick() {
                                Ok(applied) => {
                                    if applied.completed {
                                        info!(
                                            "Session complete: {} finished, {}s studied in total",
                                            applied.state.completed_sessions,
                                            applied.state.total_studied_seconds
                                        );

                                        // Fire-and-forget; the alert must never
                                        // hold up or fail the countdown
                                        tokio::spawn(run_completion_alert(
                                            state.on_complete.clone(),
                                            applied.state,
                                        ));

                                        break;
                                    }

                                    if !applied.state.is_running {
                                        // Stale tick raced a cancelling command
                                        debug!("Tick observed a stopped timer, dropping interval");
                                        break;
                                    }

                                    debug!("Tick: {}s remaining", applied.state.remaining_seconds);
                                }
                                Err(e) => {
                                    error!("Failed to advance countdown: {}", e);
                                    break;
                                }
                            }
                        }

                        // Commands cancel the interval by publishing a
                        // non-running snapshot (pause, reset, new minutes)
                        Ok(new_state) = state_rx.recv() => {
                            if !new_state.is_running {
                                info!(
                                    "Countdown cancelled at {}s remaining",
                                    new_state.remaining_seconds
                                );
                                break;
                            }
                        }
                    }
                }
            }
            Err(e) => {
                error!("Error receiving state change: {}", e);
                // Wait a bit before retrying
                sleep(TICK_PERIOD).await;
            }
        }
    }
}
