//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{Applied, Command, TimerState};

/// Main application state: the timer record plus everything needed to
/// observe and drive it
#[derive(Debug)]
pub struct AppState {
    /// Current timer record; swapped wholesale on every transition
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Optional shell command run when a session completes
    pub on_complete: Option<String>,
    /// Last command tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Snapshots after every command; this is what starts and cancels ticking
    pub state_change_tx: broadcast::Sender<TimerState>,
    /// Snapshots on every tick for passive observers
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer of the given length
    pub fn new(port: u16, host: String, minutes: u64, on_complete: Option<String>) -> Self {
        let initial = TimerState::new(minutes);
        let (state_change_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_state: Arc::new(Mutex::new(initial)),
            start_time: Instant::now(),
            port,
            host,
            on_complete,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Run a command through the reducer and publish the resulting snapshot
    pub fn apply_command(&self, action: &str, command: Command) -> Result<Applied, String> {
        // Lock the timer record and swap in the next one
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let applied = timer.apply(&command);
        *timer = applied.state.clone();
        drop(timer); // Release the lock before notifying

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Notify the countdown task
        if let Err(e) = self.state_change_tx.send(applied.state.clone()) {
            warn!("Failed to send state change notification: {}", e);
        }

        // Keep tick observers in sync with command transitions too
        if let Err(e) = self.timer_update_tx.send(applied.state.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(applied)
    }

    /// Start the countdown if there is time left
    pub fn start(&self) -> Result<Applied, String> {
        info!("Starting countdown");
        self.apply_command("start", Command::Start)
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<Applied, String> {
        info!("Pausing countdown");
        self.apply_command("pause", Command::Pause)
    }

    /// Reset the countdown to the configured session length
    pub fn reset(&self) -> Result<Applied, String> {
        info!("Resetting countdown");
        self.apply_command("reset", Command::Reset)
    }

    /// Apply a new session length from raw text
    pub fn set_minutes(&self, raw: &str) -> Result<Applied, String> {
        info!("Applying session length from input: {:?}", raw);
        self.apply_command("minutes", Command::SetMinutes(raw.to_string()))
    }

    /// Advance the countdown by one second. Called only by the countdown
    /// driver; published on the watch channel rather than the command
    /// channel so the driver does not observe its own ticks.
    pub fn tick(&self) -> Result<Applied, String> {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let applied = timer.apply(&Command::Tick);
        *timer = applied.state.clone();
        drop(timer);

        if let Err(e) = self.timer_update_tx.send(applied.state.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(applied)
    }

    /// Get a snapshot of the current timer record
    pub fn timer_snapshot(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|timer| timer.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last command information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), 25, None)
    }

    #[test]
    fn commands_swap_the_record_and_track_actions() {
        let state = test_state();

        let applied = state.start().expect("start");
        assert!(applied.state.is_running);
        assert_eq!(applied.state.phase(), Phase::Running);

        let snapshot = state.timer_snapshot().expect("snapshot");
        assert_eq!(snapshot, applied.state);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());
    }

    #[test]
    fn commands_notify_subscribers() {
        let state = test_state();
        let mut rx = state.state_change_tx.subscribe();

        state.start().expect("start");
        let snapshot = rx.try_recv().expect("notification");
        assert!(snapshot.is_running);

        state.pause().expect("pause");
        let snapshot = rx.try_recv().expect("notification");
        assert!(!snapshot.is_running);
    }

    #[test]
    fn ticks_publish_on_the_watch_channel() {
        let state = test_state();
        state.start().expect("start");

        let applied = state.tick().expect("tick");
        assert_eq!(applied.state.remaining_seconds, 1499);
        assert!(!applied.completed);

        let watched = state.timer_update_tx.borrow().clone();
        assert_eq!(watched, applied.state);
    }

    #[test]
    fn minutes_input_flows_through() {
        let state = test_state();
        let applied = state.set_minutes("  8 ").expect("set minutes");
        assert_eq!(applied.state.configured_minutes, 8);
        assert_eq!(applied.state.remaining_seconds, 480);
    }
}
