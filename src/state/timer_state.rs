//! Countdown timer record and its pure transition logic

use serde::{Deserialize, Serialize};

/// Fallback session length in minutes for unusable input
pub const DEFAULT_MINUTES: u64 = 25;

/// Remaining time at or below this is displayed as critical
const CRITICAL_SECONDS: u64 = 60;

/// Commands accepted by the countdown timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply a new session length from raw text input
    SetMinutes(String),
    Start,
    Pause,
    Reset,
    /// One second of countdown progress; issued only by the countdown driver
    Tick,
}

/// Coarse phase of the countdown, derived from the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Result of applying a command: the next record plus whether the countdown
/// reached zero on this transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub state: TimerState,
    pub completed: bool,
}

/// Countdown timer state. Commands produce a whole new record; nothing is
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Raw minutes text as last applied, normalized to the validated value
    pub minutes_input: String,
    pub configured_minutes: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub completed_sessions: u64,
    pub total_studied_seconds: u64,
}

impl TimerState {
    /// Create an idle timer with the given session length; 0 falls back to
    /// the default the same way unparsable text does
    pub fn new(minutes: u64) -> Self {
        let minutes = if minutes == 0 { DEFAULT_MINUTES } else { minutes };
        Self {
            minutes_input: minutes.to_string(),
            configured_minutes: minutes,
            remaining_seconds: minutes.saturating_mul(60),
            is_running: false,
            completed_sessions: 0,
            total_studied_seconds: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.remaining_seconds == 0 {
            Phase::Finished
        } else if self.is_running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_critical(&self) -> bool {
        self.remaining_seconds <= CRITICAL_SECONDS
    }

    /// Remaining time as an `MM:SS` clock
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Cumulative studied time for display
    pub fn studied_display(&self) -> String {
        format_studied(self.total_studied_seconds)
    }

    /// Apply a command and return the next record. Pure; publishing the
    /// result is the caller's job.
    pub fn apply(&self, command: &Command) -> Applied {
        match command {
            Command::SetMinutes(raw) => self.with_minutes(parse_minutes(raw)),
            Command::Reset => self.with_minutes(parse_minutes(&self.minutes_input)),
            Command::Start => {
                let mut next = self.clone();
                if next.remaining_seconds > 0 {
                    next.is_running = true;
                }
                Applied {
                    state: next,
                    completed: false,
                }
            }
            Command::Pause => {
                let mut next = self.clone();
                next.is_running = false;
                Applied {
                    state: next,
                    completed: false,
                }
            }
            Command::Tick => self.ticked(),
        }
    }

    fn with_minutes(&self, minutes: u64) -> Applied {
        let mut next = self.clone();
        next.minutes_input = minutes.to_string();
        next.configured_minutes = minutes;
        next.remaining_seconds = minutes.saturating_mul(60);
        next.is_running = false;
        Applied {
            state: next,
            completed: false,
        }
    }

    fn ticked(&self) -> Applied {
        if !self.is_running {
            // Stale tick after a pause or completion; nothing to count down
            return Applied {
                state: self.clone(),
                completed: false,
            };
        }

        let mut next = self.clone();
        next.remaining_seconds = next.remaining_seconds.saturating_sub(1);
        let completed = next.remaining_seconds == 0;
        if completed {
            // Credit the currently configured length, not the elapsed time
            next.is_running = false;
            next.completed_sessions += 1;
            next.total_studied_seconds = next
                .total_studied_seconds
                .saturating_add(next.configured_minutes.saturating_mul(60));
        }

        Applied {
            state: next,
            completed,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

/// Coerce raw minutes text to a usable session length. Unparsable or
/// non-positive input falls back to the default of 25.
pub fn parse_minutes(raw: &str) -> u64 {
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => minutes as u64,
        _ => DEFAULT_MINUTES,
    }
}

/// Format seconds as an `MM:SS` clock. The minutes field widens past two
/// digits for countdowns of 100 minutes or more.
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Format cumulative studied seconds for display, flooring to whole minutes
pub fn format_studied(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{} min", minutes)
    }
}
