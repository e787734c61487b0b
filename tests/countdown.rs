//! Countdown driver integration tests on a paused tokio clock
//!
//! `start_paused` auto-advances time whenever every task is blocked on a
//! timer, so whole sessions run deterministically in milliseconds.

use std::{sync::Arc, time::Duration};

use study_timer::{state::AppState, tasks::countdown_task};

fn test_state(minutes: u64) -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), minutes, None))
}

async fn spawn_driver(state: &Arc<AppState>) {
    tokio::spawn(countdown_task(Arc::clone(state)));
    // Let the driver subscribe before any command is issued
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn one_minute_session_completes() {
    let state = test_state(1);
    spawn_driver(&state).await;

    state.start().expect("start");
    tokio::time::sleep(Duration::from_secs(61)).await;

    let timer = state.timer_snapshot().expect("snapshot");
    assert_eq!(timer.remaining_seconds, 0);
    assert!(!timer.is_running);
    assert_eq!(timer.completed_sessions, 1);
    assert_eq!(timer.total_studied_seconds, 60);
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_the_interval() {
    let state = test_state(1);
    spawn_driver(&state).await;

    state.start().expect("start");
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    state.pause().expect("pause");
    let paused = state.timer_snapshot().expect("snapshot");
    assert_eq!(paused.remaining_seconds, 50);
    assert!(!paused.is_running);

    // No further ticks arrive while paused
    tokio::time::sleep(Duration::from_secs(30)).await;
    let later = state.timer_snapshot().expect("snapshot");
    assert_eq!(later.remaining_seconds, 50);
    assert_eq!(later.completed_sessions, 0);
}

#[tokio::test(start_paused = true)]
async fn reset_restores_and_allows_a_fresh_run() {
    let state = test_state(1);
    spawn_driver(&state).await;

    state.start().expect("start");
    tokio::time::sleep(Duration::from_millis(20_500)).await;
    assert_eq!(state.timer_snapshot().expect("snapshot").remaining_seconds, 40);

    state.reset().expect("reset");
    let reset = state.timer_snapshot().expect("snapshot");
    assert_eq!(reset.remaining_seconds, 60);
    assert!(!reset.is_running);

    state.start().expect("start");
    tokio::time::sleep(Duration::from_secs(61)).await;

    let timer = state.timer_snapshot().expect("snapshot");
    assert_eq!(timer.remaining_seconds, 0);
    assert_eq!(timer.completed_sessions, 1);
    assert_eq!(timer.total_studied_seconds, 60);
}

#[tokio::test(start_paused = true)]
async fn new_minutes_cancel_and_resize() {
    let state = test_state(25);
    spawn_driver(&state).await;

    state.start().expect("start");
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(state.timer_snapshot().expect("snapshot").remaining_seconds, 1495);

    state.set_minutes("2").expect("set minutes");
    let resized = state.timer_snapshot().expect("snapshot");
    assert_eq!(resized.remaining_seconds, 120);
    assert!(!resized.is_running);

    // The old interval is gone; nothing ticks until the next start
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(state.timer_snapshot().expect("snapshot").remaining_seconds, 120);
}

#[tokio::test(start_paused = true)]
async fn start_after_completion_stays_finished() {
    let state = test_state(1);
    spawn_driver(&state).await;

    state.start().expect("start");
    tokio::time::sleep(Duration::from_secs(61)).await;

    // Starting at zero remaining is inert; no second countdown begins
    state.start().expect("start");
    tokio::time::sleep(Duration::from_secs(10)).await;

    let timer = state.timer_snapshot().expect("snapshot");
    assert_eq!(timer.remaining_seconds, 0);
    assert!(!timer.is_running);
    assert_eq!(timer.completed_sessions, 1);
    assert_eq!(timer.total_studied_seconds, 60);
}
