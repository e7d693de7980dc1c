//! Countdown timer commands
//!
//! The engine lives in managed state behind a mutex; the frontend polls
//! `timer_tick` once a second and renders the returned snapshot.

use std::sync::Mutex;

use tauri::AppHandle;

use crate::core::timer::CountdownTimer;
use crate::shared::emit::emit_event;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::events::AppEvent;
use crate::shared::types::TimerSnapshot;

/// Shared timer engine state, protected by a mutex
pub struct TimerState(pub Mutex<CountdownTimer>);

impl TimerState {
    pub fn new() -> Self {
        Self(Mutex::new(CountdownTimer::new()))
    }

    fn lock(&self) -> CommandResult<std::sync::MutexGuard<'_, CountdownTimer>> {
        self.0
            .lock()
            .map_err(|e| CommandError::Unknown(format!("Timer mutex poisoned: {}", e)))
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[tauri::command]
pub fn timer_start(
    state: tauri::State<'_, TimerState>,
    duration_secs: u64,
) -> CommandResult<TimerSnapshot> {
    let mut timer = state.lock()?;
    timer.start(duration_secs);
    Ok(timer.snapshot())
}

#[tauri::command]
pub fn timer_pause(state: tauri::State<'_, TimerState>) -> CommandResult<TimerSnapshot> {
    let mut timer = state.lock()?;
    timer.pause();
    Ok(timer.snapshot())
}

#[tauri::command]
pub fn timer_resume(state: tauri::State<'_, TimerState>) -> CommandResult<TimerSnapshot> {
    let mut timer = state.lock()?;
    timer.resume();
    Ok(timer.snapshot())
}

#[tauri::command]
pub fn timer_reset(state: tauri::State<'_, TimerState>) -> CommandResult<TimerSnapshot> {
    let mut timer = state.lock()?;
    timer.reset();
    Ok(timer.snapshot())
}

/// Advance the engine; emits `timer://finished` on the completion edge
#[tauri::command]
pub fn timer_tick(
    app: AppHandle,
    state: tauri::State<'_, TimerState>,
) -> CommandResult<TimerSnapshot> {
    let mut timer = state.lock()?;
    if let Some(finished) = timer.tick() {
        println!("[Timer] Countdown finished");
        emit_event(&app, AppEvent::TimerFinished(finished));
    }
    Ok(timer.snapshot())
}

#[tauri::command]
pub fn timer_status(state: tauri::State<'_, TimerState>) -> CommandResult<TimerSnapshot> {
    Ok(state.lock()?.snapshot())
}
