use tauri::{AppHandle, Emitter};

use super::events::AppEvent;

/// Emit an application event to all windows
///
/// The event name doubles as the serde tag so the frontend can subscribe
/// with the same string it sees in the payload.
pub fn emit_event(app: &AppHandle, event: AppEvent) {
    match &event {
        AppEvent::ClipboardListUpdated(items) => {
            if let Err(e) = app.emit("list://clipboard-updated", items) {
                eprintln!("[Emit] Failed to emit clipboard list update: {}", e);
            }
        }
        AppEvent::LinkListUpdated(items) => {
            if let Err(e) = app.emit("list://links-updated", items) {
                eprintln!("[Emit] Failed to emit link list update: {}", e);
            }
        }
        AppEvent::TaskListUpdated(items) => {
            if let Err(e) = app.emit("list://tasks-updated", items) {
                eprintln!("[Emit] Failed to emit task list update: {}", e);
            }
        }
        AppEvent::SettingsUpdated(settings) => {
            if let Err(e) = app.emit("settings://updated", settings) {
                eprintln!("[Emit] Failed to emit settings update: {}", e);
            }
        }
        AppEvent::TimerFinished(snapshot) => {
            if let Err(e) = app.emit("timer://finished", snapshot) {
                eprintln!("[Emit] Failed to emit timer finished: {}", e);
            }
        }
    }
}
