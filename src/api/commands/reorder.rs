//! Drag gesture commands
//!
//! The webview streams the gesture (begin, hover, drop, end) with raw
//! pointer geometry; one reorder engine per list kind resolves it into a
//! move command which is applied to the matching list store.

use std::collections::HashMap;
use std::sync::Mutex;

use tauri::AppHandle;

use crate::core::reorder::{DropPosition, ElementBounds, InsertionMarker, MoveCommand, ReorderEngine};
use crate::core::store::ListStore;
use crate::shared::emit::emit_event;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::events::AppEvent;
use crate::shared::types::{ClipboardEntry, LinkEntry, TaskEntry};

const KINDS: [&str; 3] = ["clipboard", "links", "tasks"];

/// One reorder engine per reorderable list
pub struct ReorderState {
    engines: Mutex<HashMap<String, ReorderEngine>>,
}

impl ReorderState {
    pub fn new() -> Self {
        let engines = KINDS
            .iter()
            .map(|kind| (kind.to_string(), ReorderEngine::new()))
            .collect();
        Self {
            engines: Mutex::new(engines),
        }
    }

    fn with_engine<T>(
        &self,
        kind: &str,
        f: impl FnOnce(&mut ReorderEngine) -> T,
    ) -> CommandResult<T> {
        let mut engines = match self.engines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("[ReorderState] Mutex poisoned, recovering...");
                poisoned.into_inner()
            }
        };
        let engine = engines
            .get_mut(kind)
            .ok_or_else(|| CommandError::InvalidInput(format!("Unknown list kind: {}", kind)))?;
        Ok(f(engine))
    }
}

impl Default for ReorderState {
    fn default() -> Self {
        Self::new()
    }
}

#[tauri::command]
pub fn drag_begin(
    state: tauri::State<'_, ReorderState>,
    kind: String,
    index: usize,
) -> CommandResult<()> {
    state.with_engine(&kind, |engine| engine.begin(index))
}

/// Returns the insertion marker the webview should render; markers on all
/// other candidates are implicitly cleared.
#[tauri::command]
pub fn drag_hover(
    state: tauri::State<'_, ReorderState>,
    kind: String,
    pointer_y: f64,
    top: f64,
    height: f64,
    candidate_index: usize,
) -> CommandResult<Option<InsertionMarker>> {
    state.with_engine(&kind, |engine| {
        engine.hover(pointer_y, ElementBounds { top, height }, candidate_index)
    })
}

/// Resolve the drop and apply the resulting move to the list store.
///
/// Returns the applied move, or `None` for a no-op drop. The gesture is
/// not cleared here; `drag_end` runs on every termination.
#[tauri::command]
pub async fn drag_drop(
    app: AppHandle,
    state: tauri::State<'_, ReorderState>,
    clipboard: tauri::State<'_, ListStore<ClipboardEntry>>,
    links: tauri::State<'_, ListStore<LinkEntry>>,
    tasks: tauri::State<'_, ListStore<TaskEntry>>,
    kind: String,
    candidate_index: usize,
    position: DropPosition,
) -> CommandResult<Option<MoveCommand>> {
    let command = state.with_engine(&kind, |engine| engine.drop_at(candidate_index, position))?;

    let Some(cmd) = command else {
        return Ok(None);
    };

    match kind.as_str() {
        "clipboard" => {
            let items = clipboard.reorder(cmd.from, cmd.to).await?;
            emit_event(&app, AppEvent::ClipboardListUpdated(items));
        }
        "links" => {
            let items = links.reorder(cmd.from, cmd.to).await?;
            emit_event(&app, AppEvent::LinkListUpdated(items));
        }
        "tasks" => {
            let items = tasks.reorder(cmd.from, cmd.to).await?;
            emit_event(&app, AppEvent::TaskListUpdated(items));
        }
        other => {
            return Err(CommandError::InvalidInput(format!("Unknown list kind: {}", other)));
        }
    }

    Ok(Some(cmd))
}

#[tauri::command]
pub fn drag_end(state: tauri::State<'_, ReorderState>, kind: String) -> CommandResult<()> {
    state.with_engine(&kind, |engine| engine.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tracks_each_kind_separately() {
        let state = ReorderState::new();

        state.with_engine("clipboard", |e| e.begin(2)).unwrap();
        state.with_engine("tasks", |e| e.begin(0)).unwrap();

        let clipboard_dragging = state.with_engine("clipboard", |e| e.is_dragging()).unwrap();
        let links_dragging = state.with_engine("links", |e| e.is_dragging()).unwrap();
        assert!(clipboard_dragging);
        assert!(!links_dragging);

        state.with_engine("clipboard", |e| e.end()).unwrap();
        let clipboard_dragging = state.with_engine("clipboard", |e| e.is_dragging()).unwrap();
        let tasks_dragging = state.with_engine("tasks", |e| e.is_dragging()).unwrap();
        assert!(!clipboard_dragging);
        assert!(tasks_dragging);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let state = ReorderState::new();
        assert!(state.with_engine("bookmarks", |e| e.begin(0)).is_err());
    }
}
