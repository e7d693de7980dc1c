//! List commands: the kind-parameterized mirror surface for the webview
//!
//! One command set per list kind. Every successful mutation emits the
//! kind's list-updated event so all windows re-render from the same
//! authoritative snapshot.

use tauri::AppHandle;
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::core::clipboard::ClipboardMonitor;
use crate::core::store::ListStore;
use crate::shared::emit::emit_event;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::events::AppEvent;
use crate::shared::types::{
    AddOutcome, ClipboardEntry, LinkEntry, ListItem, TaskEntry, TaskPatch,
};

// ── Clipboard history ───────────────────────────────────────────────

#[tauri::command]
pub fn get_clipboard_items(
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
    Ok(store.items())
}

#[tauri::command]
pub async fn add_clipboard_item(
    app: AppHandle,
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
    text: String,
) -> CommandResult<AddOutcome<ClipboardEntry>> {
    let outcome = store.add(ClipboardEntry { text }).await?;
    if !outcome.is_duplicate {
        emit_event(&app, AppEvent::ClipboardListUpdated(outcome.items.clone()));
    }
    Ok(outcome)
}

#[tauri::command]
pub async fn delete_clipboard_item(
    app: AppHandle,
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
    id: String,
) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
    let items = store.delete(&id).await?;
    emit_event(&app, AppEvent::ClipboardListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn reorder_clipboard(
    app: AppHandle,
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
    from: usize,
    to: usize,
) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
    let items = store.reorder(from, to).await?;
    emit_event(&app, AppEvent::ClipboardListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn clear_clipboard(
    app: AppHandle,
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
    let items = store.clear_all().await?;
    emit_event(&app, AppEvent::ClipboardListUpdated(items.clone()));
    Ok(items)
}

/// Write a stored history item back to the system clipboard.
///
/// Flags the monitor so the write is not re-captured as a new entry.
#[tauri::command]
pub fn copy_clipboard_item(
    app: AppHandle,
    store: tauri::State<'_, ListStore<ClipboardEntry>>,
    monitor: tauri::State<'_, ClipboardMonitor>,
    id: String,
) -> CommandResult<()> {
    let item = store
        .items()
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| CommandError::InvalidInput("Clipboard item not found".to_string()))?;

    monitor.ignore_next_capture();

    app.clipboard()
        .write_text(item.payload.text)
        .map_err(|e| CommandError::ClipboardError(format!("Failed to write to clipboard: {}", e)))?;

    Ok(())
}

// ── Favorite links ──────────────────────────────────────────────────

#[tauri::command]
pub fn get_link_items(
    store: tauri::State<'_, ListStore<LinkEntry>>,
) -> CommandResult<Vec<ListItem<LinkEntry>>> {
    Ok(store.items())
}

#[tauri::command]
pub async fn add_link(
    app: AppHandle,
    store: tauri::State<'_, ListStore<LinkEntry>>,
    name: String,
    url: String,
) -> CommandResult<AddOutcome<LinkEntry>> {
    let outcome = store.add(LinkEntry { name, url }).await?;
    if !outcome.is_duplicate {
        emit_event(&app, AppEvent::LinkListUpdated(outcome.items.clone()));
    }
    Ok(outcome)
}

#[tauri::command]
pub async fn delete_link(
    app: AppHandle,
    store: tauri::State<'_, ListStore<LinkEntry>>,
    id: String,
) -> CommandResult<Vec<ListItem<LinkEntry>>> {
    let items = store.delete(&id).await?;
    emit_event(&app, AppEvent::LinkListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn reorder_links(
    app: AppHandle,
    store: tauri::State<'_, ListStore<LinkEntry>>,
    from: usize,
    to: usize,
) -> CommandResult<Vec<ListItem<LinkEntry>>> {
    let items = store.reorder(from, to).await?;
    emit_event(&app, AppEvent::LinkListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn clear_links(
    app: AppHandle,
    store: tauri::State<'_, ListStore<LinkEntry>>,
) -> CommandResult<Vec<ListItem<LinkEntry>>> {
    let items = store.clear_all().await?;
    emit_event(&app, AppEvent::LinkListUpdated(items.clone()));
    Ok(items)
}

// ── Tasks ───────────────────────────────────────────────────────────

#[tauri::command]
pub fn get_task_items(
    store: tauri::State<'_, ListStore<TaskEntry>>,
) -> CommandResult<Vec<ListItem<TaskEntry>>> {
    Ok(store.items())
}

#[tauri::command]
pub async fn add_task(
    app: AppHandle,
    store: tauri::State<'_, ListStore<TaskEntry>>,
    text: String,
) -> CommandResult<AddOutcome<TaskEntry>> {
    let outcome = store.add(TaskEntry { text, completed: false }).await?;
    if !outcome.is_duplicate {
        emit_event(&app, AppEvent::TaskListUpdated(outcome.items.clone()));
    }
    Ok(outcome)
}

#[tauri::command]
pub async fn update_task(
    app: AppHandle,
    store: tauri::State<'_, ListStore<TaskEntry>>,
    id: String,
    patch: TaskPatch,
) -> CommandResult<Vec<ListItem<TaskEntry>>> {
    let items = store.update(&id, patch).await?;
    emit_event(&app, AppEvent::TaskListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn delete_task(
    app: AppHandle,
    store: tauri::State<'_, ListStore<TaskEntry>>,
    id: String,
) -> CommandResult<Vec<ListItem<TaskEntry>>> {
    let items = store.delete(&id).await?;
    emit_event(&app, AppEvent::TaskListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn reorder_tasks(
    app: AppHandle,
    store: tauri::State<'_, ListStore<TaskEntry>>,
    from: usize,
    to: usize,
) -> CommandResult<Vec<ListItem<TaskEntry>>> {
    let items = store.reorder(from, to).await?;
    emit_event(&app, AppEvent::TaskListUpdated(items.clone()));
    Ok(items)
}

#[tauri::command]
pub async fn clear_tasks(
    app: AppHandle,
    store: tauri::State<'_, ListStore<TaskEntry>>,
) -> CommandResult<Vec<ListItem<TaskEntry>>> {
    let items = store.clear_all().await?;
    emit_event(&app, AppEvent::TaskListUpdated(items.clone()));
    Ok(items)
}

// ── Capture monitor ─────────────────────────────────────────────────

/// Toggle clipboard capture on/off
#[tauri::command]
pub fn toggle_clipboard_capture(
    monitor: tauri::State<'_, ClipboardMonitor>,
) -> CommandResult<bool> {
    Ok(monitor.toggle())
}

/// Get clipboard capture status
#[tauri::command]
pub fn get_clipboard_capture_status(
    monitor: tauri::State<'_, ClipboardMonitor>,
) -> CommandResult<bool> {
    Ok(monitor.is_enabled())
}
