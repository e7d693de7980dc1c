//! Window management command module

use tauri::Manager;

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::LogRequest;

/// Show (creating if needed) one of the app windows: "widget", "chat",
/// "settings"
#[tauri::command]
pub async fn show_widget(app: tauri::AppHandle, widget: String) -> CommandResult<()> {
    crate::show_widget_window(&app, &widget)
        .map_err(|e| CommandError::WindowError(format!("Failed to show {} window: {}", widget, e)))
}

/// Hide one of the app windows
#[tauri::command]
pub async fn hide_widget(app: tauri::AppHandle, widget: String) -> CommandResult<()> {
    if let Some(window) = app.get_webview_window(&format!("{}-window", widget)) {
        window
            .hide()
            .map_err(|e| CommandError::WindowError(format!("Failed to hide {}: {}", widget, e)))?;
    }
    Ok(())
}

/// Pin or unpin the main widget window
#[tauri::command]
pub async fn set_always_on_top(app: tauri::AppHandle, enabled: bool) -> CommandResult<()> {
    if let Some(window) = app.get_webview_window("widget-window") {
        window
            .set_always_on_top(enabled)
            .map_err(|e| CommandError::WindowError(format!("Failed to set always-on-top: {}", e)))?;
    }
    Ok(())
}

/// Forward a frontend log line to the host console
#[tauri::command]
pub async fn log_message(request: LogRequest) -> CommandResult<()> {
    println!("[{}] {}", request.level.to_uppercase(), request.message);
    Ok(())
}
