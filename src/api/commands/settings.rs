//! Settings command module
//!
//! Handles application settings persistence.

use tauri::AppHandle;

use crate::shared::settings::AppSettings;

/// Get current application settings
#[tauri::command]
pub async fn get_settings() -> Result<AppSettings, String> {
    AppSettings::load()
}

/// Save application settings
#[tauri::command]
pub async fn save_settings(app: AppHandle, settings: AppSettings) -> Result<(), String> {
    settings.save(&app)
}
