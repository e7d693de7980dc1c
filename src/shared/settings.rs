use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use ts_rs::TS;

use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/settings.ts")]
pub struct AppSettings {
    pub hotkeys: HotkeySettings,
    pub api_keys: ApiKeys,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/settings.ts")]
pub struct HotkeySettings {
    pub toggle_widget: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/settings.ts")]
pub struct ApiKeys {
    pub openai_api_key: String,
    pub gemini_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/settings.ts")]
pub struct UserPreferences {
    pub theme: String,
    pub always_on_top: bool,
    pub clipboard_capture: bool,
    pub default_timer_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hotkeys: HotkeySettings {
                toggle_widget: "Control+Shift+V".to_string(),
            },
            api_keys: ApiKeys {
                openai_api_key: String::new(),
                gemini_api_key: String::new(),
            },
            preferences: UserPreferences {
                theme: "system".to_string(),
                always_on_top: true,
                clipboard_capture: true,
                default_timer_minutes: 25,
            },
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> Result<PathBuf, String> {
        ProjectDirs::from("com", "clipdock", "clipdock")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| "Failed to determine config directory".to_string())
    }

    pub fn load() -> Result<Self, String> {
        let path = Self::get_settings_path()?;

        if !path.exists() {
            let settings = Self::default();
            settings.save_to_disk()?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Internal helper to save to disk without event emission
    fn save_to_disk(&self) -> Result<(), String> {
        let path = Self::get_settings_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }

    /// Save settings to disk and emit update event
    pub fn save(&self, app: &AppHandle) -> Result<(), String> {
        self.save_to_disk()?;

        emit_event(app, AppEvent::SettingsUpdated(self.clone()));

        Ok(())
    }
}
