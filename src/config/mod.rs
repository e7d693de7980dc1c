//! Window configuration registry
//!
//! Centralized window configuration to eliminate hardcoded dimensions.

use serde::{Deserialize, Serialize};

/// Window configuration for an app window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub transparent: bool,
    pub resizable: bool,
    pub always_on_top: bool,
}

impl WindowConfig {
    pub fn new(width: f64, height: f64, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            transparent: true,
            resizable: false,
            always_on_top: true,
        }
    }
}

/// Window registry mapping window ids to configurations
pub fn get_window_config(window_id: &str) -> WindowConfig {
    match window_id {
        "widget" => WindowConfig::new(380.0, 560.0, "ClipDock"),
        "chat" => WindowConfig {
            resizable: true,
            ..WindowConfig::new(420.0, 520.0, "ClipDock Chat")
        },
        "settings" => WindowConfig {
            transparent: false,
            resizable: true,
            always_on_top: false,
            ..WindowConfig::new(720.0, 560.0, "Settings")
        },
        _ => WindowConfig::new(400.0, 500.0, "ClipDock"), // Default fallback
    }
}
