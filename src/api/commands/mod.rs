//! Command modules for the Tauri application
//!
//! - `lists`: kind-parameterized list store surface (clipboard/links/tasks)
//! - `reorder`: drag gesture commands feeding the reorder engines
//! - `timer`: countdown timer commands
//! - `assistant`: grammar checking, image generation, chat
//! - `settings`: settings persistence
//! - `window`: window lifecycle and logging

pub mod assistant;
pub mod lists;
pub mod reorder;
pub mod settings;
pub mod timer;
pub mod window;
