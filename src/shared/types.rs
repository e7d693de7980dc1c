use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single list item, generic over the kind-specific payload.
///
/// Identity is `id` (opaque UUID). Duplicate detection uses the payload's
/// natural key, never the id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ListItem<P> {
    pub id: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub payload: P,
}

impl<P> ListItem<P> {
    /// Create a new item with a fresh id and the current time
    pub fn new(payload: P) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Clipboard history entry payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ClipboardEntry {
    pub text: String,
}

/// Favorite link payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
}

/// Task payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct TaskEntry {
    pub text: String,
    pub completed: bool,
}

/// Partial update for a task; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Result of an add call against the mirror.
///
/// `is_duplicate` marks the distinguished "already exists" success variant:
/// `saved_item` is then the pre-existing item and `items` is unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct AddOutcome<P> {
    pub items: Vec<ListItem<P>>,
    pub saved_item: ListItem<P>,
    pub is_duplicate: bool,
}

/// Countdown timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Point-in-time view of the countdown timer
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_secs: u64,
    pub duration_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct GrammarCheckRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct GrammarCheckResponse {
    pub corrected: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct GenerateImageResponse {
    pub data_base64: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct SavedImage {
    pub path: String,
}

/// One message in a chat exchange; `role` is "user" or "assistant"
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct ChatResponse {
    pub reply: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ui/src/types/bindings.ts")]
pub struct LogRequest {
    pub level: String,
    pub message: String,
}
