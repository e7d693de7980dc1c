use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::settings::AppSettings;
use super::types::{ClipboardEntry, LinkEntry, ListItem, TaskEntry, TimerSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export, export_to = "ui/src/types/events.ts")]
pub enum AppEvent {
    #[serde(rename = "list://clipboard-updated")]
    ClipboardListUpdated(Vec<ListItem<ClipboardEntry>>),

    #[serde(rename = "list://links-updated")]
    LinkListUpdated(Vec<ListItem<LinkEntry>>),

    #[serde(rename = "list://tasks-updated")]
    TaskListUpdated(Vec<ListItem<TaskEntry>>),

    #[serde(rename = "settings://updated")]
    SettingsUpdated(AppSettings),

    #[serde(rename = "timer://finished")]
    TimerFinished(TimerSnapshot),
}
