//! Kind-specific list payload behavior
//!
//! Each list kind declares its storage key, size cap, natural key for
//! duplicate detection, and (for tasks) how partial updates merge.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::types::{ClipboardEntry, LinkEntry, TaskEntry, TaskPatch};

/// Behavior a list payload kind plugs into the generic store.
pub trait ListPayload:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Partial-update type; kinds without update support use `()`
    type Patch: Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Storage key and event namespace for this kind
    const KIND: &'static str;

    /// Hard size cap; items beyond it are dropped on insert
    const CAP: Option<usize>;

    /// Key used for duplicate detection; `None` disables dedup
    fn natural_key(&self) -> Option<String> {
        None
    }

    /// Validation hook, run before any mirror call
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Merge a patch into this payload in place
    fn apply_patch(&mut self, _patch: &Self::Patch) {}
}

impl ListPayload for ClipboardEntry {
    type Patch = ();

    const KIND: &'static str = "clipboard";
    const CAP: Option<usize> = Some(50);

    fn natural_key(&self) -> Option<String> {
        // Exact text match; no trimming or case folding
        Some(self.text.clone())
    }
}

impl ListPayload for LinkEntry {
    type Patch = ();

    const KIND: &'static str = "links";
    const CAP: Option<usize> = None;

    fn natural_key(&self) -> Option<String> {
        Some(normalize_url(&self.url))
    }

    fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)
    }
}

impl ListPayload for TaskEntry {
    type Patch = TaskPatch;

    const KIND: &'static str = "tasks";
    const CAP: Option<usize> = Some(100);

    fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Scheme-insensitive URL normal form used as the link natural key.
///
/// "https://Foo.com/" and "foo.com" normalize to the same key.
pub fn normalize_url(url: &str) -> String {
    let mut normalized = url.trim().to_lowercase();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = normalized.strip_prefix(scheme) {
            normalized = rest.to_string();
            break;
        }
    }

    while normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://)?[A-Za-z0-9][-A-Za-z0-9.]*\.[A-Za-z]{2,}(:\d+)?(/\S*)?$")
            .expect("url pattern compiles")
    })
}

/// Syntactic URL check for the link kind.
///
/// Rejected candidates never reach the mirror.
pub fn validate_url(url: &str) -> Result<(), String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("URL must not be empty".to_string());
    }
    if !url_pattern().is_match(trimmed) {
        return Err(format!("'{}' is not a valid URL", trimmed));
    }
    Ok(())
}
