//! Clipboard capture monitor
//!
//! Polls the system clipboard and feeds new text into the clipboard list
//! store. App-initiated writes (copy-back of a stored item) set the
//! ignore-next flag so they don't re-enter history as ghost copies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Manager};
use tauri_plugin_clipboard_manager::ClipboardExt;
use tokio::time::Duration;

use crate::core::store::ListStore;
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::types::ClipboardEntry;

const BASE_POLL_INTERVAL_MS: u64 = 500;
const MAX_POLL_INTERVAL_MS: u64 = 5000;
const MAX_CONSECUTIVE_ERRORS: u32 = 10;

pub struct ClipboardMonitor {
    enabled: Arc<Mutex<bool>>,
    last_content: Arc<Mutex<Option<String>>>,
    ignore_next: Arc<AtomicBool>,
}

impl ClipboardMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(Mutex::new(enabled)),
            last_content: Arc::new(Mutex::new(None)),
            ignore_next: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start polling for clipboard changes
    pub fn start(&self, app: AppHandle) {
        let enabled = Arc::clone(&self.enabled);
        let last_content = Arc::clone(&self.last_content);
        let ignore_next = Arc::clone(&self.ignore_next);

        tauri::async_runtime::spawn(async move {
            println!("[ClipboardMonitor] Started monitoring");

            let mut consecutive_errors = 0u32;

            loop {
                let is_enabled = match enabled.lock() {
                    Ok(guard) => *guard,
                    Err(poisoned) => {
                        eprintln!("[ClipboardMonitor] Mutex poisoned, recovering...");
                        *poisoned.into_inner()
                    }
                };
                if !is_enabled {
                    tokio::time::sleep(Duration::from_millis(BASE_POLL_INTERVAL_MS)).await;
                    consecutive_errors = 0;
                    continue;
                }

                let sleep_interval = match app.clipboard().read_text() {
                    Ok(current) => {
                        consecutive_errors = 0;

                        if current.is_empty() {
                            BASE_POLL_INTERVAL_MS
                        } else {
                            let should_ignore = ignore_next.swap(false, Ordering::SeqCst);

                            let has_changed = {
                                let last = match last_content.lock() {
                                    Ok(guard) => guard,
                                    Err(poisoned) => poisoned.into_inner(),
                                };
                                match &*last {
                                    Some(prev) => prev != &current,
                                    None => true,
                                }
                            };

                            if has_changed {
                                {
                                    let mut last = match last_content.lock() {
                                        Ok(guard) => guard,
                                        Err(poisoned) => poisoned.into_inner(),
                                    };
                                    *last = Some(current.clone());
                                }

                                if should_ignore {
                                    println!("[ClipboardMonitor] Ghost copy detected and ignored");
                                } else {
                                    println!("[ClipboardMonitor] Detected clipboard change");
                                    capture(&app, current).await;
                                }
                            }

                            BASE_POLL_INTERVAL_MS
                        }
                    }
                    Err(e) => {
                        consecutive_errors += 1;

                        if consecutive_errors == 1 || consecutive_errors % 10 == 0 {
                            eprintln!(
                                "[ClipboardMonitor] Failed to read clipboard (error #{}): {}",
                                consecutive_errors, e
                            );
                        }

                        if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                            std::cmp::min(
                                BASE_POLL_INTERVAL_MS
                                    * (2_u64.pow((consecutive_errors - MAX_CONSECUTIVE_ERRORS).min(4))),
                                MAX_POLL_INTERVAL_MS,
                            )
                        } else {
                            BASE_POLL_INTERVAL_MS
                        }
                    }
                };

                tokio::time::sleep(Duration::from_millis(sleep_interval)).await;
            }
        });
    }

    /// Suppress capture of the next clipboard change (copy-back writes)
    pub fn ignore_next_capture(&self) {
        self.ignore_next.store(true, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        match self.enabled.lock() {
            Ok(enabled) => *enabled,
            Err(poisoned) => {
                eprintln!("[ClipboardMonitor] Mutex poisoned in is_enabled(), recovering...");
                *poisoned.into_inner()
            }
        }
    }

    /// Toggle capture on/off, returning the new state
    pub fn toggle(&self) -> bool {
        match self.enabled.lock() {
            Ok(mut enabled) => {
                *enabled = !*enabled;
                println!("[ClipboardMonitor] Toggled to {}", *enabled);
                *enabled
            }
            Err(poisoned) => {
                eprintln!("[ClipboardMonitor] Mutex poisoned in toggle(), recovering...");
                let mut guard = poisoned.into_inner();
                *guard = !*guard;
                *guard
            }
        }
    }

    /// Get a clone of the shared handles for the managed state
    pub fn clone_arc(&self) -> Self {
        Self {
            enabled: Arc::clone(&self.enabled),
            last_content: Arc::clone(&self.last_content),
            ignore_next: Arc::clone(&self.ignore_next),
        }
    }
}

/// Push captured text into the clipboard list store and notify windows
async fn capture(app: &AppHandle, text: String) {
    let store = app.state::<ListStore<ClipboardEntry>>();

    match store.add(ClipboardEntry { text }).await {
        Ok(outcome) => {
            if !outcome.is_duplicate {
                emit_event(app, AppEvent::ClipboardListUpdated(outcome.items));
            }
        }
        Err(e) => {
            eprintln!("[ClipboardMonitor] Failed to store captured text: {}", e);
        }
    }
}
