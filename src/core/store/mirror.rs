//! Authoritative mirror side of the two-tier list store
//!
//! The mirror receives the caller's current snapshot on every mutating
//! call, reconciles it (dedup on natural key, cap enforcement), and
//! returns the new authoritative list. Requests are processed in arrival
//! order.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::item::ListPayload;
use crate::shared::errors::CommandResult;
use crate::shared::types::{AddOutcome, ListItem};

/// Request/response contract of the authoritative list copy.
///
/// Kind-parameterized; one mirror instance per list kind.
#[async_trait]
pub trait ListMirror<P: ListPayload>: Send + Sync {
    async fn get_all(&self) -> CommandResult<Vec<ListItem<P>>>;

    /// Reconcile an insert against the sent snapshot.
    ///
    /// On a natural-key collision the existing item comes back tagged
    /// `is_duplicate` and the snapshot is returned unchanged; otherwise a
    /// fresh item is prepended and the list truncated to the kind's cap.
    async fn add(&self, fields: P, snapshot: Vec<ListItem<P>>) -> CommandResult<AddOutcome<P>>;

    async fn delete(&self, id: &str, snapshot: Vec<ListItem<P>>)
        -> CommandResult<Vec<ListItem<P>>>;

    async fn update(
        &self,
        id: &str,
        patch: P::Patch,
        snapshot: Vec<ListItem<P>>,
    ) -> CommandResult<Vec<ListItem<P>>>;

    async fn clear_all(&self) -> CommandResult<Vec<ListItem<P>>>;
}

/// In-process mirror held by the host for the lifetime of the app.
///
/// Created empty at process start; only a clear empties it again.
pub struct HostMirror<P: ListPayload> {
    items: Mutex<Vec<ListItem<P>>>,
}

impl<P: ListPayload> HostMirror<P> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(Vec::new()),
        })
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<ListItem<P>>> {
        match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("[HostMirror] Mutex poisoned for '{}', recovering...", P::KIND);
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl<P: ListPayload> ListMirror<P> for HostMirror<P> {
    async fn get_all(&self) -> CommandResult<Vec<ListItem<P>>> {
        Ok(self.lock_items().clone())
    }

    async fn add(&self, fields: P, snapshot: Vec<ListItem<P>>) -> CommandResult<AddOutcome<P>> {
        let mut items = self.lock_items();
        *items = snapshot;

        if let Some(key) = fields.natural_key() {
            if let Some(existing) = items
                .iter()
                .find(|item| item.payload.natural_key().as_deref() == Some(key.as_str()))
            {
                return Ok(AddOutcome {
                    saved_item: existing.clone(),
                    items: items.clone(),
                    is_duplicate: true,
                });
            }
        }

        let saved = ListItem::new(fields);
        items.insert(0, saved.clone());
        if let Some(cap) = P::CAP {
            // Drops the tail: oldest by insertion order, not by timestamp
            items.truncate(cap);
        }

        Ok(AddOutcome {
            items: items.clone(),
            saved_item: saved,
            is_duplicate: false,
        })
    }

    async fn delete(
        &self,
        id: &str,
        snapshot: Vec<ListItem<P>>,
    ) -> CommandResult<Vec<ListItem<P>>> {
        let mut items = self.lock_items();
        *items = snapshot;
        items.retain(|item| item.id != id);
        Ok(items.clone())
    }

    async fn update(
        &self,
        id: &str,
        patch: P::Patch,
        snapshot: Vec<ListItem<P>>,
    ) -> CommandResult<Vec<ListItem<P>>> {
        let mut items = self.lock_items();
        *items = snapshot;
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            item.payload.apply_patch(&patch);
        }
        Ok(items.clone())
    }

    async fn clear_all(&self) -> CommandResult<Vec<ListItem<P>>> {
        let mut items = self.lock_items();
        items.clear();
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{ClipboardEntry, LinkEntry, TaskEntry, TaskPatch};

    fn clip(text: &str) -> ClipboardEntry {
        ClipboardEntry { text: text.to_string() }
    }

    #[tokio::test]
    async fn test_add_prepends_most_recent_first() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let first = mirror.add(clip("first"), Vec::new()).await.unwrap();
        let second = mirror.add(clip("second"), first.items).await.unwrap();

        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[0].payload.text, "second");
        assert_eq!(second.items[1].payload.text, "first");
    }

    #[tokio::test]
    async fn test_duplicate_add_returns_existing_item_unchanged() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let first = mirror.add(clip("same text"), Vec::new()).await.unwrap();
        let existing_id = first.saved_item.id.clone();

        let second = mirror.add(clip("same text"), first.items).await.unwrap();

        assert!(second.is_duplicate);
        assert_eq!(second.saved_item.id, existing_id);
        assert_eq!(second.items.len(), 1);
    }

    #[tokio::test]
    async fn test_link_dedup_is_scheme_insensitive() {
        let mirror = HostMirror::<LinkEntry>::new();

        let first = mirror
            .add(
                LinkEntry { name: "Foo".to_string(), url: "https://foo.com".to_string() },
                Vec::new(),
            )
            .await
            .unwrap();

        let second = mirror
            .add(
                LinkEntry { name: "Foo again".to_string(), url: "foo.com".to_string() },
                first.items,
            )
            .await
            .unwrap();

        assert!(second.is_duplicate);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.saved_item.id, first.saved_item.id);
    }

    #[tokio::test]
    async fn test_cap_drops_oldest_by_insertion_order() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let mut items = Vec::new();
        for i in 0..60 {
            let outcome = mirror.add(clip(&format!("item {}", i)), items).await.unwrap();
            items = outcome.items;
            assert!(items.len() <= 50);
        }

        assert_eq!(items.len(), 50);
        assert_eq!(items[0].payload.text, "item 59");
        // "item 0" .. "item 9" fell off the tail
        assert!(!items.iter().any(|item| item.payload.text == "item 9"));
    }

    #[tokio::test]
    async fn test_task_cap_is_one_hundred() {
        let mirror = HostMirror::<TaskEntry>::new();

        let mut items = Vec::new();
        for i in 0..120 {
            let outcome = mirror
                .add(
                    TaskEntry { text: format!("task {}", i), completed: false },
                    items,
                )
                .await
                .unwrap();
            items = outcome.items;
        }

        assert_eq!(items.len(), 100);
    }

    #[tokio::test]
    async fn test_delete_filters_by_id() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let first = mirror.add(clip("keep"), Vec::new()).await.unwrap();
        let second = mirror.add(clip("drop"), first.items).await.unwrap();
        let doomed = second.saved_item.id.clone();

        let items = mirror.delete(&doomed, second.items).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].payload.text, "keep");
    }

    #[tokio::test]
    async fn test_update_merges_patch_in_place() {
        let mirror = HostMirror::<TaskEntry>::new();

        let added = mirror
            .add(TaskEntry { text: "todo".to_string(), completed: false }, Vec::new())
            .await
            .unwrap();
        let id = added.saved_item.id.clone();

        let items = mirror
            .update(&id, TaskPatch { text: None, completed: Some(true) }, added.items)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].payload.completed);
        assert_eq!(items[0].payload.text, "todo");
    }

    #[tokio::test]
    async fn test_clear_all_empties_the_mirror() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let added = mirror.add(clip("anything"), Vec::new()).await.unwrap();
        assert_eq!(added.items.len(), 1);

        let cleared = mirror.clear_all().await.unwrap();
        assert!(cleared.is_empty());
        assert!(mirror.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_stay_unique_across_operations() {
        let mirror = HostMirror::<ClipboardEntry>::new();

        let mut items = Vec::new();
        for i in 0..10 {
            items = mirror.add(clip(&format!("n{}", i)), items).await.unwrap().items;
        }
        let victim = items[4].id.clone();
        items = mirror.delete(&victim, items).await.unwrap();
        items = mirror.add(clip("n4"), items).await.unwrap().items;

        let mut ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }
}
