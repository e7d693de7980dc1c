//! Two-tier list store
//!
//! Owns the local ordered snapshot of one list kind and mediates between
//! it, the persisted snapshot store, and the authoritative mirror. Every
//! mutating call sends the current snapshot to the mirror and replaces it
//! with the mirror's response (the single "adopt" reducer below). A
//! per-list in-flight guard serializes mutating calls so a second call
//! can never observe a stale snapshot; queued calls run in arrival order.

use std::sync::{Arc, Mutex};

use super::item::ListPayload;
use super::mirror::ListMirror;
use super::persist::SnapshotStore;
use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::{AddOutcome, ListItem};

pub struct ListStore<P: ListPayload> {
    items: Mutex<Vec<ListItem<P>>>,
    mirror: Arc<dyn ListMirror<P>>,
    snapshots: Arc<dyn SnapshotStore>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<P: ListPayload> ListStore<P> {
    pub fn new(mirror: Arc<dyn ListMirror<P>>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            mirror,
            snapshots,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Current snapshot
    pub fn items(&self) -> Vec<ListItem<P>> {
        self.lock_items().clone()
    }

    /// Read the persisted snapshot; if empty, adopt the mirror's list.
    ///
    /// Never propagates errors: failures are logged and the snapshot
    /// stays empty.
    pub async fn load(&self) -> Vec<ListItem<P>> {
        let _guard = self.in_flight.lock().await;

        match self.snapshots.read(P::KIND) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<ListItem<P>>>(&json) {
                Ok(items) if !items.is_empty() => {
                    self.adopt(items.clone());
                    return items;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("[ListStore:{}] Failed to parse persisted snapshot: {}", P::KIND, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                eprintln!("[ListStore:{}] Failed to read persisted snapshot: {}", P::KIND, e);
            }
        }

        match self.mirror.get_all().await {
            Ok(items) => {
                self.adopt(items.clone());
                items
            }
            Err(e) => {
                eprintln!("[ListStore:{}] Failed to load from mirror: {}", P::KIND, e);
                Vec::new()
            }
        }
    }

    /// Insert a candidate through the mirror.
    ///
    /// Validation runs before any mirror call. On a duplicate outcome the
    /// snapshot is left untouched; the caller surfaces the existing item.
    pub async fn add(&self, fields: P) -> CommandResult<AddOutcome<P>> {
        fields.validate().map_err(CommandError::InvalidInput)?;

        let _guard = self.in_flight.lock().await;

        let snapshot = self.lock_items().clone();
        let outcome = self.mirror.add(fields, snapshot).await?;

        if !outcome.is_duplicate {
            self.adopt(outcome.items.clone());
            self.persist(&outcome.items);
        }

        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> CommandResult<Vec<ListItem<P>>> {
        let _guard = self.in_flight.lock().await;

        let snapshot = self.lock_items().clone();
        let items = self.mirror.delete(id, snapshot).await?;

        self.adopt(items.clone());
        self.persist(&items);
        Ok(items)
    }

    pub async fn update(&self, id: &str, patch: P::Patch) -> CommandResult<Vec<ListItem<P>>> {
        let _guard = self.in_flight.lock().await;

        let snapshot = self.lock_items().clone();
        let items = self.mirror.update(id, patch, snapshot).await?;

        self.adopt(items.clone());
        self.persist(&items);
        Ok(items)
    }

    /// Move the element at `from` to `to`, purely locally.
    ///
    /// No mirror round-trip; `reorder(i, i)` is a no-op and triggers no
    /// persisted write. Indices refer to the pre-move list; the element is
    /// removed first, then inserted at `to` in the shortened array.
    pub async fn reorder(&self, from: usize, to: usize) -> CommandResult<Vec<ListItem<P>>> {
        let _guard = self.in_flight.lock().await;

        let mut items = self.lock_items().clone();
        if from >= items.len() || to >= items.len() {
            return Err(CommandError::InvalidInput(format!(
                "Reorder out of bounds: {} -> {} with {} items",
                from,
                to,
                items.len()
            )));
        }
        if from == to {
            return Ok(items);
        }

        let moved = items.remove(from);
        items.insert(to, moved);

        self.adopt(items.clone());
        self.persist(&items);
        Ok(items)
    }

    pub async fn clear_all(&self) -> CommandResult<Vec<ListItem<P>>> {
        let _guard = self.in_flight.lock().await;

        let items = self.mirror.clear_all().await?;

        self.adopt(items.clone());
        self.persist(&items);
        Ok(items)
    }

    /// The single reducer: replace the snapshot with a mirror response
    fn adopt(&self, items: Vec<ListItem<P>>) {
        *self.lock_items() = items;
    }

    /// Best-effort persistence; failures never block the in-memory state
    fn persist(&self, items: &[ListItem<P>]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("[ListStore:{}] Failed to serialize snapshot: {}", P::KIND, e);
                return;
            }
        };
        if let Err(e) = self.snapshots.write(P::KIND, &json) {
            eprintln!("[ListStore:{}] Failed to persist snapshot: {}", P::KIND, e);
        }
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<ListItem<P>>> {
        match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("[ListStore:{}] Mutex poisoned, recovering...", P::KIND);
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::core::store::mirror::HostMirror;
    use crate::core::store::persist::InMemorySnapshotStore;
    use crate::shared::types::{ClipboardEntry, LinkEntry, TaskEntry, TaskPatch};

    /// Snapshot store that counts writes, for no-op assertions
    struct CountingSnapshotStore {
        inner: InMemorySnapshotStore,
        writes: AtomicUsize,
    }

    impl CountingSnapshotStore {
        fn new() -> Self {
            Self {
                inner: InMemorySnapshotStore::new(),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl SnapshotStore for CountingSnapshotStore {
        fn read(&self, kind: &str) -> CommandResult<Option<String>> {
            self.inner.read(kind)
        }

        fn write(&self, kind: &str, json: &str) -> CommandResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.write(kind, json)
        }
    }

    /// Mirror that fails every call, for failure-semantics assertions
    struct FailingMirror;

    #[async_trait]
    impl ListMirror<ClipboardEntry> for FailingMirror {
        async fn get_all(&self) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
            Err(CommandError::Unknown("mirror offline".to_string()))
        }

        async fn add(
            &self,
            _fields: ClipboardEntry,
            _snapshot: Vec<ListItem<ClipboardEntry>>,
        ) -> CommandResult<AddOutcome<ClipboardEntry>> {
            Err(CommandError::Unknown("mirror offline".to_string()))
        }

        async fn delete(
            &self,
            _id: &str,
            _snapshot: Vec<ListItem<ClipboardEntry>>,
        ) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
            Err(CommandError::Unknown("mirror offline".to_string()))
        }

        async fn update(
            &self,
            _id: &str,
            _patch: (),
            _snapshot: Vec<ListItem<ClipboardEntry>>,
        ) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
            Err(CommandError::Unknown("mirror offline".to_string()))
        }

        async fn clear_all(&self) -> CommandResult<Vec<ListItem<ClipboardEntry>>> {
            Err(CommandError::Unknown("mirror offline".to_string()))
        }
    }

    fn clipboard_store() -> ListStore<ClipboardEntry> {
        ListStore::new(
            HostMirror::<ClipboardEntry>::new(),
            Arc::new(InMemorySnapshotStore::new()),
        )
    }

    fn clip(text: &str) -> ClipboardEntry {
        ClipboardEntry { text: text.to_string() }
    }

    #[tokio::test]
    async fn test_add_adopts_mirror_response() {
        let store = clipboard_store();

        let outcome = store.add(clip("hello")).await.unwrap();
        assert!(!outcome.is_duplicate);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, outcome.saved_item.id);
    }

    #[tokio::test]
    async fn test_duplicate_add_leaves_snapshot_and_persistence_untouched() {
        let snapshots = Arc::new(CountingSnapshotStore::new());
        let store = ListStore::new(HostMirror::<ClipboardEntry>::new(), snapshots.clone());

        let first = store.add(clip("once")).await.unwrap();
        let writes_after_first = snapshots.writes.load(Ordering::SeqCst);

        let second = store.add(clip("once")).await.unwrap();

        assert!(second.is_duplicate);
        assert_eq!(second.saved_item.id, first.saved_item.id);
        assert_eq!(store.items().len(), 1);
        assert_eq!(snapshots.writes.load(Ordering::SeqCst), writes_after_first);
    }

    #[tokio::test]
    async fn test_link_validation_rejects_before_mirror_call() {
        let mirror = HostMirror::<LinkEntry>::new();
        let store = ListStore::new(mirror.clone(), Arc::new(InMemorySnapshotStore::new()));

        let result = store
            .add(LinkEntry { name: "bad".to_string(), url: "not a url".to_string() })
            .await;

        assert!(matches!(result, Err(CommandError::InvalidInput(_))));
        assert!(store.items().is_empty());
        // The mirror never saw the candidate
        assert!(mirror.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_link_dedup_scenario_scheme_insensitive() {
        let store = ListStore::new(
            HostMirror::<LinkEntry>::new(),
            Arc::new(InMemorySnapshotStore::new()),
        );

        let first = store
            .add(LinkEntry { name: "Foo".to_string(), url: "https://foo.com".to_string() })
            .await
            .unwrap();
        let second = store
            .add(LinkEntry { name: "Foo".to_string(), url: "foo.com".to_string() })
            .await
            .unwrap();

        assert!(second.is_duplicate);
        assert_eq!(second.saved_item.id, first.saved_item.id);
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_mirror_failure_preserves_local_snapshot() {
        let store = ListStore::new(Arc::new(FailingMirror), Arc::new(InMemorySnapshotStore::new()));

        assert!(store.add(clip("anything")).await.is_err());
        assert!(store.delete("some-id").await.is_err());
        assert!(store.clear_all().await.is_err());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_reorder_matches_drop_index_semantics() {
        let store = clipboard_store();
        // Prepend order reverses: add 4..0 so the list reads 0,1,2,3,4
        for i in (0..5).rev() {
            store.add(clip(&i.to_string())).await.unwrap();
        }

        // Dragging index 0 after candidate 3 resolves to a (0, 3) move
        store.reorder(0, 3).await.unwrap();

        let order: Vec<String> = store.items().iter().map(|i| i.payload.text.clone()).collect();
        assert_eq!(order, vec!["1", "2", "3", "0", "4"]);
    }

    #[tokio::test]
    async fn test_reorder_same_index_is_a_noop_without_persist() {
        let snapshots = Arc::new(CountingSnapshotStore::new());
        let store = ListStore::new(HostMirror::<ClipboardEntry>::new(), snapshots.clone());

        store.add(clip("a")).await.unwrap();
        store.add(clip("b")).await.unwrap();
        let before = store.items();
        let writes_before = snapshots.writes.load(Ordering::SeqCst);

        let after = store.reorder(1, 1).await.unwrap();

        assert_eq!(
            before.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            after.iter().map(|i| i.id.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(snapshots.writes.load(Ordering::SeqCst), writes_before);
    }

    #[tokio::test]
    async fn test_reorder_out_of_bounds_is_rejected() {
        let store = clipboard_store();
        store.add(clip("only")).await.unwrap();

        assert!(store.reorder(0, 5).await.is_err());
        assert!(store.reorder(3, 0).await.is_err());
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_rapid_adds_are_serialized_by_the_guard() {
        let store = Arc::new(clipboard_store());

        let (a, b) = tokio::join!(store.add(clip("first")), store.add(clip("second")));
        let a = a.unwrap();
        let b = b.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 2);
        assert_ne!(a.saved_item.id, b.saved_item.id);
    }

    #[tokio::test]
    async fn test_load_prefers_persisted_snapshot() {
        let snapshots: Arc<dyn SnapshotStore> = Arc::new(InMemorySnapshotStore::new());

        // A previous session persisted one item
        let persisted = vec![ListItem::new(clip("from disk"))];
        snapshots
            .write(ClipboardEntry::KIND, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let store = ListStore::new(HostMirror::<ClipboardEntry>::new(), snapshots);
        let items = store.load().await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].payload.text, "from disk");
    }

    #[tokio::test]
    async fn test_load_falls_back_to_mirror_when_persistence_empty() {
        let mirror = HostMirror::<ClipboardEntry>::new();
        mirror.add(clip("mirror copy"), Vec::new()).await.unwrap();

        let store = ListStore::new(mirror, Arc::new(InMemorySnapshotStore::new()));
        let items = store.load().await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].payload.text, "mirror copy");
    }

    #[tokio::test]
    async fn test_load_swallows_mirror_failure() {
        let store = ListStore::new(Arc::new(FailingMirror), Arc::new(InMemorySnapshotStore::new()));

        let items = store.load().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_ids_unique_after_mixed_operations() {
        let store = ListStore::new(
            HostMirror::<TaskEntry>::new(),
            Arc::new(InMemorySnapshotStore::new()),
        );

        for i in 0..8 {
            store
                .add(TaskEntry { text: format!("task {}", i), completed: false })
                .await
                .unwrap();
        }
        let victim = store.items()[3].id.clone();
        store.delete(&victim).await.unwrap();
        store.reorder(0, 4).await.unwrap();
        let target = store.items()[2].id.clone();
        store
            .update(&target, TaskPatch { text: None, completed: Some(true) })
            .await
            .unwrap();

        let items = store.items();
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }
}
