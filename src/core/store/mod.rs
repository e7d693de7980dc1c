//! Two-tier list storage: local snapshot + authoritative mirror
//!
//! One `ListStore` per item kind (clipboard entries, links, tasks), each
//! backed by a `ListMirror` and a persisted key->JSON snapshot.

pub mod item;
pub mod list_store;
pub mod mirror;
pub mod persist;

pub use item::ListPayload;
pub use list_store::ListStore;
pub use mirror::{HostMirror, ListMirror};
pub use persist::SnapshotStore;
