//! graft-store-core: in-process asset store used by hosts without an engine-backed store

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{SnapshotAsset, SnapshotError, StoreSnapshot};
