//! Asset identifiers and their allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an asset held by a store.
///
/// Handles are only meaningful to the store that issued them and stay stable
/// for the lifetime of one clone operation. Paths, not ids, are the keys used
/// for deduplication and mapping lookups.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`AssetId`].
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> AssetId {
        let id = AssetId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Make sure ids handed out from now on never collide with `id`.
    /// Used when assets arrive with pre-assigned ids (snapshots).
    #[inline]
    pub fn reserve(&mut self, id: AssetId) {
        if id.0 >= self.next {
            self.next = id.0.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc(), AssetId(0));
        assert_eq!(alloc.alloc(), AssetId(1));
    }

    #[test]
    fn reserve_skips_past_existing_ids() {
        let mut alloc = IdAllocator::new();
        alloc.reserve(AssetId(41));
        assert_eq!(alloc.alloc(), AssetId(42));
        alloc.reserve(AssetId(3));
        assert_eq!(alloc.alloc(), AssetId(43));
    }

    #[test]
    fn display_is_hash_prefixed() {
        assert_eq!(AssetId(7).to_string(), "#7");
    }
}
