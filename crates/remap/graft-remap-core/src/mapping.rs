//! Original path -> clone table for one clone operation.

use indexmap::IndexMap;
use serde::Serialize;

use graft_api_core::{AssetKind, AssetNode, AssetPath};

use crate::error::RemapError;

/// Insertion-ordered map from an original asset's path to its clone.
///
/// Built monotonically by the cloner: a key is inserted at most once and never
/// overwritten. Strategies only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CloneMapping {
    entries: IndexMap<AssetPath, AssetNode>,
}

impl CloneMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original -> clone`. A second insert for the same original is
    /// rejected and the first entry is kept.
    pub fn insert(&mut self, original: AssetPath, clone: AssetNode) -> Result<(), RemapError> {
        if self.entries.contains_key(&original) {
            return Err(RemapError::AlreadyMapped(original));
        }
        self.entries.insert(original, clone);
        Ok(())
    }

    pub fn get(&self, original: &AssetPath) -> Option<&AssetNode> {
        self.entries.get(original)
    }

    pub fn contains(&self, original: &AssetPath) -> bool {
        self.entries.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetPath, &AssetNode)> {
        self.entries.iter()
    }

    pub fn clones(&self) -> impl Iterator<Item = &AssetNode> {
        self.entries.values()
    }

    pub fn clones_of_kind(&self, kind: AssetKind) -> impl Iterator<Item = &AssetNode> {
        self.entries.values().filter(move |n| n.kind == kind)
    }
}
