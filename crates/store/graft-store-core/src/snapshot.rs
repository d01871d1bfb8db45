//! JSON snapshots of a [`MemoryStore`].
//!
//! ```json
//! {
//!   "folders": ["Assets/Fox"],
//!   "assets": [
//!     { "id": 1, "path": "Assets/Fox/body.png", "data": { "type": "texture", "data": {} } }
//!   ]
//! }
//! ```
//!
//! Ids are preserved so fixtures can refer to each other by number.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use graft_api_core::{AssetData, AssetId, AssetPath, AssetStore, StoreError};

use crate::memory::MemoryStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub folders: Vec<AssetPath>,
    #[serde(default)]
    pub assets: Vec<SnapshotAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAsset {
    pub id: AssetId,
    pub path: AssetPath,
    pub data: AssetData,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is inconsistent: {0}")]
    Store(#[from] StoreError),
}

impl MemoryStore {
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let mut store = MemoryStore::new();
        for folder in &snapshot.folders {
            store.ensure_folder(folder)?;
        }
        for asset in snapshot.assets {
            store.insert_with_id(asset.id, asset.path, asset.data)?;
        }
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Capture folders and assets, sorted by path and id respectively.
    pub fn snapshot(&self) -> StoreSnapshot {
        let folders = self.folders().into_iter().cloned().collect();
        let assets = self
            .assets()
            .into_iter()
            .filter_map(|(id, path)| {
                self.data(id).map(|data| SnapshotAsset {
                    id,
                    path: path.clone(),
                    data: data.clone(),
                })
            })
            .collect();
        StoreSnapshot { folders, assets }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
