//! graft-api-core: asset identity, paths, kinds and the store contract (engine-agnostic)

pub mod asset_path;
pub mod data;
pub mod fields;
pub mod ids;
pub mod kind;
pub mod store;

pub use asset_path::{AssetPath, PathError};
pub use data::{AssetData, DataError};
pub use fields::{FieldError, FieldPath, FieldSegment, ReferenceField, References};
pub use ids::{AssetId, IdAllocator};
pub use kind::{classify, AssetKind, AssetType, DestinationFolder};
pub use store::{AssetStore, StoreError, StoreResult};

use serde::{Deserialize, Serialize};

/// A classified asset discovered in a dependency closure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetNode {
    pub id: AssetId,
    pub path: AssetPath,
    pub kind: AssetKind,
}
