//! The asset store seam.
//!
//! The clone engine never owns assets. Hosts hand it a `&mut dyn AssetStore`
//! for the duration of one operation; every read, duplicate and write goes
//! through this trait.

use thiserror::Error;

use crate::asset_path::{AssetPath, PathError};
use crate::data::AssetData;
use crate::fields::{FieldError, FieldPath, ReferenceField};
use crate::ids::AssetId;
use crate::kind::AssetKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("no asset at '{0}'")]
    NotFound(AssetPath),
    #[error("unknown asset id {0}")]
    UnknownId(AssetId),
    #[error("an asset already exists at '{0}'")]
    AlreadyExists(AssetPath),
    #[error("destination folder '{0}' does not exist")]
    MissingFolder(AssetPath),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("store rejected the operation: {0}")]
    Rejected(String),
    #[error("failed to persist: {0}")]
    Persist(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait AssetStore {
    /// Paths `path` depends on, without `path` itself. With `recursive` the
    /// whole transitive closure is returned, each path once, in discovery order.
    fn dependencies(&self, path: &AssetPath, recursive: bool) -> Vec<AssetPath>;

    /// Resolve a path to the asset stored there.
    fn load(&self, path: &AssetPath) -> Option<AssetId>;

    fn path_of(&self, id: AssetId) -> Option<&AssetPath>;

    fn data(&self, id: AssetId) -> Option<&AssetData>;

    /// Overwrite the payload of an existing asset.
    fn replace(&mut self, id: AssetId, data: AssetData) -> StoreResult<()>;

    /// True when an asset or a folder lives at `path`.
    fn exists(&self, path: &AssetPath) -> bool;

    /// Create `path` and any missing ancestors. Existing folders are fine.
    fn ensure_folder(&mut self, path: &AssetPath) -> StoreResult<()>;

    fn delete(&mut self, path: &AssetPath) -> StoreResult<()>;

    /// Copy the asset at `src` next to `dst_hint`. The store picks the final
    /// path (see [`AssetStore::unique_path`]); the copy gets a fresh id.
    fn duplicate(&mut self, src: &AssetPath, dst_hint: &AssetPath) -> StoreResult<AssetId>;

    /// Report whether duplicating `src` would be refused, without mutating
    /// anything. The hint's folder need not exist yet.
    fn check_duplicate(&self, src: &AssetPath, _dst_hint: &AssetPath) -> StoreResult<()> {
        match self.load(src) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(src.clone())),
        }
    }

    fn mark_dirty(&mut self, id: AssetId);

    /// Flush a dirty asset to durable storage.
    fn persist(&mut self, id: AssetId) -> StoreResult<()>;

    /// First free path derived from `hint`: the hint itself, then
    /// `stem 1.ext`, `stem 2.ext`, ...
    fn unique_path(&self, hint: &AssetPath) -> StoreResult<AssetPath> {
        if !self.exists(hint) {
            return Ok(hint.clone());
        }
        let stem = hint.stem().to_string();
        let mut n: u32 = 1;
        loop {
            let candidate = hint.with_stem(&format!("{stem} {n}"))?;
            if !self.exists(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    fn kind_of(&self, id: AssetId) -> Option<AssetKind> {
        self.data(id).map(AssetData::kind)
    }

    /// Every reference slot of the asset, empty ones included.
    fn enumerate_reference_fields(&self, id: AssetId) -> StoreResult<Vec<ReferenceField>> {
        self.data(id)
            .map(AssetData::reference_fields)
            .ok_or(StoreError::UnknownId(id))
    }

    fn set_reference_field(
        &mut self,
        id: AssetId,
        field: &FieldPath,
        target: Option<AssetId>,
    ) -> StoreResult<()> {
        let mut data = self.data(id).cloned().ok_or(StoreError::UnknownId(id))?;
        data.set_reference(field, target)?;
        self.replace(id, data)
    }
}
