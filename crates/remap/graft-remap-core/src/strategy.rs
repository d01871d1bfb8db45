use graft_api_core::{AssetData, AssetNode, AssetPath};

use crate::context::RemapContext;
use crate::error::RemapError;

/// Rewrites the cross-references of one asset kind.
///
/// `remap` works on a private copy of the asset's data; the registry writes
/// the copy back only when the call returns `Ok(true)`.
pub trait RemapStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite every reference in `data` whose target is a mapping key.
    /// Returns whether anything changed.
    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError>;

    /// Called before `original` is duplicated towards `target`.
    fn before_clone(&self, _original: &AssetNode, _target: &AssetPath) {}

    /// Called after `original` was duplicated as `clone`.
    fn after_clone(&self, _original: &AssetNode, _clone: &AssetNode) {}
}
