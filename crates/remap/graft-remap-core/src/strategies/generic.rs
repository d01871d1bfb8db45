use graft_api_core::{AssetData, FieldPath, References};

use crate::context::RemapContext;
use crate::error::RemapError;
use crate::strategy::RemapStrategy;

/// Fallback for any data object: rewrite every reference field, nested ones
/// included, whose target is a mapping key. References are not followed.
pub struct GenericStrategy;

impl RemapStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError> {
        let mut changed = false;
        data.visit_references(&FieldPath::root(), &mut |_, slot, _| {
            changed |= ctx.remap_slot(slot);
        });
        Ok(changed)
    }
}
