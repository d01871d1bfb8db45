use graft_api_core::AssetData;

use crate::context::RemapContext;
use crate::error::RemapError;
use crate::strategy::RemapStrategy;

/// Override tables: the base graph and the replacement side of each pair.
///
/// The rewritten pair list is committed with one `apply_overrides` call; a
/// rejected list fails the node and leaves the table as it was.
pub struct OverrideTableStrategy;

impl RemapStrategy for OverrideTableStrategy {
    fn name(&self) -> &'static str {
        "override_table"
    }

    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError> {
        let table = match data {
            AssetData::OverrideTable(table) => table,
            other => {
                return Err(RemapError::UnexpectedPayload {
                    strategy: self.name(),
                    found: other.variant_name(),
                })
            }
        };

        let mut changed = ctx.remap_slot(&mut table.base);
        let mut pairs = table.overrides().to_vec();
        let mut pairs_changed = false;
        for pair in &mut pairs {
            pairs_changed |= ctx.remap_slot(&mut pair.replacement);
        }
        if pairs_changed {
            table.apply_overrides(pairs)?;
            changed = true;
        }
        Ok(changed)
    }
}
