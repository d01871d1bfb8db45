use graft_api_core::{AssetData, AssetKind, FieldPath, References};

use crate::context::RemapContext;
use crate::error::RemapError;
use crate::strategy::RemapStrategy;

/// Expression menus.
///
/// One pass over every reference field, empty ones included. Sub-menus and
/// icons are remapped. An empty parameter-set slot is filled with this
/// operation's parameter-set clone.
pub struct MenuStrategy;

impl RemapStrategy for MenuStrategy {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError> {
        let menu = match data {
            AssetData::Menu(menu) => menu,
            other => {
                return Err(RemapError::UnexpectedPayload {
                    strategy: self.name(),
                    found: other.variant_name(),
                })
            }
        };

        let mut changed = false;
        let fill = ctx.parameter_set_fill();
        menu.visit_references(&FieldPath::root(), &mut |_, slot, accepts| {
            if accepts != Some(AssetKind::ExpressionParameterSet) {
                changed |= ctx.remap_slot(slot);
                return;
            }
            match (slot.is_some(), fill) {
                (true, _) => changed |= ctx.remap_slot(slot),
                (false, Some(set)) => {
                    *slot = Some(set);
                    changed = true;
                }
                (false, None) => {}
            }
        });
        Ok(changed)
    }
}
