//! Rewriting of the root asset's own references.

use tracing::debug;

use graft_api_core::data::{AvatarDescriptor, Component, Prefab, Renderer};
use graft_api_core::{AssetData, AssetNode, AssetStore, FieldPath, References};
use graft_remap_core::{CloneMapping, RemapContext, RemapError, RemapOptions, RemapRegistry};

/// Remap `root` against `mapping`. Prefabs are walked component by
/// component; any other root goes through the registry like a clone would.
pub fn remap_root(
    store: &mut dyn AssetStore,
    root: &AssetNode,
    mapping: &CloneMapping,
    registry: &RemapRegistry,
    options: RemapOptions,
) -> Result<bool, RemapError> {
    let mut prefab = match store.data(root.id) {
        Some(AssetData::Prefab(prefab)) => prefab.clone(),
        Some(_) => return registry.apply(store, root, mapping, options),
        None => return Err(RemapError::MissingData(root.id)),
    };
    let changed = {
        let ctx = RemapContext::new(&*store, mapping, options);
        remap_prefab(&mut prefab, &ctx)
    };
    if changed {
        store.replace(root.id, AssetData::Prefab(prefab))?;
        store.mark_dirty(root.id);
    }
    Ok(changed)
}

fn remap_prefab(prefab: &mut Prefab, ctx: &RemapContext<'_>) -> bool {
    let mut changed = false;
    for object in &mut prefab.objects {
        for component in &mut object.components {
            let touched = match component {
                Component::Renderer(renderer) => remap_renderer(renderer, ctx),
                Component::AvatarDescriptor(descriptor) => remap_descriptor(descriptor, ctx),
                Component::Custom(custom) => {
                    let mut touched = false;
                    custom.visit_references(&FieldPath::root(), &mut |_, slot, _| {
                        touched |= ctx.remap_slot(slot);
                    });
                    touched
                }
            };
            if touched {
                debug!("root: rewrote {:?} on '{}'", component.kind(), object.name);
            }
            changed |= touched;
        }
    }
    changed
}

fn remap_renderer(renderer: &mut Renderer, ctx: &RemapContext<'_>) -> bool {
    let mut changed = ctx.remap_slot(&mut renderer.mesh);
    for slot in &mut renderer.materials {
        changed |= ctx.remap_slot(slot);
    }
    changed
}

fn remap_descriptor(descriptor: &mut AvatarDescriptor, ctx: &RemapContext<'_>) -> bool {
    let mut changed = ctx.remap_slot(&mut descriptor.expression_parameters);
    changed |= ctx.remap_slot(&mut descriptor.expressions_menu);
    for layer in descriptor
        .base_layers
        .iter_mut()
        .chain(descriptor.special_layers.iter_mut())
    {
        changed |= ctx.remap_slot(&mut layer.controller);
    }
    changed
}
