use graft_api_core::data::{AnimatorGraph, BlendTree, Motion, StateMachine};
use graft_api_core::AssetData;

use crate::context::RemapContext;
use crate::error::RemapError;
use crate::strategy::RemapStrategy;

/// Animator graphs and standalone blend-tree assets.
///
/// Layers' masks are remapped, then state machines and embedded blend trees
/// are walked with explicit work stacks, so arbitrarily deep nesting never
/// grows the call stack.
pub struct AnimatorGraphStrategy;

impl RemapStrategy for AnimatorGraphStrategy {
    fn name(&self) -> &'static str {
        "animator_graph"
    }

    fn remap(&self, data: &mut AssetData, ctx: &RemapContext<'_>) -> Result<bool, RemapError> {
        match data {
            AssetData::AnimatorGraph(graph) => Ok(remap_graph(graph, ctx)),
            AssetData::BlendTree(tree) => Ok(remap_tree(tree, ctx)),
            other => Err(RemapError::UnexpectedPayload {
                strategy: self.name(),
                found: other.variant_name(),
            }),
        }
    }
}

fn remap_graph(graph: &mut AnimatorGraph, ctx: &RemapContext<'_>) -> bool {
    let mut changed = false;
    let mut machines: Vec<&mut StateMachine> = Vec::with_capacity(graph.layers.len());
    for layer in &mut graph.layers {
        changed |= ctx.remap_slot(&mut layer.mask);
        machines.push(&mut layer.state_machine);
    }

    let mut motions: Vec<&mut Motion> = Vec::new();
    while let Some(machine) = machines.pop() {
        let StateMachine {
            states,
            sub_machines,
            ..
        } = machine;
        motions.extend(states.iter_mut().map(|s| &mut s.motion));
        machines.extend(sub_machines.iter_mut());
    }
    remap_motions(motions, ctx) || changed
}

fn remap_tree(tree: &mut BlendTree, ctx: &RemapContext<'_>) -> bool {
    let motions = tree.children.iter_mut().map(|c| &mut c.motion).collect();
    remap_motions(motions, ctx)
}

fn remap_motions(mut stack: Vec<&mut Motion>, ctx: &RemapContext<'_>) -> bool {
    let mut changed = false;
    while let Some(motion) = stack.pop() {
        match motion {
            Motion::Empty => {}
            Motion::Asset(id) => changed |= ctx.remap_id(id),
            Motion::Tree(tree) => stack.extend(tree.children.iter_mut().map(|c| &mut c.motion)),
        }
    }
    changed
}
