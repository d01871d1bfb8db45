//! Hierarchical motion selection: animator graphs, state machines, blend trees,
//! plus the leaf motion assets (clips) and masks they point at.
//!
//! Trees are owned and may nest arbitrarily deep. All traversals in this crate
//! use explicit work stacks so depth never turns into call-stack depth.

use serde::{Deserialize, Serialize};

use crate::fields::{visit_required, FieldPath, References, Visit};
use crate::ids::AssetId;
use crate::kind::AssetKind;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatorGraph {
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub layers: Vec<AnimatorLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorLayer {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub mask: Option<AssetId>,
    #[serde(default)]
    pub state_machine: StateMachine,
}

fn default_weight() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateMachine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub states: Vec<AnimatorState>,
    #[serde(default)]
    pub sub_machines: Vec<StateMachine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    pub name: String,
    #[serde(default = "default_weight")]
    pub speed: f32,
    #[serde(default)]
    pub motion: Motion,
}

/// What a state (or a blend-tree child) plays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Motion {
    #[default]
    Empty,
    /// A clip or a standalone blend-tree asset.
    Asset(AssetId),
    /// A blend tree embedded in the owning asset.
    Tree(BlendTree),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlendTree {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blend_parameter: String,
    #[serde(default)]
    pub children: Vec<ChildMotion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildMotion {
    pub motion: Motion,
    #[serde(default)]
    pub threshold: f32,
    #[serde(default = "default_weight")]
    pub time_scale: f32,
}

impl AnimatorGraph {
    /// Number of state machines in the graph, nested ones included.
    pub fn machine_count(&self) -> usize {
        let mut stack: Vec<&StateMachine> = self.layers.iter().map(|l| &l.state_machine).collect();
        let mut count = 0;
        while let Some(sm) = stack.pop() {
            count += 1;
            stack.extend(sm.sub_machines.iter());
        }
        count
    }
}

impl BlendTree {
    /// Depth of embedded tree nesting below (and including) this tree.
    pub fn depth(&self) -> usize {
        let mut stack: Vec<(&BlendTree, usize)> = vec![(self, 1)];
        let mut deepest = 0;
        while let Some((tree, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in &tree.children {
                if let Motion::Tree(inner) = &child.motion {
                    stack.push((inner, depth + 1));
                }
            }
        }
        deepest
    }
}

impl References for AnimatorGraph {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        let mut machines: Vec<(FieldPath, &mut StateMachine)> = Vec::new();
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let layer_path = at.field("layers").index(i);
            visit(&layer_path.field("mask"), &mut layer.mask, Some(AssetKind::Mask));
            machines.push((layer_path.field("state_machine"), &mut layer.state_machine));
        }
        machines.reverse();

        let mut motions: Vec<(FieldPath, &mut Motion)> = Vec::new();
        while let Some((path, machine)) = machines.pop() {
            let StateMachine {
                states,
                sub_machines,
                ..
            } = machine;
            for (i, state) in states.iter_mut().enumerate() {
                motions.push((path.field("states").index(i).field("motion"), &mut state.motion));
            }
            for (i, sub) in sub_machines.iter_mut().enumerate().rev() {
                machines.push((path.field("sub_machines").index(i), sub));
            }
        }
        motions.reverse();
        visit_motions(motions, visit);
    }
}

impl References for BlendTree {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        let mut motions: Vec<(FieldPath, &mut Motion)> = Vec::new();
        for (i, child) in self.children.iter_mut().enumerate().rev() {
            motions.push((at.field("children").index(i).field("motion"), &mut child.motion));
        }
        visit_motions(motions, visit);
    }
}

/// Drain a stack of motions, descending into embedded trees. Entries are
/// popped from the end.
fn visit_motions(mut stack: Vec<(FieldPath, &mut Motion)>, visit: &mut Visit<'_>) {
    while let Some((path, motion)) = stack.pop() {
        match motion {
            Motion::Empty => {}
            Motion::Asset(id) => visit_required(id, &path, None, visit),
            Motion::Tree(tree) => {
                for (i, child) in tree.children.iter_mut().enumerate().rev() {
                    stack.push((path.field("children").index(i).field("motion"), &mut child.motion));
                }
            }
        }
    }
}

/// Keyframed animation data. Object curves hold per-key asset references
/// (material swaps and the like).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    #[serde(default)]
    pub length: f32,
    #[serde(default)]
    pub object_curves: Vec<ObjectCurve>,
}

fn default_frame_rate() -> f32 {
    60.0
}

impl Default for AnimationClip {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            length: 0.0,
            object_curves: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCurve {
    /// Property binding, e.g. `Body/m_Materials.Array.data[0]`.
    pub binding: String,
    #[serde(default)]
    pub keys: Vec<Option<AssetId>>,
}

impl References for AnimationClip {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        for (i, curve) in self.object_curves.iter_mut().enumerate() {
            let curve_path = at.field("object_curves").index(i).field("keys");
            for (k, key) in curve.keys.iter_mut().enumerate() {
                visit(&curve_path.index(k), key, None);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mask {
    /// (transform path, enabled)
    #[serde(default)]
    pub transforms: Vec<(String, bool)>,
}
