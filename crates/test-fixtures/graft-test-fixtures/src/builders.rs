//! Small constructors for hand-built test graphs.

use graft_api_core::data::{
    AnimatorGraph, AnimatorLayer, AnimatorState, AvatarDescriptor, Binary, BlendTree, ChildMotion,
    Component, ControlKind, GameObject, LayerSlot, Material, MaterialProperty, Menu, MenuControl,
    Motion, ParameterSet, Prefab, PropertyValue, Renderer, Shader, ShaderProperty,
    ShaderPropertyKind, StateMachine,
};
use graft_api_core::data::{ExpressionParameter, ParameterType};
use graft_api_core::{AssetData, AssetId, AssetPath};

/// Parse a path literal.
pub fn p(path: &str) -> AssetPath {
    AssetPath::parse(path).unwrap_or_else(|e| panic!("bad test path '{path}': {e}"))
}

pub fn clip() -> AssetData {
    AssetData::AnimationClip(Default::default())
}

pub fn texture() -> AssetData {
    AssetData::Texture(Binary {
        format: "png".into(),
        payload: vec![],
    })
}

pub fn parameter_set(names: &[&str]) -> AssetData {
    AssetData::ParameterSet(ParameterSet {
        parameters: names
            .iter()
            .map(|n| ExpressionParameter {
                name: n.to_string(),
                value_type: ParameterType::Bool,
                default_value: 0.0,
                saved: true,
            })
            .collect(),
    })
}

/// Shader declaring `_MainTex` (texture), `_Color` (color) and `_Glossiness` (float).
pub fn toon_shader() -> AssetData {
    let prop = |name: &str, kind| ShaderProperty {
        name: name.into(),
        kind,
    };
    AssetData::Shader(Shader {
        name: "Test/Toon".into(),
        properties: vec![
            prop("_MainTex", ShaderPropertyKind::Texture),
            prop("_Color", ShaderPropertyKind::Color),
            prop("_Glossiness", ShaderPropertyKind::Float),
        ],
    })
}

pub fn material(shader: Option<AssetId>, main_tex: Option<AssetId>) -> AssetData {
    AssetData::Material(Material {
        shader,
        properties: vec![
            MaterialProperty {
                name: "_MainTex".into(),
                value: PropertyValue::Texture(main_tex),
            },
            MaterialProperty {
                name: "_Color".into(),
                value: PropertyValue::Color([1.0, 0.8, 0.6, 1.0]),
            },
            MaterialProperty {
                name: "_Glossiness".into(),
                value: PropertyValue::Float(0.25),
            },
        ],
    })
}

pub fn state(name: &str, motion: Motion) -> AnimatorState {
    AnimatorState {
        name: name.into(),
        speed: 1.0,
        motion,
    }
}

pub fn layer(name: &str, state_machine: StateMachine) -> AnimatorLayer {
    AnimatorLayer {
        name: name.into(),
        weight: 1.0,
        mask: None,
        state_machine,
    }
}

/// Graph with a single layer whose root machine holds `states`.
pub fn graph(states: Vec<AnimatorState>) -> AssetData {
    AssetData::AnimatorGraph(AnimatorGraph {
        parameters: vec![],
        layers: vec![layer(
            "Base",
            StateMachine {
                name: "root".into(),
                states,
                sub_machines: vec![],
            },
        )],
    })
}

/// Blend tree nested `leaves.len()` levels deep. Level `i` blends
/// `leaves[i]` with the next level.
pub fn blend_tree_chain(leaves: &[AssetId]) -> BlendTree {
    let mut tree: Option<BlendTree> = None;
    for (level, leaf) in leaves.iter().enumerate().rev() {
        let mut children = vec![ChildMotion {
            motion: Motion::Asset(*leaf),
            threshold: 0.0,
            time_scale: 1.0,
        }];
        if let Some(inner) = tree.take() {
            children.push(ChildMotion {
                motion: Motion::Tree(inner),
                threshold: 1.0,
                time_scale: 1.0,
            });
        }
        tree = Some(BlendTree {
            name: format!("level{level}"),
            blend_parameter: "Blend".into(),
            children,
        });
    }
    tree.unwrap_or_default()
}

/// State machine nested `leaves.len()` levels deep. Level `i` has one state
/// playing `leaves[i]` and the next level as its only sub-machine.
pub fn machine_chain(leaves: &[AssetId]) -> StateMachine {
    let mut machine: Option<StateMachine> = None;
    for (level, leaf) in leaves.iter().enumerate().rev() {
        machine = Some(StateMachine {
            name: format!("machine{level}"),
            states: vec![state(&format!("state{level}"), Motion::Asset(*leaf))],
            sub_machines: machine.take().into_iter().collect(),
        });
    }
    machine.unwrap_or_default()
}

pub fn control(name: &str, sub_menu: Option<AssetId>, icon: Option<AssetId>) -> MenuControl {
    MenuControl {
        name: name.into(),
        kind: if sub_menu.is_some() {
            ControlKind::SubMenu
        } else {
            ControlKind::Button
        },
        icon,
        parameter: String::new(),
        sub_menu,
        labels: vec![],
    }
}

pub fn menu(parameters: Option<AssetId>, controls: Vec<MenuControl>) -> AssetData {
    AssetData::Menu(Menu {
        parameters,
        controls,
    })
}

pub fn descriptor(
    parameters: Option<AssetId>,
    menu: Option<AssetId>,
    fx: Option<AssetId>,
) -> AvatarDescriptor {
    AvatarDescriptor {
        expression_parameters: parameters,
        expressions_menu: menu,
        base_layers: vec![LayerSlot {
            layer: "FX".into(),
            controller: fx,
        }],
        special_layers: vec![],
    }
}

pub fn renderer(mesh: Option<AssetId>, materials: Vec<Option<AssetId>>) -> Renderer {
    Renderer {
        skinned: true,
        mesh,
        materials,
    }
}

/// Avatar root: one object carrying the descriptor, one child per renderer.
pub fn avatar(descriptor: AvatarDescriptor, renderers: Vec<Renderer>) -> AssetData {
    let mut objects = vec![GameObject {
        name: "Avatar".into(),
        parent: None,
        components: vec![Component::AvatarDescriptor(descriptor)],
    }];
    for (i, r) in renderers.into_iter().enumerate() {
        objects.push(GameObject {
            name: format!("Mesh{i}"),
            parent: Some(0),
            components: vec![Component::Renderer(r)],
        });
    }
    AssetData::Prefab(Prefab { objects })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_have_requested_depth() {
        let leaves: Vec<AssetId> = (0..10).map(AssetId).collect();
        assert_eq!(blend_tree_chain(&leaves).depth(), 10);

        let machine = machine_chain(&leaves[..5]);
        let graph = AnimatorGraph {
            parameters: vec![],
            layers: vec![layer("Base", machine)],
        };
        assert_eq!(graph.machine_count(), 5);
    }
}
