use serde::{Deserialize, Serialize};

use super::object::GenericObject;
use crate::fields::{FieldPath, References, Visit};
use crate::ids::AssetId;
use crate::kind::AssetKind;

/// Root object graph: a flat list of game objects, each with components.
/// Hierarchy is expressed through `parent` indices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prefab {
    #[serde(default)]
    pub objects: Vec<GameObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Component {
    AvatarDescriptor(AvatarDescriptor),
    Renderer(Renderer),
    Custom(GenericObject),
}

/// Tag used to dispatch component rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    AvatarDescriptor,
    Renderer,
    Custom,
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::AvatarDescriptor(_) => ComponentKind::AvatarDescriptor,
            Component::Renderer(_) => ComponentKind::Renderer,
            Component::Custom(_) => ComponentKind::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvatarDescriptor {
    #[serde(default)]
    pub expression_parameters: Option<AssetId>,
    #[serde(default)]
    pub expressions_menu: Option<AssetId>,
    #[serde(default)]
    pub base_layers: Vec<LayerSlot>,
    #[serde(default)]
    pub special_layers: Vec<LayerSlot>,
}

/// One playable-layer slot (FX, Gesture, Action, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSlot {
    pub layer: String,
    #[serde(default)]
    pub controller: Option<AssetId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Renderer {
    #[serde(default)]
    pub skinned: bool,
    #[serde(default)]
    pub mesh: Option<AssetId>,
    /// Material slots, positionally matched to mesh submeshes.
    #[serde(default)]
    pub materials: Vec<Option<AssetId>>,
}

impl References for AvatarDescriptor {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        visit(
            &at.field("expression_parameters"),
            &mut self.expression_parameters,
            Some(AssetKind::ExpressionParameterSet),
        );
        visit(
            &at.field("expressions_menu"),
            &mut self.expressions_menu,
            Some(AssetKind::Menu),
        );
        for (name, slots) in [
            ("base_layers", &mut self.base_layers),
            ("special_layers", &mut self.special_layers),
        ] {
            for (i, slot) in slots.iter_mut().enumerate() {
                visit(&at.field(name).index(i).field("controller"), &mut slot.controller, None);
            }
        }
    }
}

impl References for Renderer {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        visit(&at.field("mesh"), &mut self.mesh, Some(AssetKind::Mesh));
        for (i, slot) in self.materials.iter_mut().enumerate() {
            visit(&at.field("materials").index(i), slot, Some(AssetKind::Material));
        }
    }
}

impl References for Component {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        match self {
            Component::AvatarDescriptor(d) => d.visit_references(at, visit),
            Component::Renderer(r) => r.visit_references(at, visit),
            Component::Custom(c) => c.visit_references(at, visit),
        }
    }
}

impl References for Prefab {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        for (o, object) in self.objects.iter_mut().enumerate() {
            let object_path = at.field("objects").index(o);
            for (c, component) in object.components.iter_mut().enumerate() {
                component.visit_references(&object_path.field("components").index(c), visit);
            }
        }
    }
}
