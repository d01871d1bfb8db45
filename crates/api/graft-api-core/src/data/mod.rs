//! Typed asset payloads held by a store.

pub mod animator;
pub mod material;
pub mod menu;
pub mod object;
pub mod override_table;
pub mod prefab;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{self, FieldError, FieldPath, References, ReferenceField, Visit};
use crate::ids::AssetId;
use crate::kind::{classify, AssetKind, AssetType};

pub use animator::{
    AnimationClip, AnimatorGraph, AnimatorLayer, AnimatorState, BlendTree, ChildMotion, Mask,
    Motion, ObjectCurve, StateMachine,
};
pub use material::{Material, MaterialProperty, PropertyValue, Shader, ShaderProperty, ShaderPropertyKind};
pub use menu::{ControlKind, ControlLabel, ExpressionParameter, Menu, MenuControl, ParameterSet, ParameterType};
pub use object::{Field, FieldValue, GenericObject};
pub use override_table::{ClipOverride, OverrideTable};
pub use prefab::{AvatarDescriptor, Component, ComponentKind, GameObject, LayerSlot, Prefab, Renderer};

/// Invariant violations reported by payload mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("override set names original clip {0} more than once")]
    DuplicateOverride(AssetId),
    #[error("expected {expected} payload, found {found}")]
    WrongPayload {
        expected: &'static str,
        found: &'static str,
    },
}

/// Opaque binary payload (meshes, textures, audio).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Binary {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub payload: Vec<u8>,
}

/// Executable script source. Referenced, never duplicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub source: String,
}

/// Payload of a type the engine does not understand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Opaque {
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AssetData {
    AnimatorGraph(AnimatorGraph),
    OverrideTable(OverrideTable),
    AnimationClip(AnimationClip),
    BlendTree(BlendTree),
    Mask(Mask),
    Menu(Menu),
    ParameterSet(ParameterSet),
    Material(Material),
    Mesh(Binary),
    Texture(Binary),
    Audio(Binary),
    Data(GenericObject),
    Shader(Shader),
    Script(Script),
    Prefab(Prefab),
    Opaque(Opaque),
}

impl AssetData {
    pub fn asset_type(&self) -> AssetType {
        match self {
            AssetData::AnimatorGraph(_) => AssetType::AnimatorController,
            AssetData::OverrideTable(_) => AssetType::AnimatorOverrideController,
            AssetData::AnimationClip(_) => AssetType::AnimationClip,
            AssetData::BlendTree(_) => AssetType::BlendTree,
            AssetData::Mask(_) => AssetType::AvatarMask,
            AssetData::Menu(_) => AssetType::ExpressionsMenu,
            AssetData::ParameterSet(_) => AssetType::ExpressionParameters,
            AssetData::Material(_) => AssetType::Material,
            AssetData::Mesh(_) => AssetType::Mesh,
            AssetData::Texture(_) => AssetType::Texture,
            AssetData::Audio(_) => AssetType::AudioClip,
            AssetData::Data(_) => AssetType::ScriptableObject,
            AssetData::Shader(_) => AssetType::Shader,
            AssetData::Script(_) => AssetType::Script,
            AssetData::Prefab(_) => AssetType::Prefab,
            AssetData::Opaque(_) => AssetType::Opaque,
        }
    }

    pub fn kind(&self) -> AssetKind {
        classify(self.asset_type())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            AssetData::AnimatorGraph(_) => "animator_graph",
            AssetData::OverrideTable(_) => "override_table",
            AssetData::AnimationClip(_) => "animation_clip",
            AssetData::BlendTree(_) => "blend_tree",
            AssetData::Mask(_) => "mask",
            AssetData::Menu(_) => "menu",
            AssetData::ParameterSet(_) => "parameter_set",
            AssetData::Material(_) => "material",
            AssetData::Mesh(_) => "mesh",
            AssetData::Texture(_) => "texture",
            AssetData::Audio(_) => "audio",
            AssetData::Data(_) => "data",
            AssetData::Shader(_) => "shader",
            AssetData::Script(_) => "script",
            AssetData::Prefab(_) => "prefab",
            AssetData::Opaque(_) => "opaque",
        }
    }

    pub fn reference_fields(&self) -> Vec<ReferenceField> {
        fields::reference_fields(self)
    }

    pub fn set_reference(
        &mut self,
        field: &FieldPath,
        target: Option<AssetId>,
    ) -> Result<(), FieldError> {
        fields::set_reference(self, field, target)
    }

    /// Distinct assets this payload currently references, in field order.
    pub fn referenced_ids(&self) -> Vec<AssetId> {
        let mut out: Vec<AssetId> = Vec::new();
        for field in self.reference_fields() {
            if let Some(id) = field.target {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        }
        out
    }
}

impl References for AssetData {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        match self {
            AssetData::AnimatorGraph(g) => g.visit_references(at, visit),
            AssetData::OverrideTable(t) => t.visit_references(at, visit),
            AssetData::AnimationClip(c) => c.visit_references(at, visit),
            AssetData::BlendTree(t) => t.visit_references(at, visit),
            AssetData::Menu(m) => m.visit_references(at, visit),
            AssetData::Material(m) => m.visit_references(at, visit),
            AssetData::Data(o) => o.visit_references(at, visit),
            AssetData::Prefab(p) => p.visit_references(at, visit),
            AssetData::Mask(_)
            | AssetData::ParameterSet(_)
            | AssetData::Mesh(_)
            | AssetData::Texture(_)
            | AssetData::Audio(_)
            | AssetData::Shader(_)
            | AssetData::Script(_)
            | AssetData::Opaque(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_type_and_data_tags() {
        let json = r#"{"type":"material","data":{"shader":4,"properties":[
            {"name":"_MainTex","value":{"type":"texture","data":7}},
            {"name":"_Cutoff","value":{"type":"float","data":0.5}}]}}"#;
        let data: AssetData = serde_json::from_str(json).unwrap();
        assert_eq!(data.kind(), AssetKind::Material);
        assert_eq!(data.referenced_ids(), vec![AssetId(4), AssetId(7)]);
        assert_eq!(data.variant_name(), "material");
    }

    #[test]
    fn code_payloads_are_tagged_as_code() {
        let shader = AssetData::Shader(Shader::default());
        assert!(shader.asset_type().is_code());
        assert_eq!(shader.kind(), AssetKind::Unsupported);
        let script = AssetData::Script(Script::default());
        assert!(script.asset_type().is_code());
    }
}
