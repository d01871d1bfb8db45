use serde::{Deserialize, Serialize};

use crate::fields::{FieldPath, References, Visit};
use crate::ids::AssetId;
use crate::kind::AssetKind;

/// Shader-parameterized surface description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub shader: Option<AssetId>,
    #[serde(default)]
    pub properties: Vec<MaterialProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub name: String,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PropertyValue {
    Float(f32),
    Int(i32),
    Vector([f32; 4]),
    Color([f32; 4]),
    Texture(Option<AssetId>),
}

impl Material {
    /// Texture bound to `name`, if the property exists, is texture-typed and is set.
    pub fn texture(&self, name: &str) -> Option<AssetId> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Texture(tex) if p.name == name => *tex,
            _ => None,
        })
    }

    /// Bind `texture` to the texture property `name`, adding the property if the
    /// material has not stored it yet. Returns false when `name` holds a
    /// non-texture value.
    pub fn set_texture(&mut self, name: &str, texture: Option<AssetId>) -> bool {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(MaterialProperty {
                value: PropertyValue::Texture(slot),
                ..
            }) => {
                *slot = texture;
                true
            }
            Some(_) => false,
            None => {
                self.properties.push(MaterialProperty {
                    name: name.to_string(),
                    value: PropertyValue::Texture(texture),
                });
                true
            }
        }
    }
}

impl References for Material {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        visit(&at.field("shader"), &mut self.shader, None);
        for (i, prop) in self.properties.iter_mut().enumerate() {
            if let PropertyValue::Texture(slot) = &mut prop.value {
                visit(
                    &at.field("properties").index(i).field("value"),
                    slot,
                    Some(AssetKind::Texture),
                );
            }
        }
    }
}

/// Shader program declaration. Shaders are code: referenced, never duplicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ShaderProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderProperty {
    pub name: String,
    pub kind: ShaderPropertyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderPropertyKind {
    Float,
    Range,
    Int,
    Vector,
    Color,
    Texture,
}

impl Shader {
    pub fn texture_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.kind == ShaderPropertyKind::Texture)
            .map(|p| p.name.as_str())
    }
}
