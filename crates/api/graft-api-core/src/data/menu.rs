use serde::{Deserialize, Serialize};

use crate::fields::{FieldPath, References, Visit};
use crate::ids::AssetId;
use crate::kind::AssetKind;

/// Hierarchical expression menu. `parameters` points at the parameter set the
/// controls drive; it is not part of the visible control list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub parameters: Option<AssetId>,
    #[serde(default)]
    pub controls: Vec<MenuControl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuControl {
    pub name: String,
    #[serde(default)]
    pub kind: ControlKind,
    #[serde(default)]
    pub icon: Option<AssetId>,
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub sub_menu: Option<AssetId>,
    #[serde(default)]
    pub labels: Vec<ControlLabel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    #[default]
    Button,
    Toggle,
    SubMenu,
    TwoAxisPuppet,
    FourAxisPuppet,
    RadialPuppet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlLabel {
    pub name: String,
    #[serde(default)]
    pub icon: Option<AssetId>,
}

impl References for Menu {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        visit(
            &at.field("parameters"),
            &mut self.parameters,
            Some(AssetKind::ExpressionParameterSet),
        );
        for (i, control) in self.controls.iter_mut().enumerate() {
            let control_path = at.field("controls").index(i);
            visit(&control_path.field("icon"), &mut control.icon, Some(AssetKind::Texture));
            visit(
                &control_path.field("sub_menu"),
                &mut control.sub_menu,
                Some(AssetKind::Menu),
            );
            for (l, label) in control.labels.iter_mut().enumerate() {
                visit(
                    &control_path.field("labels").index(l).field("icon"),
                    &mut label.icon,
                    Some(AssetKind::Texture),
                );
            }
        }
    }
}

/// Synced parameters driven by menu controls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default)]
    pub parameters: Vec<ExpressionParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionParameter {
    pub name: String,
    pub value_type: ParameterType,
    #[serde(default)]
    pub default_value: f32,
    #[serde(default = "default_saved")]
    pub saved: bool,
}

fn default_saved() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Int,
    Float,
    Bool,
}
