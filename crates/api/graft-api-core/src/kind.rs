//! Asset kinds, store-level type tags and the fixed classification table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of clonable assets. Computed once per node during
/// collection and used as the dispatch key for remap strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    AnimatorGraph,
    OverrideTable,
    AnimationClip,
    BlendTree,
    Mask,
    Menu,
    ExpressionParameterSet,
    Material,
    Mesh,
    Texture,
    Audio,
    GenericDataObject,
    Unsupported,
}

impl AssetKind {
    pub const ALL: [AssetKind; 13] = [
        AssetKind::AnimatorGraph,
        AssetKind::OverrideTable,
        AssetKind::AnimationClip,
        AssetKind::BlendTree,
        AssetKind::Mask,
        AssetKind::Menu,
        AssetKind::ExpressionParameterSet,
        AssetKind::Material,
        AssetKind::Mesh,
        AssetKind::Texture,
        AssetKind::Audio,
        AssetKind::GenericDataObject,
        AssetKind::Unsupported,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssetKind::AnimatorGraph => "AnimatorGraph",
            AssetKind::OverrideTable => "OverrideTable",
            AssetKind::AnimationClip => "AnimationClip",
            AssetKind::BlendTree => "BlendTree",
            AssetKind::Mask => "Mask",
            AssetKind::Menu => "Menu",
            AssetKind::ExpressionParameterSet => "ExpressionParameterSet",
            AssetKind::Material => "Material",
            AssetKind::Mesh => "Mesh",
            AssetKind::Texture => "Texture",
            AssetKind::Audio => "Audio",
            AssetKind::GenericDataObject => "GenericDataObject",
            AssetKind::Unsupported => "Unsupported",
        }
    }

    /// Parent in the capability hierarchy. Every supported kind is a
    /// specialization of `GenericDataObject`.
    pub fn parent(self) -> Option<AssetKind> {
        match self {
            AssetKind::GenericDataObject | AssetKind::Unsupported => None,
            _ => Some(AssetKind::GenericDataObject),
        }
    }

    /// `self` followed by its ancestors, most specific first.
    pub fn lineage(self) -> impl Iterator<Item = AssetKind> {
        std::iter::successors(Some(self), |k| k.parent())
    }

    pub fn is_supported(self) -> bool {
        self != AssetKind::Unsupported
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store-level type of an asset payload. Finer than [`AssetKind`]: it also
/// names the non-data types that are referenced but never duplicated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetType {
    AnimatorController,
    AnimatorOverrideController,
    AnimationClip,
    BlendTree,
    AvatarMask,
    ExpressionsMenu,
    ExpressionParameters,
    Material,
    Mesh,
    Texture,
    AudioClip,
    ScriptableObject,
    Shader,
    Script,
    Prefab,
    Opaque,
}

impl AssetType {
    /// Shader programs and executable scripts: referenced, never duplicated.
    pub fn is_code(self) -> bool {
        matches!(self, AssetType::Shader | AssetType::Script)
    }
}

/// Fixed type-to-kind table. Looked up in order; the first match wins.
const CLASSIFICATION: &[(AssetType, AssetKind)] = &[
    (AssetType::AnimatorController, AssetKind::AnimatorGraph),
    (AssetType::AnimatorOverrideController, AssetKind::OverrideTable),
    (AssetType::AnimationClip, AssetKind::AnimationClip),
    (AssetType::BlendTree, AssetKind::BlendTree),
    (AssetType::AvatarMask, AssetKind::Mask),
    (AssetType::ExpressionsMenu, AssetKind::Menu),
    (AssetType::ExpressionParameters, AssetKind::ExpressionParameterSet),
    (AssetType::Material, AssetKind::Material),
    (AssetType::Mesh, AssetKind::Mesh),
    (AssetType::Texture, AssetKind::Texture),
    (AssetType::AudioClip, AssetKind::Audio),
    (AssetType::ScriptableObject, AssetKind::GenericDataObject),
];

/// Classify a store type. Anything outside the table (code, prefabs, opaque
/// payloads) is `Unsupported`.
pub fn classify(ty: AssetType) -> AssetKind {
    CLASSIFICATION
        .iter()
        .find(|(t, _)| *t == ty)
        .map(|(_, k)| *k)
        .unwrap_or(AssetKind::Unsupported)
}

/// Destination sub-folder taxonomy used when laying out clones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DestinationFolder {
    Materials,
    AnimatorGraphs,
    AnimationData,
    Menus,
    ParameterSets,
    Meshes,
    Audio,
    Textures,
    GenericData,
    Fallback,
}

impl DestinationFolder {
    pub fn for_kind(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Material => DestinationFolder::Materials,
            AssetKind::AnimatorGraph
            | AssetKind::OverrideTable
            | AssetKind::BlendTree
            | AssetKind::Mask => DestinationFolder::AnimatorGraphs,
            AssetKind::AnimationClip => DestinationFolder::AnimationData,
            AssetKind::Menu => DestinationFolder::Menus,
            AssetKind::ExpressionParameterSet => DestinationFolder::ParameterSets,
            AssetKind::Mesh => DestinationFolder::Meshes,
            AssetKind::Audio => DestinationFolder::Audio,
            AssetKind::Texture => DestinationFolder::Textures,
            AssetKind::GenericDataObject => DestinationFolder::GenericData,
            AssetKind::Unsupported => DestinationFolder::Fallback,
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            DestinationFolder::Materials => "Material",
            DestinationFolder::AnimatorGraphs => "Animator",
            DestinationFolder::AnimationData => "Animation",
            DestinationFolder::Menus => "Expressions Menu",
            DestinationFolder::ParameterSets => "Expressions Parameters",
            DestinationFolder::Meshes => "Mesh",
            DestinationFolder::Audio => "Audio",
            DestinationFolder::Textures => "Textures",
            DestinationFolder::GenericData => "ScriptableObjects",
            DestinationFolder::Fallback => "Assets",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_ends_at_generic() {
        let chain: Vec<_> = AssetKind::Menu.lineage().collect();
        assert_eq!(chain, vec![AssetKind::Menu, AssetKind::GenericDataObject]);
        let chain: Vec<_> = AssetKind::Unsupported.lineage().collect();
        assert_eq!(chain, vec![AssetKind::Unsupported]);
    }

    #[test]
    fn code_and_prefabs_are_unsupported() {
        assert_eq!(classify(AssetType::Shader), AssetKind::Unsupported);
        assert_eq!(classify(AssetType::Prefab), AssetKind::Unsupported);
        assert_eq!(classify(AssetType::Opaque), AssetKind::Unsupported);
        assert_eq!(
            classify(AssetType::ExpressionParameters),
            AssetKind::ExpressionParameterSet
        );
    }

    #[test]
    fn animator_family_shares_a_folder() {
        for kind in [
            AssetKind::AnimatorGraph,
            AssetKind::OverrideTable,
            AssetKind::BlendTree,
            AssetKind::Mask,
        ] {
            assert_eq!(DestinationFolder::for_kind(kind).dir_name(), "Animator");
        }
        assert_eq!(
            DestinationFolder::for_kind(AssetKind::AnimationClip).dir_name(),
            "Animation"
        );
    }
}
