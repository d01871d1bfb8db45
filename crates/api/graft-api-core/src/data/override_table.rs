use serde::{Deserialize, Serialize};

use super::DataError;
use crate::fields::{visit_required, FieldPath, References, Visit};
use crate::ids::AssetId;
use crate::kind::AssetKind;

/// A base animator graph plus clip substitutions.
///
/// The override set is only ever replaced whole: [`OverrideTable::apply_overrides`]
/// validates the complete list before committing any of it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverrideTable {
    #[serde(default)]
    pub base: Option<AssetId>,
    #[serde(default)]
    overrides: Vec<ClipOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipOverride {
    /// Clip of the base graph being replaced.
    pub original: AssetId,
    pub replacement: Option<AssetId>,
}

impl OverrideTable {
    pub fn new(base: Option<AssetId>) -> Self {
        Self {
            base,
            overrides: Vec::new(),
        }
    }

    pub fn overrides(&self) -> &[ClipOverride] {
        &self.overrides
    }

    /// Replace the whole override set. Rejects a set that names the same
    /// original clip twice; on rejection nothing changes.
    pub fn apply_overrides(&mut self, overrides: Vec<ClipOverride>) -> Result<(), DataError> {
        for (i, pair) in overrides.iter().enumerate() {
            if overrides[..i].iter().any(|p| p.original == pair.original) {
                return Err(DataError::DuplicateOverride(pair.original));
            }
        }
        self.overrides = overrides;
        Ok(())
    }
}

impl References for OverrideTable {
    fn visit_references(&mut self, at: &FieldPath, visit: &mut Visit<'_>) {
        visit(&at.field("base"), &mut self.base, Some(AssetKind::AnimatorGraph));
        for (i, pair) in self.overrides.iter_mut().enumerate() {
            let pair_path = at.field("overrides").index(i);
            visit_required(
                &mut pair.original,
                &pair_path.field("original"),
                Some(AssetKind::AnimationClip),
                visit,
            );
            visit(
                &pair_path.field("replacement"),
                &mut pair.replacement,
                Some(AssetKind::AnimationClip),
            );
        }
    }
}
