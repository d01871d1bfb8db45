use serde::{Deserialize, Serialize};

use graft_api_core::{AssetId, AssetKind, AssetStore};

use crate::mapping::CloneMapping;

/// How an empty parameter-set slot in a menu is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSetFill {
    /// Fill only when the operation cloned exactly one parameter set.
    #[default]
    UniqueOnly,
    /// Fill with the first parameter-set clone in mapping order.
    FirstCloned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapOptions {
    #[serde(default)]
    pub parameter_set_fill: ParameterSetFill,
}

/// Read-only view handed to strategies.
pub struct RemapContext<'a> {
    store: &'a dyn AssetStore,
    mapping: &'a CloneMapping,
    options: RemapOptions,
}

impl<'a> RemapContext<'a> {
    pub fn new(store: &'a dyn AssetStore, mapping: &'a CloneMapping, options: RemapOptions) -> Self {
        Self {
            store,
            mapping,
            options,
        }
    }

    pub fn store(&self) -> &'a dyn AssetStore {
        self.store
    }

    pub fn mapping(&self) -> &'a CloneMapping {
        self.mapping
    }

    pub fn options(&self) -> RemapOptions {
        self.options
    }

    /// Clone of `target`, when `target`'s path is a mapping key.
    pub fn resolve(&self, target: AssetId) -> Option<AssetId> {
        let path = self.store.path_of(target)?;
        self.mapping.get(path).map(|clone| clone.id)
    }

    /// Point `slot` at the clone of its current target. Returns whether the
    /// slot changed.
    pub fn remap_slot(&self, slot: &mut Option<AssetId>) -> bool {
        match slot {
            Some(id) => self.remap_id(id),
            None => false,
        }
    }

    pub fn remap_id(&self, id: &mut AssetId) -> bool {
        match self.resolve(*id) {
            Some(clone) if clone != *id => {
                *id = clone;
                true
            }
            _ => false,
        }
    }

    /// Parameter-set clone used to fill empty parameter-set slots, per the
    /// configured [`ParameterSetFill`].
    pub fn parameter_set_fill(&self) -> Option<AssetId> {
        let mut sets = self.mapping.clones_of_kind(AssetKind::ExpressionParameterSet);
        let first = sets.next()?;
        match self.options.parameter_set_fill {
            ParameterSetFill::FirstCloned => Some(first.id),
            ParameterSetFill::UniqueOnly if sets.next().is_none() => Some(first.id),
            ParameterSetFill::UniqueOnly => None,
        }
    }
}
