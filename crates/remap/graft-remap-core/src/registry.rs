//! Kind-keyed strategy registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use graft_api_core::{AssetKind, AssetNode, AssetPath, AssetStore};

use crate::context::{RemapContext, RemapOptions};
use crate::error::RemapError;
use crate::mapping::CloneMapping;
use crate::strategies::{
    AnimatorGraphStrategy, GenericStrategy, MaterialStrategy, MenuStrategy, OverrideTableStrategy,
};
use crate::strategy::RemapStrategy;

/// Priority of the generic fallback strategy.
pub const FALLBACK_PRIORITY: i32 = 100;

struct Registration {
    priority: i32,
    seq: u64,
    strategy: Arc<dyn RemapStrategy>,
}

/// Active strategy of one kind, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub kind: AssetKind,
    pub strategy: &'static str,
    pub priority: i32,
}

/// Caller-owned table of remap strategies.
///
/// Several strategies may target one kind; the lowest priority number wins
/// and ties go to the earliest registration. Kinds without a strategy fall
/// back to their nearest ancestor that has one.
#[derive(Default)]
pub struct RemapRegistry {
    by_kind: BTreeMap<AssetKind, Vec<Registration>>,
    next_seq: u64,
}

impl RemapRegistry {
    /// An empty registry: nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in strategy list.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtin();
        registry
    }

    fn register_builtin(&mut self) {
        let animator: Arc<dyn RemapStrategy> = Arc::new(AnimatorGraphStrategy);
        self.register(AssetKind::AnimatorGraph, 0, animator.clone());
        self.register(AssetKind::BlendTree, 0, animator);
        self.register(AssetKind::OverrideTable, 0, Arc::new(OverrideTableStrategy));
        self.register(AssetKind::Material, 0, Arc::new(MaterialStrategy));
        self.register(AssetKind::Menu, 0, Arc::new(MenuStrategy));
        self.register(
            AssetKind::GenericDataObject,
            FALLBACK_PRIORITY,
            Arc::new(GenericStrategy),
        );
    }

    pub fn register(&mut self, kind: AssetKind, priority: i32, strategy: Arc<dyn RemapStrategy>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let entries = self.by_kind.entry(kind).or_default();
        match best(entries) {
            Some(current) if current.priority <= priority => {
                debug!(
                    kind = %kind,
                    kept = current.strategy.name(),
                    ignored = strategy.name(),
                    priority,
                    "strategy registered behind an existing one"
                );
            }
            Some(current) => {
                debug!(
                    kind = %kind,
                    replaced = current.strategy.name(),
                    by = strategy.name(),
                    priority,
                    "strategy replaced"
                );
            }
            None => debug!(kind = %kind, strategy = strategy.name(), priority, "strategy registered"),
        }
        entries.push(Registration {
            priority,
            seq,
            strategy,
        });
    }

    /// Strategy registered for `kind` or, failing that, its nearest ancestor.
    pub fn resolve(&self, kind: AssetKind) -> Option<&dyn RemapStrategy> {
        kind.lineage()
            .find_map(|k| self.by_kind.get(&k).and_then(|entries| best(entries)))
            .map(|r| r.strategy.as_ref())
    }

    /// Remap one stored asset. Returns `Ok(false)` when no strategy resolves
    /// or nothing changed. The stored data is only replaced (and marked dirty)
    /// when the strategy succeeds with a change.
    pub fn apply(
        &self,
        store: &mut dyn AssetStore,
        node: &AssetNode,
        mapping: &CloneMapping,
        options: RemapOptions,
    ) -> Result<bool, RemapError> {
        let Some(strategy) = self.resolve(node.kind) else {
            return Ok(false);
        };
        let mut data = store
            .data(node.id)
            .cloned()
            .ok_or(RemapError::MissingData(node.id))?;
        let changed = {
            let ctx = RemapContext::new(&*store, mapping, options);
            strategy.remap(&mut data, &ctx)?
        };
        if changed {
            store.replace(node.id, data)?;
            store.mark_dirty(node.id);
        }
        Ok(changed)
    }

    pub fn before_clone(&self, original: &AssetNode, target: &AssetPath) {
        if let Some(strategy) = self.resolve(original.kind) {
            strategy.before_clone(original, target);
        }
    }

    pub fn after_clone(&self, original: &AssetNode, clone: &AssetNode) {
        if let Some(strategy) = self.resolve(original.kind) {
            strategy.after_clone(original, clone);
        }
    }

    /// Winning strategy of every kind with at least one registration.
    pub fn registrations(&self) -> Vec<RegistrationInfo> {
        self.by_kind
            .iter()
            .filter_map(|(kind, entries)| {
                best(entries).map(|r| RegistrationInfo {
                    kind: *kind,
                    strategy: r.strategy.name(),
                    priority: r.priority,
                })
            })
            .collect()
    }
}

fn best(entries: &[Registration]) -> Option<&Registration> {
    entries.iter().min_by_key(|r| (r.priority, r.seq))
}

impl std::fmt::Debug for RemapRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.registrations()).finish()
    }
}
