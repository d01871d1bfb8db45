//! Duplication of collected assets into the destination namespace.

use hashbrown::HashSet;
use tracing::{debug, info, warn};

use graft_api_core::{AssetId, AssetNode, AssetPath, AssetStore, DestinationFolder, StoreError};
use graft_remap_core::{CloneMapping, RemapRegistry};

use crate::config::DestinationPolicy;
use crate::stats::{CloneStats, FailureReason, Stage};

/// Paths the caller opted out of cloning. References to them are left on
/// the originals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: HashSet<AssetPath>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: AssetPath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &AssetPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<AssetPath> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = AssetPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Copies nodes into `<destination>/<kind folder>/<file name>`.
pub struct AssetCloner<'a> {
    registry: &'a RemapRegistry,
    policy: DestinationPolicy,
    protected: HashSet<AssetPath>,
}

impl<'a> AssetCloner<'a> {
    pub fn new(registry: &'a RemapRegistry, policy: DestinationPolicy) -> Self {
        Self {
            registry,
            policy,
            protected: HashSet::new(),
        }
    }

    /// Paths `Overwrite` must never delete, on top of the collected
    /// originals and this run's own clones.
    pub fn protect(mut self, paths: impl IntoIterator<Item = AssetPath>) -> Self {
        self.protected.extend(paths);
        self
    }

    /// Clone every node not in `exclusions`. Failures are recorded in
    /// `stats` and never stop the remaining nodes.
    pub fn clone_nodes(
        &self,
        store: &mut dyn AssetStore,
        nodes: &[AssetNode],
        destination: &AssetPath,
        exclusions: &ExclusionSet,
        stats: &mut CloneStats,
    ) -> CloneMapping {
        let mut mapping = CloneMapping::new();
        let mut protected = self.protected.clone();
        protected.extend(nodes.iter().map(|n| n.path.clone()));
        for node in nodes {
            if exclusions.contains(&node.path) {
                debug!("clone: '{}' excluded", node.path);
                stats.excluded += 1;
                continue;
            }
            match self.clone_one(store, node, destination, &protected) {
                Ok(clone) => {
                    info!("cloned '{}' -> '{}'", node.path, clone.path);
                    self.registry.after_clone(node, &clone);
                    protected.insert(clone.path.clone());
                    let kind = node.kind;
                    if let Err(e) = mapping.insert(node.path.clone(), clone) {
                        warn!("clone: {}", e);
                        continue;
                    }
                    stats.count_clone(kind);
                }
                Err(e) => {
                    let reason = match e {
                        StoreError::NotFound(_) => FailureReason::MissingSource,
                        _ => FailureReason::DuplicationFailure,
                    };
                    warn!("failed to clone '{}': {}", node.path, e);
                    stats.fail(&node.path, Stage::Clone, reason, e.to_string());
                }
            }
        }
        mapping
    }

    fn clone_one(
        &self,
        store: &mut dyn AssetStore,
        node: &AssetNode,
        destination: &AssetPath,
        protected: &HashSet<AssetPath>,
    ) -> Result<AssetNode, StoreError> {
        if store.load(&node.path).is_none() {
            return Err(StoreError::NotFound(node.path.clone()));
        }
        let hint = destination
            .join(DestinationFolder::for_kind(node.kind).dir_name())?
            .join(node.path.file_name())?;
        let id = copy_asset(store, &node.path, &hint, self.policy, protected, |target| {
            self.registry.before_clone(node, target)
        })?;
        let path = store
            .path_of(id)
            .cloned()
            .ok_or(StoreError::UnknownId(id))?;
        Ok(AssetNode {
            id,
            path,
            kind: node.kind,
        })
    }
}

/// Duplicate `src` towards `hint` under `policy`, creating the hint's folder.
///
/// Nothing is mutated when the store refuses the copy. With `Overwrite`, an
/// asset already at `hint` is deleted first unless it is `src` or listed in
/// `protected`; a protected hint falls back to the store's disambiguated path.
pub(crate) fn copy_asset(
    store: &mut dyn AssetStore,
    src: &AssetPath,
    hint: &AssetPath,
    policy: DestinationPolicy,
    protected: &HashSet<AssetPath>,
    before: impl FnOnce(&AssetPath),
) -> Result<AssetId, StoreError> {
    store.check_duplicate(src, hint)?;
    if let Some(folder) = hint.parent() {
        store.ensure_folder(&folder)?;
    }
    if policy == DestinationPolicy::Overwrite
        && hint != src
        && !protected.contains(hint)
        && store.load(hint).is_some()
    {
        debug!("clone: overwriting '{}'", hint);
        store.delete(hint)?;
    }
    before(hint);
    store.duplicate(src, hint)
}
