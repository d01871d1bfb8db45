//! Dependency collection: the classified, filtered closure of a root asset.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use tracing::{debug, info};

use graft_api_core::{AssetKind, AssetNode, AssetPath, AssetStore};

/// Walks a root's transitive dependencies and keeps the clonable ones.
#[derive(Debug, Clone)]
pub struct DependencyCollector {
    owned_prefix: Option<AssetPath>,
}

impl DependencyCollector {
    /// `None` treats every path as owned.
    pub fn new(owned_prefix: Option<AssetPath>) -> Self {
        Self { owned_prefix }
    }

    fn is_owned(&self, path: &AssetPath) -> bool {
        self.owned_prefix
            .as_ref()
            .map_or(true, |prefix| path.starts_with(prefix))
    }

    /// Discovery-ordered set of clonable dependencies of `root`.
    ///
    /// Skipped: the root itself, repeated paths, paths outside the owned
    /// namespace (unless `include_external`), paths that do not load, code
    /// assets and unsupported kinds.
    pub fn collect(
        &self,
        store: &dyn AssetStore,
        root: &AssetPath,
        include_external: bool,
    ) -> Collected {
        let mut visited: HashSet<AssetPath> = HashSet::new();
        let mut nodes = Vec::new();
        for path in store.dependencies(root, true) {
            if &path == root || !visited.insert(path.clone()) {
                continue;
            }
            if !include_external && !self.is_owned(&path) {
                debug!("collect: '{}' is outside the owned namespace; skipped", path);
                continue;
            }
            let Some(id) = store.load(&path) else {
                debug!("collect: '{}' does not load; skipped", path);
                continue;
            };
            let Some(data) = store.data(id) else {
                continue;
            };
            if data.asset_type().is_code() {
                continue;
            }
            let kind = data.kind();
            if !kind.is_supported() {
                continue;
            }
            nodes.push(AssetNode { id, path, kind });
        }
        info!(root = %root, collected = nodes.len(), "dependencies collected");
        Collected { nodes }
    }
}

/// Ordered result of [`DependencyCollector::collect`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    nodes: Vec<AssetNode>,
}

impl Collected {
    pub fn nodes(&self) -> &[AssetNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetNode> {
        self.nodes.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &AssetPath> {
        self.nodes.iter().map(|n| &n.path)
    }

    pub fn contains(&self, path: &AssetPath) -> bool {
        self.nodes.iter().any(|n| &n.path == path)
    }

    /// Nodes grouped by kind, each group in discovery order.
    pub fn by_kind(&self) -> BTreeMap<AssetKind, Vec<&AssetNode>> {
        let mut groups: BTreeMap<AssetKind, Vec<&AssetNode>> = BTreeMap::new();
        for node in &self.nodes {
            groups.entry(node.kind).or_default().push(node);
        }
        groups
    }

    /// Case-insensitive substring match on asset paths. An empty query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&AssetNode> {
        let needle = query.trim().to_lowercase();
        self.nodes
            .iter()
            .filter(|n| needle.is_empty() || n.path.as_str().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn into_nodes(self) -> Vec<AssetNode> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a Collected {
    type Item = &'a AssetNode;
    type IntoIter = std::slice::Iter<'a, AssetNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
