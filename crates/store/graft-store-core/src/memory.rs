use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use graft_api_core::{
    AssetData, AssetId, AssetPath, AssetStore, IdAllocator, StoreError, StoreResult,
};

#[derive(Debug, Clone)]
struct Entry {
    path: AssetPath,
    data: AssetData,
    dirty: bool,
}

/// In-process asset store.
///
/// Assets live in a flat id-keyed table with a path index. Folders are
/// tracked separately so hosts can see which destination folders a clone
/// created. Dependencies are derived from the reference slots of each
/// payload, so the graph is always consistent with the data.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    ids: IdAllocator,
    entries: HashMap<AssetId, Entry>,
    by_path: HashMap<AssetPath, AssetId>,
    folders: HashSet<AssetPath>,
    persisted: Vec<AssetId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset at `path`, creating its parent folders.
    pub fn insert(&mut self, path: AssetPath, data: AssetData) -> StoreResult<AssetId> {
        let id = self.ids.alloc();
        self.insert_with_id(id, path, data)?;
        Ok(id)
    }

    /// Add an asset under a caller-chosen id (snapshot restore).
    pub fn insert_with_id(
        &mut self,
        id: AssetId,
        path: AssetPath,
        data: AssetData,
    ) -> StoreResult<()> {
        if self.exists(&path) {
            return Err(StoreError::AlreadyExists(path));
        }
        if self.entries.contains_key(&id) {
            return Err(StoreError::Rejected(format!("asset id {id} is already in use")));
        }
        if let Some(parent) = path.parent() {
            self.ensure_folder(&parent)?;
        }
        self.ids.reserve(id);
        self.by_path.insert(path.clone(), id);
        self.entries.insert(
            id,
            Entry {
                path,
                data,
                dirty: false,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self, id: AssetId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.dirty)
    }

    pub fn is_folder(&self, path: &AssetPath) -> bool {
        self.folders.contains(path)
    }

    /// Ids flushed through [`AssetStore::persist`], in call order.
    pub fn persisted(&self) -> &[AssetId] {
        &self.persisted
    }

    /// All assets as `(id, path)`, sorted by id.
    pub fn assets(&self) -> Vec<(AssetId, &AssetPath)> {
        let mut out: Vec<_> = self.entries.iter().map(|(id, e)| (*id, &e.path)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Assets located under `folder` (at any depth), sorted by path.
    pub fn assets_under(&self, folder: &AssetPath) -> Vec<&AssetPath> {
        let mut out: Vec<_> = self
            .by_path
            .keys()
            .filter(|p| *p != folder && p.starts_with(folder))
            .collect();
        out.sort();
        out
    }

    pub fn folders(&self) -> Vec<&AssetPath> {
        let mut out: Vec<_> = self.folders.iter().collect();
        out.sort();
        out
    }

    fn direct_dependencies(&self, id: AssetId) -> Vec<AssetId> {
        self.entries
            .get(&id)
            .map(|e| e.data.referenced_ids())
            .unwrap_or_default()
    }
}

impl AssetStore for MemoryStore {
    fn dependencies(&self, path: &AssetPath, recursive: bool) -> Vec<AssetPath> {
        let Some(&root) = self.by_path.get(path) else {
            return Vec::new();
        };
        let mut seen: HashSet<AssetId> = HashSet::new();
        seen.insert(root);
        let mut out = Vec::new();
        let mut queue: VecDeque<AssetId> = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for dep in self.direct_dependencies(current) {
                // Dangling references have no path and are not dependencies.
                let Some(entry) = self.entries.get(&dep) else {
                    continue;
                };
                if !seen.insert(dep) {
                    continue;
                }
                out.push(entry.path.clone());
                if recursive {
                    queue.push_back(dep);
                }
            }
        }
        out
    }

    fn load(&self, path: &AssetPath) -> Option<AssetId> {
        self.by_path.get(path).copied()
    }

    fn path_of(&self, id: AssetId) -> Option<&AssetPath> {
        self.entries.get(&id).map(|e| &e.path)
    }

    fn data(&self, id: AssetId) -> Option<&AssetData> {
        self.entries.get(&id).map(|e| &e.data)
    }

    fn replace(&mut self, id: AssetId, data: AssetData) -> StoreResult<()> {
        let entry = self.entries.get_mut(&id).ok_or(StoreError::UnknownId(id))?;
        entry.data = data;
        Ok(())
    }

    fn exists(&self, path: &AssetPath) -> bool {
        self.by_path.contains_key(path) || self.folders.contains(path)
    }

    fn ensure_folder(&mut self, path: &AssetPath) -> StoreResult<()> {
        let mut missing = Vec::new();
        let mut cursor = Some(path.clone());
        while let Some(folder) = cursor {
            if self.by_path.contains_key(&folder) {
                return Err(StoreError::AlreadyExists(folder));
            }
            if self.folders.contains(&folder) {
                break;
            }
            cursor = folder.parent();
            missing.push(folder);
        }
        for folder in missing.into_iter().rev() {
            debug!(folder = %folder, "created folder");
            self.folders.insert(folder);
        }
        Ok(())
    }

    fn delete(&mut self, path: &AssetPath) -> StoreResult<()> {
        if let Some(id) = self.by_path.remove(path) {
            self.entries.remove(&id);
            return Ok(());
        }
        if !self.folders.remove(path) {
            return Err(StoreError::NotFound(path.clone()));
        }
        self.folders.retain(|f| !f.starts_with(path));
        let doomed: Vec<AssetPath> = self
            .by_path
            .keys()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect();
        for p in doomed {
            if let Some(id) = self.by_path.remove(&p) {
                self.entries.remove(&id);
            }
        }
        Ok(())
    }

    fn duplicate(&mut self, src: &AssetPath, dst_hint: &AssetPath) -> StoreResult<AssetId> {
        let src_id = self
            .load(src)
            .ok_or_else(|| StoreError::NotFound(src.clone()))?;
        if let Some(folder) = dst_hint.parent() {
            if !self.folders.contains(&folder) {
                return Err(StoreError::MissingFolder(folder));
            }
        }
        let target = self.unique_path(dst_hint)?;
        let data = self
            .data(src_id)
            .cloned()
            .ok_or(StoreError::UnknownId(src_id))?;
        let id = self.ids.alloc();
        debug!(src = %src, dst = %target, id = %id, "duplicated asset");
        self.by_path.insert(target.clone(), id);
        self.entries.insert(
            id,
            Entry {
                path: target,
                data,
                dirty: false,
            },
        );
        Ok(id)
    }

    fn mark_dirty(&mut self, id: AssetId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.dirty = true;
        }
    }

    fn persist(&mut self, id: AssetId) -> StoreResult<()> {
        let entry = self.entries.get_mut(&id).ok_or(StoreError::UnknownId(id))?;
        entry.dirty = false;
        self.persisted.push(id);
        Ok(())
    }
}
