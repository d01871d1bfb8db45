//! Store wrapper that injects failures by path.

use std::cell::Cell;

use hashbrown::HashSet;

use graft_api_core::{AssetData, AssetId, AssetPath, AssetStore, StoreError, StoreResult};

/// Delegates to `inner` except for the configured paths:
/// - `fail_duplicate_of`: duplicating that source is refused,
/// - `vanish_on_duplicate`: duplicating that source reports it missing,
/// - `fail_persist_of`: persisting the asset stored at that path fails.
#[derive(Debug, Clone)]
pub struct FaultyStore<S> {
    inner: S,
    refuse_duplicate: HashSet<AssetPath>,
    vanish: HashSet<AssetPath>,
    refuse_persist: HashSet<AssetPath>,
    mutations: usize,
    lookups: Cell<usize>,
}

impl<S: AssetStore> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            refuse_duplicate: HashSet::new(),
            vanish: HashSet::new(),
            refuse_persist: HashSet::new(),
            mutations: 0,
            lookups: Cell::new(0),
        }
    }

    pub fn fail_duplicate_of(mut self, src: AssetPath) -> Self {
        self.refuse_duplicate.insert(src);
        self
    }

    pub fn vanish_on_duplicate(mut self, src: AssetPath) -> Self {
        self.vanish.insert(src);
        self
    }

    pub fn fail_persist_of(mut self, path: AssetPath) -> Self {
        self.refuse_persist.insert(path);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of mutating calls that reached the inner store.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Number of id-to-path lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl<S: AssetStore> AssetStore for FaultyStore<S> {
    fn dependencies(&self, path: &AssetPath, recursive: bool) -> Vec<AssetPath> {
        self.inner.dependencies(path, recursive)
    }

    fn load(&self, path: &AssetPath) -> Option<AssetId> {
        self.inner.load(path)
    }

    fn path_of(&self, id: AssetId) -> Option<&AssetPath> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.path_of(id)
    }

    fn data(&self, id: AssetId) -> Option<&AssetData> {
        self.inner.data(id)
    }

    fn replace(&mut self, id: AssetId, data: AssetData) -> StoreResult<()> {
        self.mutations += 1;
        self.inner.replace(id, data)
    }

    fn exists(&self, path: &AssetPath) -> bool {
        self.inner.exists(path)
    }

    fn ensure_folder(&mut self, path: &AssetPath) -> StoreResult<()> {
        self.mutations += 1;
        self.inner.ensure_folder(path)
    }

    fn delete(&mut self, path: &AssetPath) -> StoreResult<()> {
        self.mutations += 1;
        self.inner.delete(path)
    }

    fn duplicate(&mut self, src: &AssetPath, dst_hint: &AssetPath) -> StoreResult<AssetId> {
        self.check_duplicate(src, dst_hint)?;
        self.mutations += 1;
        self.inner.duplicate(src, dst_hint)
    }

    fn check_duplicate(&self, src: &AssetPath, dst_hint: &AssetPath) -> StoreResult<()> {
        if self.vanish.contains(src) {
            return Err(StoreError::NotFound(src.clone()));
        }
        if self.refuse_duplicate.contains(src) {
            return Err(StoreError::Rejected(format!("copy of '{src}' refused")));
        }
        self.inner.check_duplicate(src, dst_hint)
    }

    fn mark_dirty(&mut self, id: AssetId) {
        self.inner.mark_dirty(id)
    }

    fn persist(&mut self, id: AssetId) -> StoreResult<()> {
        if let Some(path) = self.inner.path_of(id) {
            if self.refuse_persist.contains(path) {
                return Err(StoreError::Persist(format!("disk full while writing '{path}'")));
            }
        }
        self.mutations += 1;
        self.inner.persist(id)
    }
}
