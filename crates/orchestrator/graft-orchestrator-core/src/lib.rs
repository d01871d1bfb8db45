//! graft-orchestrator
//!
//! Clones a root asset's dependency closure into a destination namespace and
//! rewires every reference (inside the clones and on the root) to the clones.
//!
//! The store is borrowed exclusively for one operation; the registry is read
//! only. Per-asset problems never abort an operation, they are recorded in
//! [`CloneStats`] and surface as [`CloneStatus::PartialSuccess`].

pub mod cloner;
pub mod collector;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod root_graph;
pub mod stats;

use serde::Serialize;

use graft_api_core::{AssetId, AssetPath, AssetStore};
use graft_remap_core::{CloneMapping, RemapRegistry};

pub use crate::cloner::{AssetCloner, ExclusionSet};
pub use crate::collector::{Collected, DependencyCollector};
pub use crate::config::{CloneConfig, DestinationPolicy};
pub use crate::error::OrchestratorError;
pub use crate::stats::{CloneStats, CloneStatus, Failure, FailureReason, Stage};

/// Parameters of one clone operation.
#[derive(Debug, Clone)]
pub struct CloneRequest {
    pub root: AssetPath,
    /// Folder that receives the kind subfolders (`Animator/`, `Material/`, ...).
    pub destination: AssetPath,
    pub exclusions: ExclusionSet,
    /// Also collect dependencies outside the owned prefix.
    pub include_external: bool,
    /// Duplicate the root into `destination` and rewire the copy instead of
    /// the original.
    pub copy_root: bool,
}

impl CloneRequest {
    pub fn new(root: AssetPath, destination: AssetPath) -> Self {
        Self {
            root,
            destination,
            exclusions: ExclusionSet::new(),
            include_external: false,
            copy_root: false,
        }
    }

    pub fn exclude(mut self, paths: impl IntoIterator<Item = AssetPath>) -> Self {
        for path in paths {
            self.exclusions.insert(path);
        }
        self
    }

    pub fn include_external(mut self, include: bool) -> Self {
        self.include_external = include;
        self
    }

    pub fn copy_root(mut self, copy: bool) -> Self {
        self.copy_root = copy;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CloneOutcome {
    pub mapping: CloneMapping,
    /// The rewired root: the original, or its copy when `copy_root` was set.
    pub root: AssetId,
    pub stats: CloneStats,
    pub status: CloneStatus,
}

#[derive(Debug)]
pub struct Orchestrator {
    config: CloneConfig,
    registry: RemapRegistry,
}

impl Orchestrator {
    /// Orchestrator with the built-in strategy registrations.
    pub fn new(config: CloneConfig) -> Self {
        Self {
            config,
            registry: RemapRegistry::with_builtin(),
        }
    }

    /// Replace the strategy registry.
    pub fn with_registry(mut self, registry: RemapRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &CloneConfig {
        &self.config
    }

    pub fn registry(&self) -> &RemapRegistry {
        &self.registry
    }

    /// Dependencies `clone` would consider for `root`, without mutating
    /// anything.
    pub fn collect(
        &self,
        store: &dyn AssetStore,
        root: &AssetPath,
        include_external: bool,
    ) -> Result<Collected, OrchestratorError> {
        let collector = DependencyCollector::new(self.config.owned_prefix()?);
        Ok(collector.collect(store, root, include_external))
    }

    pub fn clone(
        &self,
        store: &mut dyn AssetStore,
        request: &CloneRequest,
    ) -> Result<CloneOutcome, OrchestratorError> {
        crate::pipeline::run_clone(self, store, request)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(CloneConfig::default())
    }
}
