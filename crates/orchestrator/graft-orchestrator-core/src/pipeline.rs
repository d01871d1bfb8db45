use hashbrown::HashSet;
use indexmap::IndexSet;
use tracing::{info, warn};

use graft_api_core::{AssetId, AssetNode, AssetPath, AssetStore, StoreError};

use crate::cloner::{copy_asset, AssetCloner};
use crate::collector::DependencyCollector;
use crate::diagnostics;
use crate::error::OrchestratorError;
use crate::root_graph::remap_root;
use crate::stats::{CloneStats, CloneStatus, FailureReason, Stage};
use crate::{CloneOutcome, CloneRequest, Orchestrator};

/// Run one clone operation:
///   Collect -> Clone -> RemapClonedNodes -> RemapRootGraph -> Commit
pub fn run_clone(
    orchestrator: &Orchestrator,
    store: &mut dyn AssetStore,
    request: &CloneRequest,
) -> Result<CloneOutcome, OrchestratorError> {
    let config = orchestrator.config();
    let registry = orchestrator.registry();
    let options = config.remap_options();

    // Root resolution; nothing has been mutated if this fails.
    let source_id = store
        .load(&request.root)
        .ok_or_else(|| OrchestratorError::UnknownRoot(request.root.clone()))?;
    let kind = store
        .data(source_id)
        .map(|data| data.kind())
        .ok_or_else(|| OrchestratorError::MissingRootData(request.root.clone()))?;

    let root = if request.copy_root {
        let root_copy = |e: StoreError| OrchestratorError::RootCopy {
            root: request.root.clone(),
            source: e,
        };
        let hint = request
            .destination
            .join(request.root.file_name())
            .map_err(|e| root_copy(e.into()))?;
        let protected: HashSet<AssetPath> = [request.root.clone()].into_iter().collect();
        let id = copy_asset(
            store,
            &request.root,
            &hint,
            config.destination_policy,
            &protected,
            |_| {},
        )
        .map_err(root_copy)?;
        let path = store
            .path_of(id)
            .cloned()
            .ok_or_else(|| root_copy(StoreError::UnknownId(id)))?;
        info!("root copied '{}' -> '{}'", request.root, path);
        AssetNode { id, path, kind }
    } else {
        AssetNode {
            id: source_id,
            path: request.root.clone(),
            kind,
        }
    };

    let mut stats = CloneStats::default();
    let mut modified: IndexSet<AssetId> = IndexSet::new();

    // Collect phase
    let collected = DependencyCollector::new(config.owned_prefix()?).collect(
        &*store,
        &request.root,
        request.include_external,
    );

    // Clone phase
    let cloner = AssetCloner::new(registry, config.destination_policy)
        .protect([request.root.clone(), root.path.clone()]);
    let mapping = cloner.clone_nodes(
        store,
        collected.nodes(),
        &request.destination,
        &request.exclusions,
        &mut stats,
    );

    // RemapClonedNodes phase
    for (original, clone) in mapping.iter() {
        match registry.apply(store, clone, &mapping, options) {
            Ok(true) => {
                stats.remapped += 1;
                modified.insert(clone.id);
            }
            Ok(false) => {}
            Err(e) => {
                warn!("failed to remap clone of '{}': {}", original, e);
                stats.fail(
                    &clone.path,
                    Stage::RemapClonedNodes,
                    FailureReason::RemapFailure,
                    e.to_string(),
                );
            }
        }
    }

    // RemapRootGraph phase
    match remap_root(store, &root, &mapping, registry, options) {
        Ok(true) => {
            stats.remapped += 1;
            modified.insert(root.id);
        }
        Ok(false) => {}
        Err(e) => {
            warn!("failed to remap root '{}': {}", root.path, e);
            stats.fail(
                &root.path,
                Stage::RemapRootGraph,
                FailureReason::RemapFailure,
                e.to_string(),
            );
        }
    }

    // Commit phase
    for id in modified {
        match store.persist(id) {
            Ok(()) => stats.persisted += 1,
            Err(e) => {
                let path = store.path_of(id).cloned().unwrap_or_else(|| root.path.clone());
                warn!("failed to persist '{}': {}", path, e);
                stats.fail(&path, Stage::Commit, FailureReason::PersistFailure, e.to_string());
            }
        }
    }

    let status = CloneStatus::from_stats(&stats);
    diagnostics::log_summary(&stats, status);

    Ok(CloneOutcome {
        mapping,
        root: root.id,
        stats,
        status,
    })
}
