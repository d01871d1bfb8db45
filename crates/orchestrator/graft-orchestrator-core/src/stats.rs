use std::collections::BTreeMap;

use serde::Serialize;

use graft_api_core::{AssetKind, AssetPath};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Collect,
    Clone,
    RemapClonedNodes,
    RemapRootGraph,
    Commit,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Collect,
        Stage::Clone,
        Stage::RemapClonedNodes,
        Stage::RemapRootGraph,
        Stage::Commit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Collect => "collect",
            Stage::Clone => "clone",
            Stage::RemapClonedNodes => "remap_cloned_nodes",
            Stage::RemapRootGraph => "remap_root_graph",
            Stage::Commit => "commit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The asset no longer loaded when it was about to be cloned.
    MissingSource,
    /// The store refused the copy; references to it stay on the original.
    DuplicationFailure,
    /// A strategy failed; the asset keeps its pre-remap data.
    RemapFailure,
    /// Writing the asset out failed.
    PersistFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub path: AssetPath,
    pub stage: Stage,
    pub reason: FailureReason,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CloneStats {
    /// Clones created per kind.
    pub cloned: BTreeMap<AssetKind, usize>,
    /// Collected assets skipped because the caller excluded them.
    pub excluded: usize,
    /// Assets (clones and root) whose references were rewritten.
    pub remapped: usize,
    pub persisted: usize,
    pub failures: Vec<Failure>,
}

impl CloneStats {
    pub fn total_cloned(&self) -> usize {
        self.cloned.values().sum()
    }

    pub fn cloned_of(&self, kind: AssetKind) -> usize {
        self.cloned.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn count_clone(&mut self, kind: AssetKind) {
        *self.cloned.entry(kind).or_insert(0) += 1;
    }

    pub(crate) fn fail(
        &mut self,
        path: &AssetPath,
        stage: Stage,
        reason: FailureReason,
        message: impl Into<String>,
    ) {
        self.failures.push(Failure {
            path: path.clone(),
            stage,
            reason,
            message: message.into(),
        });
    }

    pub fn failures_with(&self, reason: FailureReason) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.reason == reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneStatus {
    Success,
    /// Finished, but at least one asset failed somewhere along the way.
    PartialSuccess,
}

impl CloneStatus {
    pub fn name(self) -> &'static str {
        match self {
            CloneStatus::Success => "success",
            CloneStatus::PartialSuccess => "partial_success",
        }
    }

    pub fn from_stats(stats: &CloneStats) -> Self {
        if stats.failures.is_empty() {
            CloneStatus::Success
        } else {
            CloneStatus::PartialSuccess
        }
    }
}
