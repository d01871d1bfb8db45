use thiserror::Error;

use graft_api_core::{AssetPath, PathError, StoreError};

/// Failures that abort a clone operation. Per-asset problems are recorded in
/// the outcome's stats instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("root '{0}' does not resolve to an asset")]
    UnknownRoot(AssetPath),
    #[error("root '{0}' has no data")]
    MissingRootData(AssetPath),
    #[error("failed to copy root '{root}': {source}")]
    RootCopy {
        root: AssetPath,
        #[source]
        source: StoreError,
    },
    #[error("invalid owned prefix '{prefix}': {source}")]
    OwnedPrefix {
        prefix: String,
        #[source]
        source: PathError,
    },
    #[error("invalid clone config: {0}")]
    Config(#[from] serde_json::Error),
}
