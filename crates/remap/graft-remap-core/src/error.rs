use thiserror::Error;

use graft_api_core::{AssetId, AssetPath, DataError, FieldError, StoreError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemapError {
    #[error("asset {0} has no data in the store")]
    MissingData(AssetId),
    #[error("'{0}' is already mapped to a clone")]
    AlreadyMapped(AssetPath),
    #[error("strategy '{strategy}' cannot handle {found} payloads")]
    UnexpectedPayload {
        strategy: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
