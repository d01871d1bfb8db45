use serde::{Deserialize, Serialize};

use graft_api_core::AssetPath;
use graft_remap_core::{ParameterSetFill, RemapOptions};

use crate::error::OrchestratorError;

/// What happens when a clone's destination path is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationPolicy {
    /// Let the store pick `name 1.ext`, `name 2.ext`, ... Re-cloning into
    /// the same destination always yields new paths.
    #[default]
    Disambiguate,
    /// Delete the asset at the destination first so the clone takes its path.
    Overwrite,
}

/// Clone operation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    /// Path prefix of the caller-owned namespace, matched segment-wise. An
    /// empty prefix owns everything. Dependencies outside it are only
    /// collected when the request asks for external assets.
    pub owned_prefix: String,
    pub destination_policy: DestinationPolicy,
    pub parameter_set_fill: ParameterSetFill,
}

impl Default for CloneConfig {
    fn default() -> Self {
        CloneConfig {
            owned_prefix: "Assets/".to_string(),
            destination_policy: DestinationPolicy::Disambiguate,
            parameter_set_fill: ParameterSetFill::UniqueOnly,
        }
    }
}

impl CloneConfig {
    pub fn from_json(json: &str) -> Result<Self, OrchestratorError> {
        let config: Self = serde_json::from_str(json)?;
        config.owned_prefix()?;
        Ok(config)
    }

    /// The parsed owned prefix; `None` when every path is owned.
    pub fn owned_prefix(&self) -> Result<Option<AssetPath>, OrchestratorError> {
        if self.owned_prefix.trim().is_empty() {
            return Ok(None);
        }
        AssetPath::parse(&self.owned_prefix)
            .map(Some)
            .map_err(|source| OrchestratorError::OwnedPrefix {
                prefix: self.owned_prefix.clone(),
                source,
            })
    }

    pub fn remap_options(&self) -> RemapOptions {
        RemapOptions {
            parameter_set_fill: self.parameter_set_fill,
        }
    }
}
