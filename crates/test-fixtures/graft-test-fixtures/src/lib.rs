use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod builders;
pub mod faulty;
pub mod scenarios;

pub use faulty::FaultyStore;
pub use scenarios::Scenario;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    stores: HashMap<String, String>,
    configs: HashMap<String, ConfigEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigEntry {
    Path(String),
    Detailed { path: String },
}

impl ConfigEntry {
    fn as_path(&self) -> &str {
        match self {
            ConfigEntry::Path(path) => path,
            ConfigEntry::Detailed { path } => path,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Store snapshots (`fixtures/stores/*.json`).
pub mod stores {
    use super::*;
    use graft_store_core::{MemoryStore, StoreSnapshot};

    pub fn keys() -> Vec<String> {
        MANIFEST.stores.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.stores, "store", name)?;
        read_to_string(rel)
    }

    pub fn snapshot(name: &str) -> Result<StoreSnapshot> {
        let rel = lookup(&MANIFEST.stores, "store", name)?;
        super::load_json(rel)
    }

    /// Build a fresh [`MemoryStore`] from the named snapshot.
    pub fn load(name: &str) -> Result<MemoryStore> {
        let snapshot = snapshot(name)?;
        MemoryStore::from_snapshot(snapshot)
            .with_context(|| format!("store fixture '{name}' is inconsistent"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.stores, "store", name)?;
        Ok(resolve_path(rel))
    }
}

/// Clone configuration documents (`fixtures/configs/*.json`).
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(entry.as_path())
    }
}
