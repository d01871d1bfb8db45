//! Hand-built stores for the canonical clone scenarios.

use std::collections::BTreeMap;

use graft_api_core::data::{AnimatorGraph, Motion};
use graft_api_core::{AssetData, AssetId, AssetPath, AssetStore};
use graft_store_core::MemoryStore;

use crate::builders::*;

/// A store plus the root to clone and named handles to interesting assets.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub store: MemoryStore,
    pub root: AssetPath,
    names: BTreeMap<String, AssetId>,
}

impl Scenario {
    fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            root: p("Assets/root"),
            names: BTreeMap::new(),
        }
    }

    fn add(&mut self, name: &str, path: &str, data: AssetData) -> AssetId {
        let id = self
            .store
            .insert(p(path), data)
            .unwrap_or_else(|e| panic!("scenario asset '{name}': {e}"));
        self.names.insert(name.to_string(), id);
        id
    }

    fn set_root(&mut self, name: &str, path: &str, data: AssetData) -> AssetId {
        self.root = p(path);
        self.add(name, path, data)
    }

    /// Id of the asset registered as `name`.
    pub fn id(&self, name: &str) -> AssetId {
        *self
            .names
            .get(name)
            .unwrap_or_else(|| panic!("scenario has no asset named '{name}'"))
    }

    /// Original path of the asset registered as `name`.
    pub fn path(&self, name: &str) -> AssetPath {
        self.store
            .path_of(self.id(name))
            .cloned()
            .unwrap_or_else(|| panic!("asset '{name}' vanished from the store"))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

/// Root whose FX layer plays one clip through a one-state graph.
/// Names: `root`, `graph`, `clip`.
pub fn graph_with_clip() -> Scenario {
    let mut s = Scenario::new();
    let clip_id = s.add("clip", "Assets/A/Anim/C1.anim", clip());
    let graph_id = s.add(
        "graph",
        "Assets/A/FX.controller",
        graph(vec![state("Play", Motion::Asset(clip_id))]),
    );
    s.set_root(
        "root",
        "Assets/A/Avatar.prefab",
        avatar(descriptor(None, None, Some(graph_id)), vec![]),
    );
    s
}

/// Root rendering one material bound to one texture through a shader.
/// Names: `root`, `material`, `texture`, `shader`.
pub fn material_with_texture() -> Scenario {
    let mut s = Scenario::new();
    let shader = s.add("shader", "Assets/C/Shaders/Toon.shader", toon_shader());
    let tex = s.add("texture", "Assets/C/Textures/Skin.png", texture());
    let mat = s.add(
        "material",
        "Assets/C/Materials/Skin.mat",
        material(Some(shader), Some(tex)),
    );
    s.set_root(
        "root",
        "Assets/C/Avatar.prefab",
        avatar(
            descriptor(None, None, None),
            vec![renderer(None, vec![Some(mat)])],
        ),
    );
    s
}

/// Root menu with an empty parameter-set slot and a sub-menu that does
/// reference the avatar's parameter set.
/// Names: `root`, `params`, `menu`, `submenu`, `icon`.
pub fn nested_menus() -> Scenario {
    let mut s = Scenario::new();
    let params = s.add(
        "params",
        "Assets/D/Expressions/Params.asset",
        parameter_set(&["Hat", "Wave"]),
    );
    let icon = s.add("icon", "Assets/D/Icons/hat.png", texture());
    let submenu = s.add(
        "submenu",
        "Assets/D/Expressions/Props.asset",
        menu(Some(params), vec![control("Hat", None, Some(icon))]),
    );
    let root_menu = s.add(
        "menu",
        "Assets/D/Expressions/Main.asset",
        menu(
            None,
            vec![control("Wave", None, None), control("Props", Some(submenu), Some(icon))],
        ),
    );
    s.set_root(
        "root",
        "Assets/D/Avatar.prefab",
        avatar(descriptor(Some(params), Some(root_menu), None), vec![]),
    );
    s
}

/// Graph with one state embedding a blend tree `depth` levels deep and a
/// second state playing a standalone blend-tree asset.
/// Names: `root`, `graph`, `tree_asset`, `tree_clip`, `leaf0`..`leaf{depth-1}`.
pub fn deep_blend_tree(depth: usize) -> Scenario {
    let mut s = Scenario::new();
    let leaves: Vec<AssetId> = (0..depth)
        .map(|i| s.add(&format!("leaf{i}"), &format!("Assets/B/Anim/leaf{i}.anim"), clip()))
        .collect();
    let tree_clip = s.add("tree_clip", "Assets/B/Anim/tree_clip.anim", clip());
    let tree_asset = s.add(
        "tree_asset",
        "Assets/B/Standalone.blendtree",
        AssetData::BlendTree(blend_tree_chain(&[tree_clip])),
    );
    let graph_id = s.add(
        "graph",
        "Assets/B/FX.controller",
        graph(vec![
            state("Deep", Motion::Tree(blend_tree_chain(&leaves))),
            state("Standalone", Motion::Asset(tree_asset)),
        ]),
    );
    s.set_root(
        "root",
        "Assets/B/Avatar.prefab",
        avatar(descriptor(None, None, Some(graph_id)), vec![]),
    );
    s
}

/// Graph whose base layer nests `depth` state machines, one state each.
/// Names: `root`, `graph`, `leaf0`..`leaf{depth-1}`.
pub fn nested_state_machines(depth: usize) -> Scenario {
    let mut s = Scenario::new();
    let leaves: Vec<AssetId> = (0..depth)
        .map(|i| s.add(&format!("leaf{i}"), &format!("Assets/S/Anim/leaf{i}.anim"), clip()))
        .collect();
    let graph_id = s.add(
        "graph",
        "Assets/S/FX.controller",
        AssetData::AnimatorGraph(AnimatorGraph {
            parameters: vec![],
            layers: vec![layer("Base", machine_chain(&leaves))],
        }),
    );
    s.set_root(
        "root",
        "Assets/S/Avatar.prefab",
        avatar(descriptor(None, None, Some(graph_id)), vec![]),
    );
    s
}

/// Distinct assets referenced by the asset stored at `id`, in field order.
pub fn references_of(store: &dyn AssetStore, id: AssetId) -> Vec<AssetId> {
    store
        .data(id)
        .map(AssetData::referenced_ids)
        .unwrap_or_default()
}
