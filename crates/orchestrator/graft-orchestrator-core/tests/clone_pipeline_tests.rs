use graft_api_core::data::{
    AvatarDescriptor, Component, Material, Menu, Prefab, PropertyValue, Renderer,
};
use graft_api_core::{AssetData, AssetId, AssetKind, AssetPath, AssetStore, StoreError};
use graft_orchestrator::{
    CloneConfig, CloneOutcome, CloneRequest, CloneStatus, DestinationPolicy, FailureReason,
    Orchestrator, OrchestratorError, Stage,
};
use graft_remap_core::{ParameterSetFill, RemapRegistry};
use graft_store_core::MemoryStore;
use graft_test_fixtures::builders::{self, p};
use graft_test_fixtures::faulty::FaultyStore;
use graft_test_fixtures::scenarios::{self, references_of};
use graft_test_fixtures::{configs, stores};

fn init_tracing() {
    let default_filter = "graft_orchestrator=debug,graft_remap_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

const FOX: &str = "Assets/Avatars/Fox/Fox.prefab";
const FOX_DIR: &str = "Assets/Avatars/Fox";

fn fox(rel: &str) -> AssetPath {
    p(&format!("{FOX_DIR}/{rel}"))
}

fn clone_id(outcome: &CloneOutcome, original: &AssetPath) -> AssetId {
    outcome
        .mapping
        .get(original)
        .unwrap_or_else(|| panic!("no clone of '{original}'"))
        .id
}

fn prefab(store: &dyn AssetStore, id: AssetId) -> Prefab {
    match store.data(id) {
        Some(AssetData::Prefab(prefab)) => prefab.clone(),
        other => panic!("expected a prefab at {id}, got {other:?}"),
    }
}

fn descriptor_of(prefab: &Prefab) -> &AvatarDescriptor {
    prefab
        .objects
        .iter()
        .flat_map(|o| o.components.iter())
        .find_map(|c| match c {
            Component::AvatarDescriptor(d) => Some(d),
            _ => None,
        })
        .expect("prefab has an avatar descriptor")
}

fn renderers_of(prefab: &Prefab) -> Vec<&Renderer> {
    prefab
        .objects
        .iter()
        .flat_map(|o| o.components.iter())
        .filter_map(|c| match c {
            Component::Renderer(r) => Some(r),
            _ => None,
        })
        .collect()
}

fn material(store: &dyn AssetStore, id: AssetId) -> Material {
    match store.data(id) {
        Some(AssetData::Material(m)) => m.clone(),
        other => panic!("expected a material at {id}, got {other:?}"),
    }
}

fn menu(store: &dyn AssetStore, id: AssetId) -> Menu {
    match store.data(id) {
        Some(AssetData::Menu(m)) => m.clone(),
        other => panic!("expected a menu at {id}, got {other:?}"),
    }
}

#[test]
fn graph_and_clip_are_cloned_and_rewired() {
    init_tracing();
    let mut s = scenarios::graph_with_clip();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    assert_eq!(outcome.status, CloneStatus::Success);
    assert_eq!(outcome.mapping.len(), 2);
    let graph = clone_id(&outcome, &s.path("graph"));
    let clip = clone_id(&outcome, &s.path("clip"));
    assert_eq!(references_of(&s.store, graph), vec![clip]);
    assert_eq!(references_of(&s.store, s.id("root")), vec![graph]);
    assert_eq!(
        s.store.path_of(graph).unwrap(),
        &p("Assets/Out/Animator/FX.controller")
    );
    assert_eq!(
        s.store.path_of(clip).unwrap(),
        &p("Assets/Out/Animation/C1.anim")
    );
    // Original graph is never touched.
    assert_eq!(references_of(&s.store, s.id("graph")), vec![s.id("clip")]);
}

#[test]
fn excluded_clip_stays_on_the_original() {
    init_tracing();
    let mut s = scenarios::graph_with_clip();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out")).exclude([s.path("clip")]);
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    assert_eq!(outcome.status, CloneStatus::Success);
    assert!(!outcome.mapping.contains(&s.path("clip")));
    assert_eq!(outcome.stats.excluded, 1);
    let graph = clone_id(&outcome, &s.path("graph"));
    assert_eq!(references_of(&s.store, graph), vec![s.id("clip")]);
}

#[test]
fn material_texture_slot_follows_the_clone() {
    init_tracing();
    let mut s = scenarios::material_with_texture();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    // The shader is code and is never duplicated.
    assert!(!outcome.mapping.contains(&s.path("shader")));
    let mat = clone_id(&outcome, &s.path("material"));
    let tex = clone_id(&outcome, &s.path("texture"));
    let cloned = material(&s.store, mat);
    assert_eq!(cloned.shader, Some(s.id("shader")));
    assert_eq!(cloned.texture("_MainTex"), Some(tex));
    let original = material(&s.store, s.id("material"));
    for (before, after) in original.properties.iter().zip(&cloned.properties) {
        if !matches!(before.value, PropertyValue::Texture(_)) {
            assert_eq!(before, after);
        }
    }

    let root = prefab(&s.store, s.id("root"));
    assert_eq!(renderers_of(&root)[0].materials, vec![Some(mat)]);
}

#[test]
fn root_menu_gets_the_single_parameter_set_clone() {
    init_tracing();
    let mut s = scenarios::nested_menus();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    let params = clone_id(&outcome, &s.path("params"));
    let main = clone_id(&outcome, &s.path("menu"));
    let sub = clone_id(&outcome, &s.path("submenu"));
    let icon = clone_id(&outcome, &s.path("icon"));

    let cloned_main = menu(&s.store, main);
    assert_eq!(cloned_main.parameters, Some(params));
    assert_eq!(cloned_main.controls[1].sub_menu, Some(sub));
    assert_eq!(cloned_main.controls[1].icon, Some(icon));
    assert_eq!(menu(&s.store, sub).parameters, Some(params));
    // The original root menu keeps its empty slot.
    assert_eq!(menu(&s.store, s.id("menu")).parameters, None);

    let root = prefab(&s.store, s.id("root"));
    let descriptor = descriptor_of(&root);
    assert_eq!(descriptor.expression_parameters, Some(params));
    assert_eq!(descriptor.expressions_menu, Some(main));
}

#[test]
fn fox_avatar_is_cloned_end_to_end() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("fox_avatar")?;
    let request = CloneRequest::new(p(FOX), p("Assets/Clones/Fox"));
    let outcome = Orchestrator::default().clone(&mut store, &request)?;

    assert_eq!(outcome.status, CloneStatus::Success);
    assert_eq!(outcome.root, AssetId(1));
    let stats = &outcome.stats;
    assert_eq!(stats.total_cloned(), 20);
    assert_eq!(stats.cloned_of(AssetKind::AnimationClip), 5);
    assert_eq!(stats.cloned_of(AssetKind::Material), 3);
    assert_eq!(stats.cloned_of(AssetKind::Texture), 3);
    assert_eq!(stats.cloned_of(AssetKind::Menu), 2);
    assert_eq!(stats.cloned_of(AssetKind::GenericDataObject), 1);
    // Clones of the menus, graph, override table, idle clip, body material
    // and tail data, plus the root.
    assert_eq!(stats.remapped, 8);
    assert_eq!(stats.persisted, 8);

    let c = |rel: &str| clone_id(&outcome, &fox(rel));

    let root = prefab(&store, AssetId(1));
    let descriptor = descriptor_of(&root);
    assert_eq!(descriptor.expression_parameters, Some(c("Expressions/FoxParams.asset")));
    assert_eq!(descriptor.expressions_menu, Some(c("Expressions/FoxMenu.asset")));
    let controllers: Vec<_> = descriptor.base_layers.iter().map(|l| l.controller).collect();
    assert_eq!(
        controllers,
        vec![
            Some(c("Animator/Gesture.overrideController")),
            Some(c("Animator/FX.controller")),
        ]
    );
    assert_eq!(descriptor.special_layers[0].controller, None);

    let body = renderers_of(&root)[0].clone();
    assert_eq!(body.mesh, Some(c("Model/Fox.mesh")));
    assert_eq!(
        body.materials,
        vec![Some(c("Materials/Body.mat")), Some(c("Materials/Eyes.mat")), None]
    );
    assert!(references_of(&store, AssetId(1)).contains(&c("Data/TailBones.asset")));

    assert_eq!(
        references_of(&store, c("Animator/FX.controller")),
        vec![
            c("Animator/Body.mask"),
            c("Animation/Idle.anim"),
            c("Animation/Left.anim"),
            c("Animation/Right.anim"),
            c("Animation/Wave.anim"),
        ]
    );
    match store.data(c("Animator/Gesture.overrideController")) {
        Some(AssetData::OverrideTable(table)) => {
            assert_eq!(table.base, Some(c("Animator/FX.controller")));
            assert_eq!(table.overrides()[0].original, AssetId(15));
            assert_eq!(table.overrides()[0].replacement, Some(c("Animation/WaveAlt.anim")));
        }
        other => panic!("expected an override table, got {other:?}"),
    }
    assert_eq!(
        references_of(&store, c("Expressions/FoxMenu.asset")),
        vec![
            c("Expressions/FoxParams.asset"),
            c("Icons/props.png"),
            c("Expressions/PropsMenu.asset"),
        ]
    );
    assert_eq!(
        references_of(&store, c("Expressions/PropsMenu.asset")),
        vec![
            c("Expressions/FoxParams.asset"),
            c("Icons/props.png"),
            c("Icons/on.png"),
        ]
    );
    assert_eq!(
        references_of(&store, c("Animation/Idle.anim")),
        vec![c("Materials/Body.mat"), c("Materials/Body Alt.mat")]
    );
    assert_eq!(
        material(&store, c("Materials/Body.mat")).texture("_MainTex"),
        Some(c("Textures/Body.png"))
    );
    // External texture is not collected, so the eyes keep pointing at it.
    assert_eq!(
        material(&store, c("Materials/Eyes.mat")).texture("_MainTex"),
        Some(AssetId(70))
    );
    // Scripts are referenced, never cloned.
    assert_eq!(
        references_of(&store, c("Data/TailBones.asset")),
        vec![AssetId(60), c("Audio/swish.wav")]
    );
    assert_eq!(store.persisted().len(), 8);
    Ok(())
}

#[test]
fn external_dependencies_are_cloned_on_request() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("fox_avatar")?;
    let request = CloneRequest::new(p(FOX), p("Assets/Clones/Fox")).include_external(true);
    let outcome = Orchestrator::default().clone(&mut store, &request)?;

    assert_eq!(outcome.stats.total_cloned(), 21);
    let noise = clone_id(&outcome, &p("Packages/com.vendor.toon/Textures/Noise.png"));
    assert_eq!(
        store.path_of(noise),
        Some(&p("Assets/Clones/Fox/Textures/Noise.png"))
    );
    let eyes = clone_id(&outcome, &fox("Materials/Eyes.mat"));
    assert_eq!(material(&store, eyes).texture("_MainTex"), Some(noise));
    assert!(!outcome.mapping.contains(&p("Packages/com.vendor.toon/Toon.shader")));
    assert_eq!(outcome.stats.remapped, 9);
    Ok(())
}

#[test]
fn excluded_fox_clip_is_passthrough() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("fox_avatar")?;
    let idle = fox("Animation/Idle.anim");
    let request = CloneRequest::new(p(FOX), p("Assets/Clones/Fox")).exclude([idle.clone()]);
    let outcome = Orchestrator::default().clone(&mut store, &request)?;

    assert_eq!(outcome.stats.excluded, 1);
    assert_eq!(outcome.stats.total_cloned(), 19);
    assert!(!outcome.mapping.contains(&idle));
    let graph = clone_id(&outcome, &fox("Animator/FX.controller"));
    assert_eq!(references_of(&store, graph)[1], AssetId(12));
    Ok(())
}

#[test]
fn repeated_clones_are_disjoint_and_self_consistent() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("fox_avatar")?;
    let before = store.data(AssetId(1)).cloned();
    let orchestrator = Orchestrator::default();
    let request = CloneRequest::new(p(FOX), p("Assets/Clones/Fox")).copy_root(true);
    let first = orchestrator.clone(&mut store, &request)?;
    let second = orchestrator.clone(&mut store, &request)?;

    let first_ids: Vec<AssetId> = first.mapping.clones().map(|n| n.id).collect();
    let second_ids: Vec<AssetId> = second.mapping.clones().map(|n| n.id).collect();
    assert_eq!(first_ids.len(), second_ids.len());
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
    assert_ne!(first.root, second.root);
    assert_eq!(
        store.path_of(second.root),
        Some(&p("Assets/Clones/Fox/Fox 1.prefab"))
    );
    assert_eq!(
        store.path_of(clone_id(&second, &fox("Materials/Body.mat"))),
        Some(&p("Assets/Clones/Fox/Material/Body 1.mat"))
    );

    for outcome in [&first, &second] {
        let root = prefab(&store, outcome.root);
        let ids: Vec<AssetId> = outcome.mapping.clones().map(|n| n.id).collect();
        for id in references_of(&store, outcome.root) {
            assert!(ids.contains(&id), "root {} points outside its clone set", outcome.root);
        }
        assert_eq!(
            descriptor_of(&root).expressions_menu,
            Some(clone_id(outcome, &fox("Expressions/FoxMenu.asset")))
        );
    }
    assert_eq!(store.data(AssetId(1)).cloned(), before);
    Ok(())
}

#[test]
fn overwrite_policy_reuses_destination_paths() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("fox_avatar")?;
    let config = CloneConfig {
        destination_policy: DestinationPolicy::Overwrite,
        ..CloneConfig::default()
    };
    let orchestrator = Orchestrator::new(config);
    let request = CloneRequest::new(p(FOX), p("Assets/Clones/Fox")).copy_root(true);
    let first = orchestrator.clone(&mut store, &request)?;
    let second = orchestrator.clone(&mut store, &request)?;

    let paths = |o: &CloneOutcome| o.mapping.clones().map(|n| n.path.clone()).collect::<Vec<_>>();
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(store.path_of(second.root), Some(&p("Assets/Clones/Fox/Fox.prefab")));
    // The first run's clones were replaced, not kept alongside.
    assert!(store.path_of(first.root).is_none());
    assert_eq!(second.status, CloneStatus::Success);
    Ok(())
}

/// Avatar whose single renderer wears two textured materials, in order.
fn outfit(first: &str, second: &str) -> anyhow::Result<(MemoryStore, AssetPath)> {
    let mut store = MemoryStore::new();
    let tex = store.insert(p("Assets/Outfit/Textures/Body.png"), builders::texture())?;
    let a = store.insert(p(first), builders::material(None, Some(tex)))?;
    let b = store.insert(p(second), builders::material(None, Some(tex)))?;
    let root = p("Assets/Outfit/Outfit.prefab");
    store.insert(
        root.clone(),
        builders::avatar(
            builders::descriptor(None, None, None),
            vec![builders::renderer(None, vec![Some(a), Some(b)])],
        ),
    )?;
    Ok((store, root))
}

fn overwriting() -> Orchestrator {
    Orchestrator::new(CloneConfig {
        destination_policy: DestinationPolicy::Overwrite,
        ..CloneConfig::default()
    })
}

#[test]
fn overwrite_keeps_same_named_clones_apart() -> anyhow::Result<()> {
    init_tracing();
    let (a, b) = (p("Assets/Outfit/A/Body.mat"), p("Assets/Outfit/B/Body.mat"));
    let (mut store, root) = outfit(a.as_str(), b.as_str())?;
    let request = CloneRequest::new(root.clone(), p("Assets/Out"));
    let outcome = overwriting().clone(&mut store, &request)?;

    assert_eq!(outcome.status, CloneStatus::Success);
    let (ca, cb) = (clone_id(&outcome, &a), clone_id(&outcome, &b));
    assert_ne!(ca, cb);
    assert_eq!(store.path_of(ca), Some(&p("Assets/Out/Material/Body.mat")));
    assert_eq!(store.path_of(cb), Some(&p("Assets/Out/Material/Body 1.mat")));
    let tex = clone_id(&outcome, &p("Assets/Outfit/Textures/Body.png"));
    for id in [ca, cb] {
        assert_eq!(references_of(&store, id), vec![tex]);
    }
    let rewired = prefab(&store, outcome.root);
    assert_eq!(renderers_of(&rewired)[0].materials, vec![Some(ca), Some(cb)]);
    Ok(())
}

#[test]
fn overwrite_never_deletes_a_collected_original() -> anyhow::Result<()> {
    init_tracing();
    let (elsewhere, squatter) = (p("Assets/Outfit/B/Body.mat"), p("Assets/Out/Material/Body.mat"));
    let (mut store, root) = outfit(elsewhere.as_str(), squatter.as_str())?;
    let original = store.load(&squatter).expect("original material");
    let request = CloneRequest::new(root, p("Assets/Out"));
    let outcome = overwriting().clone(&mut store, &request)?;

    assert_eq!(outcome.status, CloneStatus::Success);
    assert_eq!(store.path_of(original), Some(&squatter));
    assert!(store.data(original).is_some());
    assert_eq!(
        store.path_of(clone_id(&outcome, &elsewhere)),
        Some(&p("Assets/Out/Material/Body 1.mat"))
    );
    assert_eq!(
        store.path_of(clone_id(&outcome, &squatter)),
        Some(&p("Assets/Out/Material/Body 2.mat"))
    );
    Ok(())
}

#[test]
fn refused_duplication_is_partial_with_passthrough() {
    init_tracing();
    let s = scenarios::graph_with_clip();
    let clip = s.path("clip");
    let mut store = FaultyStore::new(s.store.clone()).fail_duplicate_of(clip.clone());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut store, &request).unwrap();

    assert_eq!(outcome.status, CloneStatus::PartialSuccess);
    let failures: Vec<_> = outcome
        .stats
        .failures_with(FailureReason::DuplicationFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, clip);
    assert_eq!(failures[0].stage, Stage::Clone);
    let graph = clone_id(&outcome, &s.path("graph"));
    assert_eq!(references_of(&store, graph), vec![s.id("clip")]);
}

#[test]
fn vanished_source_is_reported_missing() {
    init_tracing();
    let s = scenarios::graph_with_clip();
    let clip = s.path("clip");
    let mut store = FaultyStore::new(s.store.clone()).vanish_on_duplicate(clip.clone());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut store, &request).unwrap();

    assert_eq!(outcome.status, CloneStatus::PartialSuccess);
    assert_eq!(outcome.stats.failures_with(FailureReason::MissingSource).count(), 1);
    assert_eq!(outcome.mapping.len(), 1);
}

#[test]
fn persist_failure_does_not_stop_other_commits() {
    init_tracing();
    let s = scenarios::material_with_texture();
    let mut store = FaultyStore::new(s.store.clone()).fail_persist_of(s.root.clone());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut store, &request).unwrap();

    assert_eq!(outcome.status, CloneStatus::PartialSuccess);
    let failures: Vec<_> = outcome
        .stats
        .failures_with(FailureReason::PersistFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, s.root);
    assert_eq!(failures[0].stage, Stage::Commit);
    assert_eq!(outcome.stats.persisted, 1);
    let mat = clone_id(&outcome, &s.path("material"));
    assert_eq!(store.inner().persisted(), &[mat]);
    // The root was still rewritten in memory.
    let root = prefab(&store, s.id("root"));
    assert_eq!(renderers_of(&root)[0].materials, vec![Some(mat)]);
}

#[test]
fn rejected_override_set_is_a_remap_failure() -> anyhow::Result<()> {
    init_tracing();
    let mut store = stores::load("broken_override")?;
    let request = CloneRequest::new(p("Assets/Broken/Broken.prefab"), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut store, &request)?;

    assert_eq!(outcome.status, CloneStatus::PartialSuccess);
    let failures: Vec<_> = outcome
        .stats
        .failures_with(FailureReason::RemapFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].stage, Stage::RemapClonedNodes);
    assert_eq!(failures[0].path, p("Assets/Out/Animator/Gesture.overrideController"));

    let table = clone_id(&outcome, &p("Assets/Broken/Gesture.overrideController"));
    match store.data(table) {
        Some(AssetData::OverrideTable(t)) => {
            assert_eq!(t.base, Some(AssetId(2)));
            assert_eq!(t.overrides()[0].replacement, Some(AssetId(4)));
        }
        other => panic!("expected an override table, got {other:?}"),
    }
    assert!(!store.is_dirty(table));
    // The rest of the operation carried on.
    let fx = clone_id(&outcome, &p("Assets/Broken/FX.controller"));
    assert_eq!(
        descriptor_of(&prefab(&store, AssetId(1))).base_layers[1].controller,
        Some(fx)
    );
    Ok(())
}

#[test]
fn unknown_root_is_fatal_before_any_mutation() {
    init_tracing();
    let mut store = FaultyStore::new(MemoryStore::new());
    let request = CloneRequest::new(p("Assets/Missing.prefab"), p("Assets/Out"));
    let err = Orchestrator::default().clone(&mut store, &request).unwrap_err();

    assert!(matches!(err, OrchestratorError::UnknownRoot(ref path) if path == &request.root));
    assert_eq!(store.mutations(), 0);
}

#[test]
fn refused_root_copy_is_fatal_before_any_mutation() {
    init_tracing();
    let s = scenarios::material_with_texture();
    let mut store = FaultyStore::new(s.store.clone()).fail_duplicate_of(s.root.clone());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Fresh/Out")).copy_root(true);
    let err = Orchestrator::default().clone(&mut store, &request).unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::RootCopy { ref root, source: StoreError::Rejected(_) } if root == &s.root
    ));
    assert_eq!(store.mutations(), 0);
    assert!(!store.exists(&p("Assets/Fresh")));
}

#[test]
fn refused_root_copy_keeps_the_asset_it_would_overwrite() -> anyhow::Result<()> {
    init_tracing();
    let s = scenarios::material_with_texture();
    let mut inner = s.store.clone();
    let occupant = inner.insert(p("Assets/Out/Avatar.prefab"), builders::texture())?;
    let mut store = FaultyStore::new(inner).fail_duplicate_of(s.root.clone());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out")).copy_root(true);
    let err = overwriting().clone(&mut store, &request).unwrap_err();

    assert!(matches!(err, OrchestratorError::RootCopy { .. }));
    assert_eq!(store.mutations(), 0);
    assert_eq!(store.path_of(occupant), Some(&p("Assets/Out/Avatar.prefab")));
    Ok(())
}

#[test]
fn copy_root_leaves_the_original_untouched() {
    init_tracing();
    let mut s = scenarios::material_with_texture();
    let before = s.store.data(s.id("root")).cloned();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out")).copy_root(true);
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    assert_ne!(outcome.root, s.id("root"));
    assert_eq!(s.store.path_of(outcome.root), Some(&p("Assets/Out/Avatar.prefab")));
    assert_eq!(s.store.data(s.id("root")).cloned(), before);
    let mat = clone_id(&outcome, &s.path("material"));
    let copy = prefab(&s.store, outcome.root);
    assert_eq!(renderers_of(&copy)[0].materials, vec![Some(mat)]);
}

#[test]
fn menu_root_goes_through_the_registry() {
    init_tracing();
    let mut s = scenarios::nested_menus();
    let root = s.path("menu");
    let request = CloneRequest::new(root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();

    assert_eq!(outcome.root, s.id("menu"));
    assert!(!outcome.mapping.contains(&root));
    let rewritten = menu(&s.store, s.id("menu"));
    assert_eq!(rewritten.parameters, Some(clone_id(&outcome, &s.path("params"))));
    assert_eq!(
        rewritten.controls[1].sub_menu,
        Some(clone_id(&outcome, &s.path("submenu")))
    );
}

#[test]
fn empty_registry_only_rewires_the_root() {
    init_tracing();
    let mut s = scenarios::graph_with_clip();
    let orchestrator = Orchestrator::default().with_registry(RemapRegistry::new());
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = orchestrator.clone(&mut s.store, &request).unwrap();

    let graph = clone_id(&outcome, &s.path("graph"));
    assert_eq!(references_of(&s.store, graph), vec![s.id("clip")]);
    assert_eq!(references_of(&s.store, s.id("root")), vec![graph]);
    assert_eq!(outcome.stats.remapped, 1);
}

#[test]
fn config_fixtures_load() -> anyhow::Result<()> {
    let overwrite: CloneConfig = configs::load("overwrite")?;
    assert_eq!(overwrite.destination_policy, DestinationPolicy::Overwrite);
    assert_eq!(overwrite.parameter_set_fill, ParameterSetFill::FirstCloned);
    let defaults: CloneConfig = configs::load("defaults")?;
    assert_eq!(defaults, CloneConfig::default());
    Ok(())
}

#[test]
fn collection_can_be_grouped_and_searched() -> anyhow::Result<()> {
    let store = stores::load("fox_avatar")?;
    let orchestrator = Orchestrator::default();
    let collected = orchestrator.collect(&store, &p(FOX), false)?;

    assert_eq!(collected.len(), 20);
    assert!(!collected.contains(&p(FOX)));
    assert!(!collected.contains(&p("Assets/Scripts/TailBoneSettings.cs")));
    let groups = collected.by_kind();
    assert_eq!(groups[&AssetKind::Material].len(), 3);
    assert_eq!(groups[&AssetKind::AnimatorGraph].len(), 1);
    assert_eq!(collected.search("ICONS").len(), 2);
    assert_eq!(collected.search("").len(), 20);

    let external = orchestrator.collect(&store, &p(FOX), true)?;
    assert_eq!(external.len(), 21);
    assert!(external.contains(&p("Packages/com.vendor.toon/Textures/Noise.png")));
    Ok(())
}

#[test]
fn outcome_serializes_with_snake_case_status() {
    let mut s = scenarios::graph_with_clip();
    let request = CloneRequest::new(s.root.clone(), p("Assets/Out"));
    let outcome = Orchestrator::default().clone(&mut s.store, &request).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "success");
    assert_eq!(json["stats"]["cloned"]["animator_graph"], 1);
    assert_eq!(
        json["mapping"]["Assets/A/FX.controller"]["path"],
        "Assets/Out/Animator/FX.controller"
    );
}
