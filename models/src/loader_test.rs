use super::*;
use crate::registry::{GLTF_MODEL_KEY, ModelSource, OBJ_MODEL_KEY};

fn loader() -> ModelLoader {
    ModelLoader::new(ModelRegistry::for_project("site"))
}

fn select(loader: &mut ModelLoader, key: &str) -> Result<LoadDirective, RegistryError> {
    loader.load(key, |_| Ok(()))
}

#[test]
fn initial_selection_is_first_entry() {
    let loader = loader();
    assert_eq!(loader.current().map(|(k, _)| k), Some(OBJ_MODEL_KEY));
    assert!(loader.is_visible());
}

#[test]
fn empty_registry_has_no_selection() {
    let mut loader = ModelLoader::new(ModelRegistry::new());
    assert!(loader.current().is_none());
    assert!(loader.info().is_none());
    assert_eq!(loader.reload(|_| Ok::<_, RegistryError>(())), Ok(None));
}

#[test]
fn obj_directive_sets_obj_and_mtl() {
    let mut loader = loader();
    let d = select(&mut loader, OBJ_MODEL_KEY).unwrap();
    assert_eq!(d.remove, vec!["obj-model", "gltf-model"]);
    assert_eq!(
        d.value("obj-model"),
        Some("obj: /chantiers/site/OBJ_model/representation_3d.obj; mtl: /chantiers/site/OBJ_model/representation_3d.mtl")
    );
    assert_eq!(d.value("gltf-model"), None);
    assert_eq!(d.value("scale"), Some("1 1 1"));
    assert_eq!(d.value("rotation"), Some("0 0 0"));
    assert_eq!(d.value("position"), Some("0 0 0"));
    assert_eq!(d.value("visible"), Some("true"));
}

#[test]
fn obj_without_material_omits_mtl() {
    let mut reg = ModelRegistry::new();
    reg.add_entry("bare", "obj", ModelSource::new("/bare.obj"));
    let mut loader = ModelLoader::new(reg);
    let d = select(&mut loader, "bare").unwrap();
    assert_eq!(d.value("obj-model"), Some("obj: /bare.obj"));
}

#[test]
fn gltf_directive_uses_url() {
    let mut loader = loader();
    let d = select(&mut loader, GLTF_MODEL_KEY).unwrap();
    assert_eq!(d.value("gltf-model"), Some("url(/chantiers/site/model/gltf/result.gltf)"));
    assert_eq!(d.set[0].0, "gltf-model");
    assert_eq!(loader.current().map(|(k, _)| k), Some(GLTF_MODEL_KEY));
}

#[test]
fn loading_unknown_key_keeps_selection() {
    let mut loader = loader();
    select(&mut loader, GLTF_MODEL_KEY).unwrap();
    assert_eq!(select(&mut loader, "missing"), Err(RegistryError::NotFound("missing".into())));
    assert_eq!(loader.current().map(|(k, _)| k), Some(GLTF_MODEL_KEY));
}

#[test]
fn hidden_model_loads_hidden() {
    let mut loader = loader();
    assert!(!loader.toggle_visibility(false));
    assert!(!loader.is_visible());
    let d = select(&mut loader, OBJ_MODEL_KEY).unwrap();
    assert_eq!(d.value("visible"), Some("false"));
}

#[test]
fn reload_reapplies_current() {
    let mut loader = loader();
    let d = loader.reload(|_| Ok::<_, RegistryError>(())).unwrap().unwrap();
    assert!(d.value("obj-model").is_some());
}

#[test]
fn info_reports_current_model() {
    let mut loader = loader();
    select(&mut loader, GLTF_MODEL_KEY).unwrap();
    loader.toggle_visibility(false);
    let info = loader.info().unwrap();
    assert_eq!(info.key, GLTF_MODEL_KEY);
    assert!(!info.visible);

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["format"], "gltf");
    assert_eq!(json["visible"], false);
    assert_eq!(json["name"], "site");
}

#[test]
fn failed_apply_keeps_previous_selection() {
    let mut loader = loader();
    select(&mut loader, OBJ_MODEL_KEY).unwrap();
    loader.mark_loaded();

    let result = loader.load(GLTF_MODEL_KEY, |_| Err(RegistryError::NotFound("entity".into())));
    assert!(result.is_err());
    assert_eq!(loader.current().map(|(k, _)| k), Some(OBJ_MODEL_KEY));
    assert_eq!(loader.status(), &LoadStatus::Loaded);
    assert_eq!(loader.info().unwrap().key, OBJ_MODEL_KEY);
}

#[test]
fn apply_sees_directive_before_selection_changes() {
    let mut loader = loader();
    let mut seen = None;
    loader
        .load(GLTF_MODEL_KEY, |d| {
            seen = d.value("gltf-model").map(str::to_owned);
            Ok::<_, RegistryError>(())
        })
        .unwrap();
    assert_eq!(seen.as_deref(), Some("url(/chantiers/site/model/gltf/result.gltf)"));
    assert_eq!(loader.current().map(|(k, _)| k), Some(GLTF_MODEL_KEY));
}

#[test]
fn load_status_follows_framework_events() {
    let mut loader = loader();
    assert_eq!(loader.status(), &LoadStatus::Pending);
    loader.mark_loaded();
    assert_eq!(loader.status(), &LoadStatus::Loaded);
    loader.mark_failed("404 representation_3d.obj");
    assert_eq!(loader.status(), &LoadStatus::Failed("404 representation_3d.obj".into()));

    select(&mut loader, GLTF_MODEL_KEY).unwrap();
    assert_eq!(loader.status(), &LoadStatus::Pending);
}

#[test]
fn info_serializes_load_status() {
    let mut loader = loader();
    assert_eq!(serde_json::to_value(loader.info().unwrap()).unwrap()["status"]["state"], "pending");
    loader.mark_failed("bad mtl");
    let json = serde_json::to_value(loader.info().unwrap()).unwrap();
    assert_eq!(json["status"]["state"], "failed");
    assert_eq!(json["status"]["detail"], "bad mtl");
}
