//! Current-model selection and the attribute changes that load it.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use serde::Serialize;

use crate::registry::{ModelEntry, ModelFormat, ModelRegistry, RegistryError};

/// Loader components that must be cleared before another model is loaded.
pub const LOADER_ATTRIBUTES: [&str; 2] = ["obj-model", "gltf-model"];

/// Attribute edits to apply, in order, to the model entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDirective {
    pub remove: Vec<&'static str>,
    pub set: Vec<(&'static str, String)>,
}

impl LoadDirective {
    fn for_entry(entry: &ModelEntry, visible: bool) -> Self {
        let source = &entry.source;
        let loader_value = match (entry.format, source.auxiliary_path.as_deref()) {
            (ModelFormat::Obj, Some(mtl)) => format!("obj: {}; mtl: {mtl}", source.path),
            (ModelFormat::Obj, None) => format!("obj: {}", source.path),
            (ModelFormat::Gltf, _) => format!("url({})", source.path),
        };
        Self {
            remove: LOADER_ATTRIBUTES.to_vec(),
            set: vec![
                (entry.format.loader_attribute(), loader_value),
                ("scale", source.scale.to_string()),
                ("rotation", source.rotation.to_string()),
                ("position", source.position.to_string()),
                ("visible", visible.to_string()),
            ],
        }
    }

    /// Value set for `attribute`, if any.
    #[must_use]
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.set.iter().find(|(name, _)| *name == attribute).map(|(_, v)| v.as_str())
    }
}

/// Progress of the entity's asynchronous model load, as reported by the
/// framework's `model-loaded` / `model-error` events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "camelCase")]
pub enum LoadStatus {
    /// Attributes applied, waiting for the framework.
    #[default]
    Pending,
    Loaded,
    /// The framework reported an error, with its detail.
    Failed(String),
}

/// Snapshot of the current model for the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub key: String,
    pub visible: bool,
    pub status: LoadStatus,
    #[serde(flatten)]
    pub entry: ModelEntry,
}

#[derive(Debug, Clone)]
pub struct ModelLoader {
    registry: ModelRegistry,
    current: Option<String>,
    visible: bool,
    status: LoadStatus,
}

impl ModelLoader {
    /// Wrap a registry. The first registered model is the initial selection
    /// and the model starts visible.
    #[must_use]
    pub fn new(registry: ModelRegistry) -> Self {
        let current = registry.first().map(|(key, _)| key.to_string());
        Self { registry, current, visible: true, status: LoadStatus::Pending }
    }

    /// Build the attribute edits that load `key`, hand them to `apply`, and
    /// select `key` once `apply` succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] (converted into `E`) if `key`
    /// isn't registered, or `apply`'s error. Either way the current selection
    /// and load status are left unchanged.
    pub fn load<E, F>(&mut self, key: &str, apply: F) -> Result<LoadDirective, E>
    where
        E: From<RegistryError>,
        F: FnOnce(&LoadDirective) -> Result<(), E>,
    {
        let directive = LoadDirective::for_entry(self.registry.resolve(key)?, self.visible);
        apply(&directive)?;
        self.current = Some(key.to_string());
        self.status = LoadStatus::Pending;
        Ok(directive)
    }

    /// Load the current selection again through `apply`, if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn reload<E, F>(&mut self, apply: F) -> Result<Option<LoadDirective>, E>
    where
        E: From<RegistryError>,
        F: FnOnce(&LoadDirective) -> Result<(), E>,
    {
        match self.current.clone() {
            Some(key) => self.load(&key, apply).map(Some),
            None => Ok(None),
        }
    }

    /// The framework finished loading the current model.
    pub fn mark_loaded(&mut self) {
        self.status = LoadStatus::Loaded;
    }

    /// The framework failed to load the current model.
    pub fn mark_failed(&mut self, detail: impl Into<String>) {
        self.status = LoadStatus::Failed(detail.into());
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Record the model's visibility; returns the new value.
    pub fn toggle_visibility(&mut self, visible: bool) -> bool {
        self.visible = visible;
        visible
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn current(&self) -> Option<(&str, &ModelEntry)> {
        let key = self.current.as_deref()?;
        self.registry.entries().find(|(k, _)| *k == key)
    }

    #[must_use]
    pub fn info(&self) -> Option<ModelInfo> {
        self.current().map(|(key, entry)| ModelInfo {
            key: key.to_string(),
            visible: self.visible,
            status: self.status.clone(),
            entry: entry.clone(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}
