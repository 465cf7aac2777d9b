//! Model registry: identifier → load parameters.
//!
//! Entries keep their insertion order so the first registered model is the
//! default selection and pickers list models in declaration order.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::vec3::Vec3;

/// Key of the built-in OBJ entry.
pub const OBJ_MODEL_KEY: &str = "obj-model";
/// Key of the built-in GLTF entry.
pub const GLTF_MODEL_KEY: &str = "gltf-model";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unsupported model format: {0}")]
    UnknownFormat(String),
    #[error("model not found: {0}")]
    NotFound(String),
}

/// File formats the viewer can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Obj,
    Gltf,
}

impl ModelFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Gltf => "gltf",
        }
    }

    /// The A-Frame component that loads this format.
    #[must_use]
    pub fn loader_attribute(self) -> &'static str {
        match self {
            Self::Obj => "obj-model",
            Self::Gltf => "gltf-model",
        }
    }
}

impl FromStr for ModelFormat {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "obj" => Ok(Self::Obj),
            "gltf" => Ok(Self::Gltf),
            other => Err(RegistryError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// Where a model lives and how it is initially placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSource {
    pub path: String,
    /// Companion file, e.g. the `.mtl` material library of an OBJ model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_path: Option<String>,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ModelSource {
    /// A source at `path` with identity transform and no metadata.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            auxiliary_path: None,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
            name: String::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_auxiliary(mut self, path: impl Into<String>) -> Self {
        self.auxiliary_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = name.into();
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub format: ModelFormat,
    #[serde(flatten)]
    pub source: ModelSource,
}

/// One row of a model picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub key: String,
    pub format: ModelFormat,
    pub path: String,
    pub name: String,
    pub description: String,
}

/// A registry row as written in a JSON catalog.
#[derive(Debug, Deserialize)]
struct ModelDefinition {
    key: String,
    format: String,
    #[serde(flatten)]
    source: ModelSource,
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<(String, ModelEntry)>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in OBJ and GLTF entries for a project's asset folder.
    #[must_use]
    pub fn for_project(project: &str) -> Self {
        let mut registry = Self::new();
        let base = format!("/chantiers/{project}");
        registry.insert(
            OBJ_MODEL_KEY,
            ModelEntry {
                format: ModelFormat::Obj,
                source: ModelSource::new(format!("{base}/OBJ_model/representation_3d.obj"))
                    .with_auxiliary(format!("{base}/OBJ_model/representation_3d.mtl"))
                    .named(project, "3D model in OBJ format"),
            },
        );
        registry.insert(
            GLTF_MODEL_KEY,
            ModelEntry {
                format: ModelFormat::Gltf,
                source: ModelSource::new(format!("{base}/model/gltf/result.gltf"))
                    .named(project, "3D model in GLTF format"),
            },
        );
        registry
    }

    /// Build a registry from a JSON array of model definitions.
    ///
    /// Definitions with an unsupported format are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a definition lacks a
    /// `key`, `format` or `path`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let definitions: Vec<ModelDefinition> = serde_json::from_str(raw)?;
        let mut registry = Self::new();
        for def in definitions {
            registry.add_entry(&def.key, &def.format, def.source);
        }
        Ok(registry)
    }

    /// Register `key` in `format`. Unsupported formats are logged and
    /// ignored; returns whether the entry was stored. An existing key is
    /// replaced in place.
    pub fn add_entry(&mut self, key: &str, format: &str, source: ModelSource) -> bool {
        match format.parse::<ModelFormat>() {
            Ok(format) => {
                self.insert(key, ModelEntry { format, source });
                true
            }
            Err(e) => {
                log::warn!("{e}; model '{key}' not registered");
                false
            }
        }
    }

    fn insert(&mut self, key: &str, entry: ModelEntry) {
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key.to_string(), entry)),
        }
    }

    /// Look up a model by key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no entry has this key.
    pub fn resolve(&self, key: &str) -> Result<&ModelEntry, RegistryError> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, entry)| entry)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_str() == key)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ModelEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// The default selection: the first registered entry.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &ModelEntry)> {
        self.entries().next()
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<ModelSummary> {
        self.entries()
            .map(|(key, entry)| ModelSummary {
                key: key.to_string(),
                format: entry.format,
                path: entry.source.path.clone(),
                name: entry.source.name.clone(),
                description: entry.source.description.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
