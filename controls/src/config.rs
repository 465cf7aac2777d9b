//! Orbit controls configuration.
//!
//! The host page passes the configuration as a JSON object with camelCase
//! keys. Every field has a default, so `{}` is a valid configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::indicator::HidePolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed orbit controls config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("minDistance ({min}) is greater than maxDistance ({max})")]
    DistanceRange { min: f64, max: f64 },
    #[error("minScale ({min}) is greater than maxScale ({max})")]
    ScaleRange { min: f64, max: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("target selector is blank")]
    BlankTarget,
}

/// Read-only settings supplied by the host at construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitConfig {
    /// Whether gestures are processed at all.
    pub enabled: bool,
    /// CSS selector of the model entity. Its `object3D` is bound at
    /// construction and again on every `model-ready` document event.
    pub target: Option<String>,
    pub max_distance: f64,
    pub min_distance: f64,
    /// Multiplier applied to horizontal drag before it becomes yaw.
    pub rotate_speed: f64,
    /// Accepted for compatibility; pinch zoom does not read it.
    pub zoom_speed: f64,
    /// Accepted for compatibility; orbiting is undamped.
    pub enable_damping: bool,
    /// Accepted for compatibility; orbiting is undamped.
    pub damping_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// What happens when two gestures overlap the indicator timeout.
    pub indicator: HidePolicy,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: None,
            max_distance: 10.0,
            min_distance: 0.5,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.1,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            indicator: HidePolicy::default(),
        }
    }
}

impl OrbitConfig {
    /// Parse and validate a JSON configuration blob.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed, a numeric field is
    /// not finite, or a min/max pair is inverted.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("maxDistance", self.max_distance),
            ("minDistance", self.min_distance),
            ("rotateSpeed", self.rotate_speed),
            ("zoomSpeed", self.zoom_speed),
            ("dampingFactor", self.damping_factor),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }
        if self.min_distance > self.max_distance {
            return Err(ConfigError::DistanceRange { min: self.min_distance, max: self.max_distance });
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if self.target.as_deref().is_some_and(|sel| sel.trim().is_empty()) {
            return Err(ConfigError::BlankTarget);
        }
        Ok(())
    }

    /// The configured target selector, trimmed.
    #[must_use]
    pub fn target_selector(&self) -> Option<&str> {
        self.target.as_deref().map(str::trim)
    }
}
