//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server is read-only, so it only carries the assets root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    assets_root: Arc<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(assets_root: PathBuf) -> Self {
        Self { assets_root: Arc::new(assets_root) }
    }

    /// Folder holding one subdirectory per project.
    #[must_use]
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }
}
