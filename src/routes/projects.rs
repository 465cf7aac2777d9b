//! Project listing.
//!
//! Each project is a folder under the assets root; loose files next to them
//! (the viewer page, stylesheets) are not projects.

use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "project listing failed");
        let body = Json(json!({ "error": "failed to list projects" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Names of the subdirectories of `root`, sorted. Symlinks to directories
/// count; dangling links, entries that can't be inspected and names that are
/// not UTF-8 are skipped.
///
/// # Errors
///
/// Returns [`AssetError::Io`] if `root` itself can't be read.
pub async fn list_project_dirs(root: &Path) -> Result<Vec<String>, AssetError> {
    let io_error = |source: std::io::Error| AssetError::Io { path: root.to_path_buf(), source };

    let mut entries = tokio::fs::read_dir(root).await.map_err(io_error)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable assets entry");
                continue;
            }
        };
        if !metadata.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(name = ?raw, "skipping project folder with non UTF-8 name"),
        }
    }
    names.sort();
    Ok(names)
}

/// `GET /list-chantier`
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<String>>, AssetError> {
    let names = list_project_dirs(state.assets_root()).await?;
    tracing::debug!(count = names.len(), "listed projects");
    Ok(Json(names))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
