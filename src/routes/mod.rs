//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The viewer page and every project's model files are static. The assets
//! root is served at `/` and mounted again under `/chantiers` so the paths
//! the model registry builds resolve; `/list-chantier` is the only dynamic
//! endpoint.

pub mod projects;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(state.assets_root()).append_index_html_on_directories(true);

    Router::new()
        .route("/list-chantier", get(projects::list_projects))
        .route("/healthz", get(healthz))
        .nest_service("/chantiers", assets.clone())
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
