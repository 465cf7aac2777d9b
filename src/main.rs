mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    if !config.assets_dir.is_dir() {
        tracing::warn!(assets_dir = %config.assets_dir.display(), "assets directory missing; project listing will fail");
    }

    let state = state::AppState::new(config.assets_dir.clone());
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, assets_dir = %config.assets_dir.display(), "ar-viewer listening");
    axum::serve(listener, app).await.expect("server failed");
}
