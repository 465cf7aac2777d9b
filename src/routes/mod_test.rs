use super::*;
use std::fs;
use std::path::PathBuf;

async fn spawn(root: PathBuf) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(AppState::new(root))).await.unwrap();
    });
    format!("http://{addr}")
}

fn assets_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>viewer</h1>").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a project").unwrap();
    fs::create_dir_all(dir.path().join("proj1/OBJ_model")).unwrap();
    fs::write(dir.path().join("proj1/OBJ_model/representation_3d.obj"), "v 0 0 0\n").unwrap();
    fs::create_dir(dir.path().join("proj2")).unwrap();
    dir
}

#[tokio::test]
async fn list_chantier_returns_subdirectories() {
    let dir = assets_tree();
    let base = spawn(dir.path().to_path_buf()).await;

    let response = reqwest::get(format!("{base}/list-chantier")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let names: Vec<String> = response.json().await.unwrap();
    assert_eq!(names, ["proj1", "proj2"]);
}

#[tokio::test]
async fn list_chantier_fails_with_500_when_root_missing() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn(dir.path().join("absent")).await;

    let response = reqwest::get(format!("{base}/list-chantier")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn root_serves_index_page() {
    let dir = assets_tree();
    let base = spawn(dir.path().to_path_buf()).await;

    let body = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "<h1>viewer</h1>");
}

#[tokio::test]
async fn model_files_resolve_under_both_mounts() {
    let dir = assets_tree();
    let base = spawn(dir.path().to_path_buf()).await;

    for path in ["/proj1/OBJ_model/representation_3d.obj", "/chantiers/proj1/OBJ_model/representation_3d.obj"] {
        let response = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK, "{path}");
        assert_eq!(response.text().await.unwrap(), "v 0 0 0\n");
    }
}

#[tokio::test]
async fn unknown_file_is_404() {
    let dir = assets_tree();
    let base = spawn(dir.path().to_path_buf()).await;

    let response = reqwest::get(format!("{base}/proj9/missing.gltf")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthz_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn(dir.path().to_path_buf()).await;

    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
