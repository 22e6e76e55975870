use super::*;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use homepage_core::DocumentStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const PASSWORD: &str = "open-sesame";

fn setup() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let public = temp_dir.path().join("public");
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(public.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(public.join("admin.html"), "<h1>admin</h1>").unwrap();
    std::fs::write(public.join("style.css"), "body {}").unwrap();

    let store = DocumentStore::new(public.join("config.json"))
        .with_backup_dir(temp_dir.path().join("backups"));
    let state = AppState::new(
        SectionEditor::new(store),
        PasswordCheck::new(Some(PASSWORD)),
        &public,
    );
    (router(state), temp_dir)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = call(app, method, uri, body).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = call(app, Method::GET, uri, None).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

// ============================================================================
// Health and full document
// ============================================================================

#[tokio::test]
async fn test_health_reports_document_presence() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["config_exists"], false);
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());

    send(&app, Method::PUT, "/api/profile", Some(json!({"name": "Ada"}))).await;

    let (_, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(body["config_exists"], true);
}

#[tokio::test]
async fn test_get_config_missing_document() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::GET, "/api/config", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_save_config_and_backup() {
    let (app, _temp) = setup();
    let first = json!({"profile": {"name": "Ada"}, "skills": []});
    let second = json!({"profile": {"name": "Grace"}});

    let (status, body) = send(&app, Method::POST, "/api/config", Some(first)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["backup"], Value::Null);

    let (status, body) = send(&app, Method::POST, "/api/config", Some(second.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let backup = body["backup"].as_str().unwrap();
    assert!(backup.starts_with("config.backup."));

    let (status, body) = send(&app, Method::GET, "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], second);
}

#[tokio::test]
async fn test_save_config_rejects_non_objects() {
    let (app, _temp) = setup();

    for payload in [json!([1, 2]), json!("config"), json!({}), json!(null)] {
        let (status, body) = send(&app, Method::POST, "/api/config", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
    }
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (app, _temp) = setup();

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/profile")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corrupt_document_is_server_error() {
    let (app, temp) = setup();
    std::fs::write(temp.path().join("public").join("config.json"), "[]").unwrap();

    let (status, body) = send(&app, Method::GET, "/api/config", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "corrupt_document");

    let (status, _) = send(&app, Method::POST, "/api/skills", Some(json!({"name": "Rust"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login() {
    let (app, _temp) = setup();

    let (status, _) = send(&app, Method::POST, "/api/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/api/login", Some(json!({"password": "nope"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/api/login", Some(json!({"password": 42}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::POST, "/api/login", Some(json!({"password": PASSWORD}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

// ============================================================================
// Sections
// ============================================================================

#[tokio::test]
async fn test_absent_sections_use_empty_defaults() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::GET, "/api/skills", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (_, body) = send(&app, Method::GET, "/api/sociallinks", None).await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = send(&app, Method::GET, "/api/profile", None).await;
    assert_eq!(body["data"], Value::Null);
    assert!(body.as_object().unwrap().contains_key("data"));
}

#[tokio::test]
async fn test_unknown_section() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_replace_section() {
    let (app, _temp) = setup();
    let contact = json!({"email": "ada@example.com", "github": "ada"});

    let (status, body) = send(&app, Method::PUT, "/api/contact", Some(contact.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["timestamp"].is_string());

    let (_, body) = send(&app, Method::GET, "/api/contact", None).await;
    assert_eq!(body["data"], contact);
}

#[tokio::test]
async fn test_replace_section_leaves_others() {
    let (app, _temp) = setup();
    send(&app, Method::PUT, "/api/profile", Some(json!({"name": "Ada"}))).await;
    send(&app, Method::POST, "/api/friendlinks", Some(json!({"name": "Grace", "url": "https://g.example"}))).await;

    send(&app, Method::PUT, "/api/music", Some(json!({"autoplay": true}))).await;

    let (_, body) = send(&app, Method::GET, "/api/config", None).await;
    assert_eq!(body["data"]["profile"], json!({"name": "Ada"}));
    assert_eq!(
        body["data"]["friendLinks"],
        json!([{"name": "Grace", "url": "https://g.example"}])
    );
    assert_eq!(body["data"]["music"], json!({"autoplay": true}));
}

#[tokio::test]
async fn test_replace_section_requires_body() {
    let (app, _temp) = setup();

    let (status, _) = send(&app, Method::PUT, "/api/background", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_method_for_section_shape() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::PUT, "/api/skills", Some(json!(["Rust"]))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method_not_allowed");

    let (status, _) = send(&app, Method::POST, "/api/profile", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&app, Method::DELETE, "/api/music/0", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// List items
// ============================================================================

#[tokio::test]
async fn test_add_update_delete_items() {
    let (app, _temp) = setup();

    for name in ["a", "b", "c"] {
        let (status, _) = send(&app, Method::POST, "/api/skills", Some(json!({"name": name}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = send(&app, Method::PUT, "/api/skills/1", Some(json!({"name": "B", "level": 3}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/skills/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"name": "a"}));

    let (_, body) = send(&app, Method::GET, "/api/skills", None).await;
    assert_eq!(body["data"], json!([{"name": "B", "level": 3}, {"name": "c"}]));
}

#[tokio::test]
async fn test_add_item_returns_index() {
    let (app, _temp) = setup();

    let (_, body) = send(&app, Method::POST, "/api/projects", Some(json!({"name": "one"}))).await;
    assert_eq!(body["data"], 0);
    let (_, body) = send(&app, Method::POST, "/api/projects", Some(json!({"name": "two"}))).await;
    assert_eq!(body["data"], 1);
}

#[tokio::test]
async fn test_add_item_requires_name() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::POST, "/api/projects", Some(json!({"url": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide a project name");
}

#[tokio::test]
async fn test_item_index_errors() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::DELETE, "/api/projects/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "section_not_found");

    send(&app, Method::POST, "/api/projects", Some(json!({"name": "only"}))).await;

    let (status, body) = send(&app, Method::PUT, "/api/projects/5", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "index_out_of_range");

    let (status, _) = send(&app, Method::DELETE, "/api/projects/-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/projects", None).await;
    assert_eq!(body["data"], json!([{"name": "only"}]));
}

#[tokio::test]
async fn test_add_item_to_non_list_conflicts() {
    let (app, _temp) = setup();
    send(&app, Method::POST, "/api/config", Some(json!({"skills": {"rust": 9}}))).await;

    let (status, body) = send(&app, Method::POST, "/api/skills", Some(json!({"name": "Go"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "not_a_list");

    let (_, body) = send(&app, Method::GET, "/api/skills", None).await;
    assert_eq!(body["data"], json!({"rust": 9}));
}

#[tokio::test]
async fn test_concurrent_adds_are_all_kept() {
    let (app, _temp) = setup();
    let requests = 24;

    let handles: Vec<_> = (0..requests)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move {
                send(&app, Method::POST, "/api/friendlinks", Some(json!({"name": format!("friend-{n}")}))).await
            })
        })
        .collect();

    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/api/friendlinks", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), requests);
}

// ============================================================================
// Static files
// ============================================================================

#[tokio::test]
async fn test_static_pages() {
    let (app, _temp) = setup();

    let (status, body) = text(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>home</h1>");

    let (status, body) = text(&app, "/admin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>admin</h1>");

    let (status, body) = text(&app, "/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body {}");
}

#[tokio::test]
async fn test_missing_static_file_is_json_404() {
    let (app, _temp) = setup();

    let (status, body) = send(&app, Method::GET, "/nope.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
