#![allow(dead_code)]

use std::sync::Arc;

use agora_api::auth::jwt::{generate_access_token_at, JwtConfig};
use agora_api::config::ServerConfig;
use agora_api::router::build_app_router;
use agora_api::state::AppState;
use agora_core::types::DbId;
use agora_db::store::MemoryStore;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router backed by a fresh in-memory store.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a request with a raw `Authorization` header value.
pub async fn send_with_authorization(
    app: Router,
    method: Method,
    uri: &str,
    authorization: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error body and return it.
pub async fn expect_error(
    response: Response<Body>,
    status: StatusCode,
    code: &str,
) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
    assert!(json["error"].is_string());
    json
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up `username` with [`TEST_PASSWORD`], log in, and return `(user_id, token)`.
pub async fn signup_and_login(app: &Router, username: &str) -> (DbId, String) {
    let credentials = serde_json::json!({ "username": username, "password": TEST_PASSWORD });

    let response = post_json(app.clone(), "/api/v1/auth/signup", credentials.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app.clone(), "/api/v1/auth/login", credentials).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let user_id: DbId = serde_json::from_value(json["user"]["id"].clone()).unwrap();
    let token = json["access_token"].as_str().unwrap().to_string();
    (user_id, token)
}

/// A correctly signed token for `user_id` whose lifetime ended an hour ago.
pub fn expired_token(user_id: DbId) -> String {
    let config = test_config();
    let issued_at = chrono::Utc::now().timestamp() - 2 * 3600;
    generate_access_token_at(user_id, issued_at, &config.jwt).unwrap()
}

/// Create an article through the API and return its JSON representation.
pub async fn create_article(app: &Router, token: &str, title: &str, body: &str) -> serde_json::Value {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/articles",
        serde_json::json!({ "title": title, "body": body }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Comment on an article through the API and return the new comment id.
pub async fn create_comment(app: &Router, token: &str, article_id: &str, body: &str) -> String {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/comments",
        serde_json::json!({ "article_id": article_id, "body": body }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["comment_id"]
        .as_str()
        .unwrap()
        .to_string()
}
