//! HTTP-level integration tests for the `/articles` endpoints.
//!
//! Covers creation, versioned updates, the author-only permission check,
//! deletion with its cascade, and search paging.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_article, create_comment, delete, delete_auth, expect_error, expired_token,
    get, get_auth, post_json, post_json_auth, put_json, put_json_auth, send_with_authorization,
    signup_and_login,
};
use serde_json::json;

fn timestamp(value: &serde_json::Value) -> chrono::DateTime<chrono::Utc> {
    serde_json::from_value(value.clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = common::build_test_app();
    let (user_id, token) = signup_and_login(&app, "alice").await;

    let created = create_article(&app, &token, "  Hello  ", "First post").await;
    assert_eq!(created["author_id"], user_id.to_string());
    assert_eq!(created["snapshots"].as_array().unwrap().len(), 1);
    assert_eq!(created["snapshots"][0]["title"], "Hello");

    let id = created["id"].as_str().unwrap();
    let response = get(app.clone(), &format!("/api/v1/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"], created);
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;
    let created = create_article(&app, &token, "Stable", "Body").await;
    let uri = format!("/api/v1/articles/{}", created["id"].as_str().unwrap());

    let first = body_json(get(app.clone(), &uri).await).await;
    let second = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_missing_article_returns_404() {
    let app = common::build_test_app();
    let id = agora_core::types::new_id();

    let response = get(app, &format!("/api/v1/articles/{id}")).await;
    expect_error(response, StatusCode::NOT_FOUND, "ARTICLE_NOT_FOUND").await;
}

#[tokio::test]
async fn non_uuid_path_is_a_validation_error() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/articles/not-a-uuid").await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn create_without_token_requires_permission() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/articles",
        json!({ "title": "t", "body": "b" }),
    )
    .await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_REQUIRED").await;
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;

    let response = post_json_auth(
        app,
        "/api/v1/articles",
        json!({ "title": "   ", "body": "b" }),
        &token,
    )
    .await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn over_long_title_is_rejected() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;

    let response = post_json_auth(
        app,
        "/api/v1/articles",
        json!({ "title": "x".repeat(201), "body": "b" }),
        &token,
    )
    .await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn missing_field_is_a_validation_error() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;

    let response = post_json_auth(app, "/api/v1/articles", json!({ "title": "t" }), &token).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Update appends a snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_appends_snapshot_and_keeps_history() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;
    let created = create_article(&app, &token, "v1", "first body").await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/articles/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "v2", "body": "second body" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();

    let snapshots = updated["snapshots"].as_array().unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0], created["snapshots"][0]);
    assert_eq!(snapshots[1]["title"], "v2");
    assert_eq!(snapshots[1]["body"], "second body");
    assert!(timestamp(&snapshots[1]["created_at"]) > timestamp(&snapshots[0]["created_at"]));
    assert_eq!(updated["created_at"], created["created_at"]);

    let history = get_auth(app.clone(), &format!("{uri}/snapshots"), &token).await;
    assert_eq!(history.status(), StatusCode::OK);
    assert_eq!(body_json(history).await["data"], updated["snapshots"]);
}

#[tokio::test]
async fn non_author_update_is_forbidden_and_leaves_history_intact() {
    let app = common::build_test_app();
    let (_, author_token) = signup_and_login(&app, "author").await;
    let (_, other_token) = signup_and_login(&app, "intruder").await;
    let created = create_article(&app, &author_token, "Mine", "body").await;
    let uri = format!("/api/v1/articles/{}", created["id"].as_str().unwrap());

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Hijacked", "body": "nope" }),
        &other_token,
    )
    .await;
    expect_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS").await;

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Edited", "body": "by the author" }),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get(app, &uri).await).await;
    let snapshots = fetched["data"]["snapshots"].as_array().unwrap();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots.iter().all(|s| s["title"] != "Hijacked"));
}

#[tokio::test]
async fn update_permission_states() {
    let app = common::build_test_app();
    let (author_id, token) = signup_and_login(&app, "author").await;
    let created = create_article(&app, &token, "t", "b").await;
    let uri = format!("/api/v1/articles/{}", created["id"].as_str().unwrap());
    let body = json!({ "title": "t2", "body": "b2" });

    let response = put_json(app.clone(), &uri, body.clone()).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_REQUIRED").await;

    let response = put_json_auth(app.clone(), &uri, body.clone(), "not-a-jwt").await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_INVALID").await;

    let response =
        send_with_authorization(app.clone(), Method::PUT, &uri, &token, body.clone()).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_INVALID").await;

    let response = put_json_auth(app.clone(), &uri, body.clone(), &expired_token(author_id)).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_EXPIRED").await;

    // None of the rejected attempts left a trace.
    let fetched = body_json(get(app, &uri).await).await;
    assert_eq!(fetched["data"]["snapshots"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_missing_article_returns_404() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "alice").await;
    let id = agora_core::types::new_id();

    let response = put_json_auth(
        app,
        &format!("/api/v1/articles/{id}"),
        json!({ "title": "t", "body": "b" }),
        &token,
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "ARTICLE_NOT_FOUND").await;
}

#[tokio::test]
async fn snapshot_history_is_author_only() {
    let app = common::build_test_app();
    let (_, author_token) = signup_and_login(&app, "author").await;
    let (_, other_token) = signup_and_login(&app, "reader").await;
    let created = create_article(&app, &author_token, "t", "b").await;
    let uri = format!(
        "/api/v1/articles/{}/snapshots",
        created["id"].as_str().unwrap()
    );

    let response = get(app.clone(), &uri).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_REQUIRED").await;

    let response = get_auth(app, &uri, &other_token).await;
    expect_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS").await;
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_article_and_its_comments() {
    let app = common::build_test_app();
    let (_, author_token) = signup_and_login(&app, "author").await;
    let (_, commenter_token) = signup_and_login(&app, "commenter").await;
    let created = create_article(&app, &author_token, "t", "b").await;
    let article_id = created["id"].as_str().unwrap();
    let comment_id = create_comment(&app, &commenter_token, article_id, "nice").await;
    let uri = format!("/api/v1/articles/{article_id}");

    let response = delete_auth(app.clone(), &uri, &author_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &uri).await;
    expect_error(response, StatusCode::NOT_FOUND, "ARTICLE_NOT_FOUND").await;

    // The orphaned comment went with it.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/comments/{comment_id}"),
        json!({ "body": "still here?" }),
        &commenter_token,
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "COMMENT_NOT_FOUND").await;

    let response = delete_auth(app, &uri, &author_token).await;
    expect_error(response, StatusCode::NOT_FOUND, "ARTICLE_NOT_FOUND").await;
}

#[tokio::test]
async fn delete_permission_states() {
    let app = common::build_test_app();
    let (_, author_token) = signup_and_login(&app, "author").await;
    let (_, other_token) = signup_and_login(&app, "other").await;
    let created = create_article(&app, &author_token, "t", "b").await;
    let uri = format!("/api/v1/articles/{}", created["id"].as_str().unwrap());

    let response = delete(app.clone(), &uri).await;
    expect_error(response, StatusCode::UNAUTHORIZED, "PERMISSION_REQUIRED").await;

    let response = delete_auth(app.clone(), &uri, &other_token).await;
    expect_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS").await;

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_pages_are_bounded_and_stable() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "writer").await;
    for i in 0..7 {
        create_article(&app, &token, &format!("Post {i}"), "body").await;
    }

    let first = body_json(get(app.clone(), "/api/v1/articles?skip=0&limit=3").await).await;
    assert_eq!(first["total"], 7);
    assert_eq!(first["limit"], 3);
    assert_eq!(first["data"].as_array().unwrap().len(), 3);

    let again = body_json(get(app.clone(), "/api/v1/articles?skip=0&limit=3").await).await;
    assert_eq!(first, again);

    let last = body_json(get(app.clone(), "/api/v1/articles?skip=6&limit=3").await).await;
    assert_eq!(last["data"].as_array().unwrap().len(), 1);

    let mut seen = Vec::new();
    for skip in [0, 3, 6] {
        let uri = format!("/api/v1/articles?skip={skip}&limit=3");
        let page = body_json(get(app.clone(), &uri).await).await;
        for item in page["data"].as_array().unwrap() {
            seen.push(item["id"].as_str().unwrap().to_string());
        }
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[tokio::test]
async fn search_defaults_to_latest_first() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "writer").await;
    create_article(&app, &token, "older", "b").await;
    create_article(&app, &token, "newer", "b").await;

    let latest = body_json(get(app.clone(), "/api/v1/articles").await).await;
    assert_eq!(latest["data"][0]["title"], "newer");
    assert_eq!(latest["skip"], 0);
    assert_eq!(latest["limit"], 20);

    let oldest = body_json(get(app, "/api/v1/articles?sort=oldest").await).await;
    assert_eq!(oldest["data"][0]["title"], "older");
}

#[tokio::test]
async fn search_matches_current_snapshot_only() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "writer").await;
    let created = create_article(&app, &token, "Draft about cats", "b").await;
    let uri = format!("/api/v1/articles/{}", created["id"].as_str().unwrap());
    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Final about dogs", "body": "b" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cats = body_json(get(app.clone(), "/api/v1/articles?search=CATS").await).await;
    assert_eq!(cats["total"], 0);

    let dogs = body_json(get(app, "/api/v1/articles?search=dogs").await).await;
    assert_eq!(dogs["total"], 1);
    assert_eq!(dogs["data"][0]["title"], "Final about dogs");
}

#[tokio::test]
async fn search_filters_by_author() {
    let app = common::build_test_app();
    let (alice_id, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;
    create_article(&app, &alice, "a", "b").await;
    create_article(&app, &bob, "b", "b").await;

    let page = body_json(get(app, &format!("/api/v1/articles?author_id={alice_id}")).await).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["author_id"], alice_id.to_string());
}

#[tokio::test]
async fn search_with_skip_beyond_results_is_empty() {
    let app = common::build_test_app();
    let (_, token) = signup_and_login(&app, "writer").await;
    create_article(&app, &token, "only", "b").await;

    let page = body_json(get(app, "/api/v1/articles?skip=5").await).await;
    assert_eq!(page["total"], 1);
    assert!(page["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_sort_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/articles?sort=random").await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
    let app = common::build_test_app();
    let page = body_json(get(app, "/api/v1/articles?limit=5000").await).await;
    assert_eq!(page["limit"], 100);
}
