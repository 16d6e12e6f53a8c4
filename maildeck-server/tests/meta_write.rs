//! The flag-gated metadata write endpoint.

use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{TestApp, TestOptions, build_test_app, write_artifact};

fn with_tools() -> TestApp {
    build_test_app(TestOptions {
        local_meta_tools: true,
        ..TestOptions::default()
    })
}

fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn write_is_forbidden_when_tools_are_disabled() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "welcome");

    let response = app
        .server
        .post("/api/meta/write")
        .json(&json!({"slug": "welcome", "meta": {"status": "approved"}}))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert!(!app.dir.path().join("welcome.meta.json").exists());
}

#[tokio::test]
async fn invalid_slug_is_rejected_before_any_io() {
    let app = with_tools();
    let response = app
        .server
        .post("/api/meta/write")
        .json(&json!({"slug": "../escape", "meta": {}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn write_for_a_missing_artifact_is_not_found() {
    let app = with_tools();
    let response = app
        .server
        .post("/api/meta/write")
        .json(&json!({"slug": "ghost", "meta": {}}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(!app.dir.path().join("ghost.meta.json").exists());
}

#[tokio::test]
async fn write_echoes_the_normalized_record() {
    let app = with_tools();
    write_artifact(&app, "welcome");

    let response = app
        .server
        .post("/api/meta/write")
        .json(&json!({
            "slug": "welcome",
            "meta": {"status": "approved", "can_show_client": true}
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["slug"], "welcome");
    assert_eq!(body["meta_path"], "/emails/welcome.meta.json");
    assert_eq!(body["meta"]["title"], "welcome");
    assert_eq!(body["meta"]["project"], "unassigned");
    assert_eq!(body["meta"]["status"], "approved");
    assert_eq!(body["meta"]["can_show_client"], true);
    assert_eq!(body["meta"]["created_at"], today());
}

#[tokio::test]
async fn sidecar_lands_pretty_printed_with_trailing_newline() {
    let app = with_tools();
    write_artifact(&app, "promo");

    app.server
        .post("/api/meta/write")
        .json(&json!({"slug": "promo", "meta": {"title": "Promo"}}))
        .await
        .assert_status_ok();

    let contents =
        std::fs::read_to_string(app.dir.path().join("promo.meta.json")).unwrap();
    assert!(contents.starts_with("{\n  \"title\": \"Promo\""));
    assert!(contents.ends_with("}\n"));
}

#[tokio::test]
async fn write_then_list_round_trips_the_record() {
    let app = with_tools();
    write_artifact(&app, "welcome");

    app.server
        .post("/api/meta/write")
        .json(&json!({
            "slug": "welcome",
            "meta": {
                "title": "  Welcome  ",
                "project": "acme",
                "status": "approved",
                "can_show_client": true,
                "created_at": "2026-02-01"
            }
        }))
        .await
        .assert_status_ok();

    let body: Value = app.server.get("/api/catalog").await.json();
    let item = &body["items"][0];
    assert_eq!(item["title"], "Welcome");
    assert_eq!(item["project"], "acme");
    assert_eq!(item["status"], "approved");
    assert_eq!(item["can_show_client"], true);
    assert_eq!(item["created_at"], "2026-02-01");
    assert_eq!(item["managed"], true);
}

#[tokio::test]
async fn rewrite_replaces_the_whole_record() {
    let app = with_tools();
    write_artifact(&app, "welcome");

    app.server
        .post("/api/meta/write")
        .json(&json!({"slug": "welcome", "meta": {"title": "First", "project": "acme"}}))
        .await
        .assert_status_ok();

    // A second write without the title falls back to the slug; no merge.
    app.server
        .post("/api/meta/write")
        .json(&json!({"slug": "welcome", "meta": {"project": "acme"}}))
        .await
        .assert_status_ok();

    let body: Value = app.server.get("/api/catalog").await.json();
    assert_eq!(body["items"][0]["title"], "welcome");
    assert_eq!(body["items"][0]["project"], "acme");
}
