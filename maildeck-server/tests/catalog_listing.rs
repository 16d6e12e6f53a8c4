//! Catalog listing surfaces: access gating, filters, and the JSON API.

use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{TestApp, TestOptions, build_test_app, write_artifact, write_sidecar};

fn gated() -> TestApp {
    build_test_app(TestOptions {
        preview_key: Some("s3cret".to_string()),
        ..TestOptions::default()
    })
}

#[tokio::test]
async fn open_mode_serves_the_listing_without_a_key() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "welcome");

    let response = app.server.get("/preview").await;
    response.assert_status_ok();
    assert!(response.text().contains("welcome"));
}

#[tokio::test]
async fn mismatched_key_redirects_to_the_landing_page() {
    let app = gated();
    write_artifact(&app, "welcome");

    for path in ["/preview", "/preview?key=wrong"] {
        let response = app.server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");
        // The catalog is never rendered for a denied caller.
        assert!(!response.text().contains("welcome"));
    }
}

#[tokio::test]
async fn matching_key_serves_the_listing() {
    let app = gated();
    write_artifact(&app, "welcome");

    let response = app.server.get("/preview?key=s3cret").await;
    response.assert_status_ok();
    assert!(response.text().contains("welcome"));
}

#[tokio::test]
async fn api_catalog_denial_is_a_plain_forbidden() {
    let app = gated();
    let response = app.server.get("/api/catalog?key=wrong").await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn artifact_without_record_is_listed_as_unmanaged() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "welcome");

    let body: Value = app.server.get("/api/catalog").await.json();
    assert_eq!(body["total"], 1);
    let item = &body["items"][0];
    assert_eq!(item["slug"], "welcome");
    assert_eq!(item["status"], "draft");
    assert_eq!(item["can_show_client"], false);
    assert_eq!(item["managed"], false);
    assert_eq!(item["asset_path"], "/emails/welcome.html");
}

#[tokio::test]
async fn corrupt_sidecar_recovers_as_unmanaged() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "welcome");
    write_sidecar(&app, "welcome", "{broken");

    let body: Value = app.server.get("/api/catalog").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["managed"], false);
}

#[tokio::test]
async fn status_all_hides_sent_items() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "kept");
    write_artifact(&app, "archived");
    write_sidecar(&app, "kept", &json!({"status": "approved"}).to_string());
    write_sidecar(&app, "archived", &json!({"status": "sent"}).to_string());

    let body: Value = app.server.get("/api/catalog").await.json();
    let slugs: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["kept"]);

    let body: Value = app.server.get("/api/catalog?status=sent").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["slug"], "archived");
}

#[tokio::test]
async fn client_only_excludes_hidden_and_unmanaged_items() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "shared");
    write_artifact(&app, "internal-only");
    write_artifact(&app, "orphan");
    write_sidecar(
        &app,
        "shared",
        &json!({"status": "approved", "can_show_client": true}).to_string(),
    );
    write_sidecar(&app, "internal-only", &json!({"status": "approved"}).to_string());

    let body: Value = app.server.get("/api/catalog?client=1").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["slug"], "shared");

    // client=0 switches the filter off again.
    let body: Value = app.server.get("/api/catalog?client=0").await.json();
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn project_filter_and_search_narrow_the_listing() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "spring-promo");
    write_artifact(&app, "autumn-promo");
    write_sidecar(
        &app,
        "spring-promo",
        &json!({"project": "acme", "title": "Spring launch"}).to_string(),
    );
    write_sidecar(&app, "autumn-promo", &json!({"project": "beta"}).to_string());

    let body: Value = app.server.get("/api/catalog?project=acme").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["slug"], "spring-promo");

    let body: Value = app.server.get("/api/catalog?q=LAUNCH").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["slug"], "spring-promo");
}

#[tokio::test]
async fn unknown_status_value_is_a_bad_request() {
    let app = build_test_app(TestOptions::default());
    let response = app.server.get("/api/catalog?status=shipped").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_sort_value_is_a_bad_request() {
    let app = build_test_app(TestOptions::default());
    let response = app.server.get("/api/catalog?sort=newest").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn share_links_require_base_url_and_client_visibility() {
    let app = build_test_app(TestOptions {
        base_url: Some("https://previews.example.com".to_string()),
        ..TestOptions::default()
    });
    write_artifact(&app, "shared");
    write_artifact(&app, "hidden");
    write_sidecar(
        &app,
        "shared",
        &json!({"can_show_client": true}).to_string(),
    );
    write_sidecar(&app, "hidden", &json!({"can_show_client": false}).to_string());

    let body: Value = app.server.get("/api/catalog").await.json();
    let items = body["items"].as_array().unwrap();
    let shared = items.iter().find(|i| i["slug"] == "shared").unwrap();
    let hidden = items.iter().find(|i| i["slug"] == "hidden").unwrap();
    assert_eq!(shared["share_url"], "https://previews.example.com/p/shared");
    assert!(hidden.get("share_url").is_none());
}

#[tokio::test]
async fn projects_endpoint_lists_distinct_names() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "a");
    write_artifact(&app, "b");
    write_artifact(&app, "c");
    write_sidecar(&app, "a", &json!({"project": "acme"}).to_string());
    write_sidecar(&app, "b", &json!({"project": "acme"}).to_string());

    let body: Value = app.server.get("/api/projects").await.json();
    assert_eq!(body["projects"], json!(["acme"]));
}

#[tokio::test]
async fn created_sort_orders_newest_first() {
    let app = build_test_app(TestOptions::default());
    write_artifact(&app, "old");
    write_artifact(&app, "new");
    write_sidecar(&app, "old", &json!({"created_at": "2026-01-01"}).to_string());
    write_sidecar(&app, "new", &json!({"created_at": "2026-06-01"}).to_string());

    let body: Value = app
        .server
        .get("/api/catalog?sort=created_desc")
        .await
        .json();
    let slugs: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["new", "old"]);
}
