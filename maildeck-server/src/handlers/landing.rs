use axum::{Json, response::Html};
use serde_json::{Value, json};

use crate::pages;

/// Public landing page, also the redirect target for denied catalog access.
pub async fn landing_handler() -> Html<String> {
    Html(pages::landing())
}

/// Liveness probe.
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}
