use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{catalog, landing, meta, viewer};
use crate::infra::app_state::AppState;

/// Assemble the full router.
///
/// `/preview` and `/api/*` sit behind the access guard (checked in the
/// handlers, since a denial on the HTML surface is a redirect rather than an
/// error). `/p/{slug}` and `/emails/*` are the public share surfaces.
pub fn create_router(state: AppState) -> Router {
    let artifacts = ServeDir::new(state.config.artifacts_dir.clone());

    Router::new()
        // Public surfaces
        .route("/", get(landing::landing_handler))
        .route("/healthz", get(landing::healthz_handler))
        .route("/p/{slug}", get(viewer::public_viewer_handler))
        // Internal catalog
        .route("/preview", get(catalog::preview_index_handler))
        .route("/preview/{slug}", get(viewer::internal_viewer_handler))
        // Programmatic surfaces
        .route("/api/catalog", get(catalog::api_catalog_handler))
        .route("/api/projects", get(catalog::api_projects_handler))
        .route("/api/meta/write", post(meta::meta_write_handler))
        // Managed artifact directory (HTML + sidecars)
        .nest_service("/emails", artifacts)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
