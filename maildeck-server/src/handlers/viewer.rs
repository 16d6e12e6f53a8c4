use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};
use maildeck_model::{ArtifactSlug, RouteClass, view};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;
use crate::pages;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerParams {
    pub key: Option<String>,
    pub view: Option<String>,
}

/// Internal viewer route.
///
/// Without a valid key (when a secret is configured) the request falls
/// through to the public route for the same slug: same underlying resource,
/// public access posture. Remaining query parameters are preserved and the
/// key is dropped.
pub async fn internal_viewer_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ViewerParams>,
    uri: Uri,
) -> AppResult<Response> {
    let slug = ArtifactSlug::parse(&slug)?;
    if !state.guard.authorize(params.key.as_deref()).is_allowed() {
        let rest = uri
            .query()
            .map(view::strip_key_param)
            .unwrap_or_default();
        let target = if rest.is_empty() {
            format!("/p/{slug}")
        } else {
            format!("/p/{slug}?{rest}")
        };
        return Ok(Redirect::to(&target).into_response());
    }
    render(&state, &slug, params.view.as_deref(), RouteClass::Internal).await
}

/// Public viewer route: no key required, intended for direct client
/// sharing.
pub async fn public_viewer_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ViewerParams>,
) -> AppResult<Response> {
    let slug = ArtifactSlug::parse(&slug)?;
    render(&state, &slug, params.view.as_deref(), RouteClass::Public).await
}

async fn render(
    state: &AppState,
    slug: &ArtifactSlug,
    view_param: Option<&str>,
    route: RouteClass,
) -> AppResult<Response> {
    if !state.store.artifact_exists(slug).await {
        return Err(AppError::not_found(format!("no artifact for slug '{slug}'")));
    }
    // The server resolves without viewport knowledge; the page script applies
    // the breakpoint coercion and rewrites the URL to the resolved mode.
    let mode = view::resolve_mode(view_param, route, false);
    let meta = state.store.read(slug).await.into_option();
    Ok(Html(pages::viewer(slug, mode, route, meta.as_ref())).into_response())
}
