use axum::{
    Json,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use maildeck_core::query;
use maildeck_model::{
    ArtifactItem, ArtifactStatus, FilterCriteria, ProjectFilter, SortKey,
    StatusFilter,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;
use crate::pages;

/// Query parameters of the catalog listing surfaces.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub key: Option<String>,
    pub status: Option<String>,
    /// `"0"` (or absent) means off; any other value switches client-only on.
    pub client: Option<String>,
    pub project: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl ListingParams {
    pub fn criteria(&self) -> AppResult<FilterCriteria> {
        let status = StatusFilter::parse(self.status.as_deref())?;
        Ok(FilterCriteria {
            status,
            client_only: self.client.as_deref().is_some_and(|v| v != "0"),
            project: ProjectFilter::parse(self.project.as_deref()),
            search_text: self.q.clone().unwrap_or_default(),
        })
    }

    pub fn sort(&self) -> AppResult<Option<SortKey>> {
        Ok(SortKey::parse(self.sort.as_deref())?)
    }
}

/// Internal catalog listing (HTML).
///
/// With a configured secret, a missing or mismatched key redirects to the
/// landing page; the catalog is never rendered and no error body reveals it.
pub async fn preview_index_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Response> {
    if !state.guard.authorize(params.key.as_deref()).is_allowed() {
        return Ok(Redirect::to("/").into_response());
    }

    let criteria = params.criteria()?;
    let sort = params.sort()?;
    let catalog = state.catalog.build().await?;
    let items = query::apply(&catalog, &criteria, sort);
    let projects = catalog.projects();

    Ok(Html(pages::listing(&state, &params, &criteria, &items, &projects))
        .into_response())
}

/// One row of the JSON catalog: effective metadata plus the routes that
/// serve the artifact.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub slug: String,
    pub title: String,
    pub project: String,
    pub status: ArtifactStatus,
    pub can_show_client: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub managed: bool,
    pub asset_path: String,
    pub preview_path: String,
    pub public_path: String,
    /// Absolute client link; present when a base URL is configured and the
    /// item is flagged for client sharing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

impl CatalogEntry {
    fn from_item(state: &AppState, item: &ArtifactItem) -> Self {
        let public_path = format!("/p/{}", item.slug);
        let share_url = if item.client_visible() {
            state.share_url(&public_path)
        } else {
            None
        };
        CatalogEntry {
            title: item.effective_title().to_string(),
            project: item.effective_project().to_string(),
            status: item.effective_status(),
            can_show_client: item.client_visible(),
            created_at: item.created_at().map(str::to_string),
            managed: item.is_managed(),
            asset_path: item.asset_path.clone(),
            preview_path: format!("/preview/{}", item.slug),
            public_path,
            share_url,
            slug: item.slug.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub items: Vec<CatalogEntry>,
}

/// JSON catalog listing, same filters as the HTML surface. A programmatic
/// caller gets a plain `403` on denial instead of a redirect.
pub async fn api_catalog_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<CatalogResponse>> {
    if !state.guard.authorize(params.key.as_deref()).is_allowed() {
        return Err(AppError::forbidden("invalid or missing preview key"));
    }

    let criteria = params.criteria()?;
    let sort = params.sort()?;
    let catalog = state.catalog.build().await?;
    let items = query::apply(&catalog, &criteria, sort);

    let entries: Vec<CatalogEntry> = items
        .iter()
        .map(|item| CatalogEntry::from_item(&state, item))
        .collect();
    Ok(Json(CatalogResponse {
        total: entries.len(),
        items: entries,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<String>,
}

/// Distinct named projects in the catalog, for filter dropdowns.
pub async fn api_projects_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<ProjectsResponse>> {
    if !state.guard.authorize(params.key.as_deref()).is_allowed() {
        return Err(AppError::forbidden("invalid or missing preview key"));
    }
    let catalog = state.catalog.build().await?;
    Ok(Json(ProjectsResponse {
        projects: catalog.projects(),
    }))
}
