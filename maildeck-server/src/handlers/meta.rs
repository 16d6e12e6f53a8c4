use axum::{Json, extract::State};
use maildeck_model::{ArtifactMetadata, ArtifactSlug, RawMetadata};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppResult;
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct MetaWriteRequest {
    pub slug: String,
    #[serde(default)]
    pub meta: RawMetadata,
}

#[derive(Debug, Serialize)]
pub struct MetaWriteResponse {
    pub ok: bool,
    pub slug: String,
    /// Serving path of the written sidecar record.
    pub meta_path: String,
    pub meta: ArtifactMetadata,
}

/// Flag-gated metadata write.
///
/// The store enforces the full gate order: local-tools flag, then artifact
/// existence, then normalize-and-overwrite. The response echoes the
/// normalized record and where it landed.
pub async fn meta_write_handler(
    State(state): State<AppState>,
    Json(body): Json<MetaWriteRequest>,
) -> AppResult<Json<MetaWriteResponse>> {
    let slug = ArtifactSlug::parse(&body.slug)?;
    let meta = state.store.write(&slug, &body.meta).await?;
    info!(slug = %slug, status = %meta.status, "metadata record written");

    Ok(Json(MetaWriteResponse {
        ok: true,
        meta_path: format!("/emails/{slug}.meta.json"),
        slug: slug.to_string(),
        meta,
    }))
}
