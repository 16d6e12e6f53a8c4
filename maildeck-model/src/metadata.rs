use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::slug::ArtifactSlug;

/// Project tag applied to records that do not name one. Items carrying it
/// group after every named project in the default catalog ordering.
pub const UNASSIGNED_PROJECT: &str = "unassigned";

/// Date format used by `created_at` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Review lifecycle of an artifact.
///
/// The derived `Ord` is the catalog precedence: `draft < approved < sent`.
/// `Sent` is the archival terminus and is hidden from `status=all` listings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Draft,
    Approved,
    Sent,
}

impl ArtifactStatus {
    pub fn all() -> &'static [ArtifactStatus] {
        use ArtifactStatus::*;
        &[Draft, Approved, Sent]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactStatus::Draft => "draft",
            ArtifactStatus::Approved => "approved",
            ArtifactStatus::Sent => "sent",
        }
    }

    pub fn parse(value: &str) -> Option<ArtifactStatus> {
        match value {
            "draft" => Some(ArtifactStatus::Draft),
            "approved" => Some(ArtifactStatus::Approved),
            "sent" => Some(ArtifactStatus::Sent),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully-normalized metadata record for one artifact.
///
/// Field order is the persisted key order of the sidecar JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub title: String,
    pub project: String,
    pub status: ArtifactStatus,
    pub can_show_client: bool,
    /// `YYYY-MM-DD`. Kept as entered; an unparsable value sorts as epoch.
    pub created_at: String,
}

/// Loose input accepted by the write endpoint and tolerated in stored
/// sidecars. Every field is optional; [`ArtifactMetadata::normalize`]
/// coerces the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub project: Option<String>,
    pub status: Option<String>,
    pub can_show_client: Option<bool>,
    pub created_at: Option<String>,
}

impl From<&ArtifactMetadata> for RawMetadata {
    fn from(meta: &ArtifactMetadata) -> Self {
        RawMetadata {
            title: Some(meta.title.clone()),
            project: Some(meta.project.clone()),
            status: Some(meta.status.as_str().to_string()),
            can_show_client: Some(meta.can_show_client),
            created_at: Some(meta.created_at.clone()),
        }
    }
}

impl ArtifactMetadata {
    /// Coerce raw input into a fully-populated record.
    ///
    /// Blank strings count as absent. An unknown status falls back to
    /// `draft`, a missing creation date becomes today, and string fields are
    /// trimmed, so the result is always a complete, valid record.
    /// Normalizing an already-normalized record is a no-op.
    pub fn normalize(slug: &ArtifactSlug, raw: &RawMetadata) -> Self {
        let title = non_blank(raw.title.as_deref())
            .unwrap_or(slug.as_str())
            .to_string();
        let project = non_blank(raw.project.as_deref())
            .unwrap_or(UNASSIGNED_PROJECT)
            .to_string();
        let status = raw
            .status
            .as_deref()
            .map(str::trim)
            .and_then(ArtifactStatus::parse)
            .unwrap_or(ArtifactStatus::Draft);
        let can_show_client = raw.can_show_client.unwrap_or(false);
        let created_at = non_blank(raw.created_at.as_deref())
            .map(str::to_string)
            .unwrap_or_else(today);

        ArtifactMetadata {
            title,
            project,
            status,
            can_show_client,
            created_at,
        }
    }

    /// The defaults an artifact without any record is treated as having.
    pub fn defaults_for(slug: &ArtifactSlug) -> Self {
        Self::normalize(slug, &RawMetadata::default())
    }

    /// `created_at` as a calendar date, if it parses.
    pub fn created_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.created_at, DATE_FORMAT).ok()
    }

    pub fn is_unassigned(&self) -> bool {
        self.project == UNASSIGNED_PROJECT
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}
