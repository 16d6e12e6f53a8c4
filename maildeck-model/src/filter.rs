use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::metadata::ArtifactStatus;

/// Status facet of a listing request.
///
/// `All` means "all non-archived": `sent` artifacts are excluded unless a
/// caller asks for them explicitly. The rule is applied uniformly, whatever
/// other filters or search text are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Draft,
    Approved,
    Sent,
}

impl StatusFilter {
    pub fn all_variants() -> &'static [StatusFilter] {
        use StatusFilter::*;
        &[All, Draft, Approved, Sent]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Draft => "draft",
            StatusFilter::Approved => "approved",
            StatusFilter::Sent => "sent",
        }
    }

    /// Parse a query-parameter value. `None` input means no facet was
    /// requested and maps to `All`; an unknown value is a validation error.
    pub fn parse(value: Option<&str>) -> Result<StatusFilter, ModelError> {
        match value {
            None => Ok(StatusFilter::All),
            Some("all") => Ok(StatusFilter::All),
            Some("draft") => Ok(StatusFilter::Draft),
            Some("approved") => Ok(StatusFilter::Approved),
            Some("sent") => Ok(StatusFilter::Sent),
            Some(other) => Err(ModelError::InvalidStatus(other.to_string())),
        }
    }

    /// Whether an item with `status` passes this facet.
    pub fn matches(&self, status: ArtifactStatus) -> bool {
        match self {
            // Archived items need an explicit request.
            StatusFilter::All => status != ArtifactStatus::Sent,
            StatusFilter::Draft => status == ArtifactStatus::Draft,
            StatusFilter::Approved => status == ArtifactStatus::Approved,
            StatusFilter::Sent => status == ArtifactStatus::Sent,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project facet: everything, or exactly one project name. The unassigned
/// sentinel counts as a name and can be requested like any other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Named(String),
}

impl ProjectFilter {
    pub fn parse(value: Option<&str>) -> ProjectFilter {
        match value.map(str::trim) {
            None | Some("") | Some("all") => ProjectFilter::All,
            Some(name) => ProjectFilter::Named(name.to_string()),
        }
    }

    pub fn matches(&self, project: &str) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Named(name) => name == project,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectFilter::All => "all",
            ProjectFilter::Named(name) => name,
        }
    }
}

/// Complete predicate set for one listing request. Request-scoped only,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub client_only: bool,
    pub project: ProjectFilter,
    pub search_text: String,
}

/// Explicit orderings a caller may request on top of the catalog default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    SlugAsc,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        use SortKey::*;
        &[CreatedDesc, CreatedAsc, TitleAsc, SlugAsc]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "created_desc",
            SortKey::CreatedAsc => "created_asc",
            SortKey::TitleAsc => "title_asc",
            SortKey::SlugAsc => "slug_asc",
        }
    }

    /// Parse a query-parameter value. `None` means no explicit sort was
    /// requested and the catalog's default ordering stands.
    pub fn parse(value: Option<&str>) -> Result<Option<SortKey>, ModelError> {
        match value {
            None | Some("") => Ok(None),
            Some("created_desc") => Ok(Some(SortKey::CreatedDesc)),
            Some("created_asc") => Ok(Some(SortKey::CreatedAsc)),
            Some("title_asc") => Ok(Some(SortKey::TitleAsc)),
            Some("slug_asc") => Ok(Some(SortKey::SlugAsc)),
            Some(other) => Err(ModelError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
