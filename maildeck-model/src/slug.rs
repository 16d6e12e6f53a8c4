use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Characters a slug may contain. Anything outside this set is rejected so
/// a slug can never escape the managed artifact directory.
static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("slug pattern compiles"));

/// Validated identifier for one artifact.
///
/// Every filesystem path for an artifact (the rendered HTML and its sidecar
/// record) is derived from its slug, so [`ArtifactSlug::parse`] is the single
/// choke point where path-safe characters are enforced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactSlug(String);

impl ArtifactSlug {
    /// Validate `input` as a slug. Rejection has no side effects; callers
    /// surface it as a client error.
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        if input.is_empty() || !SLUG_PATTERN.is_match(input) {
            return Err(ModelError::InvalidSlug(input.to_string()));
        }
        Ok(ArtifactSlug(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArtifactSlug {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ArtifactSlug::parse(&value)
    }
}

impl From<ArtifactSlug> for String {
    fn from(slug: ArtifactSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for ArtifactSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
