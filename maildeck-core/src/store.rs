use std::path::{Path, PathBuf};

use maildeck_model::{ArtifactMetadata, ArtifactSlug, RawMetadata};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// Result of looking up a sidecar record.
///
/// Absence and malformed content are ordinary states, not failures: a
/// corrupt sidecar must never take down a catalog listing. The two are kept
/// distinct so callers can log the recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredMeta {
    Present(ArtifactMetadata),
    Absent,
    /// A sidecar file exists but does not parse; treated as absent.
    Malformed,
}

impl StoredMeta {
    pub fn into_option(self) -> Option<ArtifactMetadata> {
        match self {
            StoredMeta::Present(meta) => Some(meta),
            StoredMeta::Absent | StoredMeta::Malformed => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, StoredMeta::Present(_))
    }
}

/// Reads and writes one JSON sidecar record per artifact slug.
///
/// All paths are derived from validated slugs joined onto a fixed root with
/// fixed suffixes, so the store never touches anything outside its root
/// directory. Writes fully replace the prior record; there is no
/// partial-field merge.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: PathBuf,
    local_tools_enabled: bool,
}

impl MetadataStore {
    pub fn new(root: impl Into<PathBuf>, local_tools_enabled: bool) -> Self {
        MetadataStore {
            root: root.into(),
            local_tools_enabled,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn local_tools_enabled(&self) -> bool {
        self.local_tools_enabled
    }

    /// On-disk path of the rendered artifact for `slug`.
    pub fn artifact_path(&self, slug: &ArtifactSlug) -> PathBuf {
        self.root.join(format!("{slug}.html"))
    }

    /// On-disk path of the sidecar record for `slug`.
    pub fn meta_path(&self, slug: &ArtifactSlug) -> PathBuf {
        self.root.join(format!("{slug}.meta.json"))
    }

    pub async fn artifact_exists(&self, slug: &ArtifactSlug) -> bool {
        fs::try_exists(self.artifact_path(slug)).await.unwrap_or(false)
    }

    /// Look up the record for `slug`. Missing files and unparsable JSON both
    /// come back as non-error states; stored records are re-normalized on
    /// the way in, so stale or partial sidecars still yield a complete
    /// record.
    pub async fn read(&self, slug: &ArtifactSlug) -> StoredMeta {
        let path = self.meta_path(slug);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(_) => return StoredMeta::Absent,
        };
        match serde_json::from_str::<RawMetadata>(&contents) {
            Ok(raw) => StoredMeta::Present(ArtifactMetadata::normalize(slug, &raw)),
            Err(err) => {
                warn!(slug = %slug, error = %err, "unreadable metadata sidecar, treating as absent");
                StoredMeta::Malformed
            }
        }
    }

    /// Normalize `raw` and persist it, fully replacing any prior record.
    ///
    /// Requires the local-tools flag (independent of read-side access
    /// control) and an existing artifact file; a record is never created
    /// for a nonexistent artifact. The sidecar is written pretty-printed
    /// with a trailing newline. Either the full normalized record lands or
    /// nothing does.
    pub async fn write(
        &self,
        slug: &ArtifactSlug,
        raw: &RawMetadata,
    ) -> Result<ArtifactMetadata> {
        if !self.local_tools_enabled {
            return Err(CoreError::Forbidden(
                "local meta tools are disabled".to_string(),
            ));
        }
        if !self.artifact_exists(slug).await {
            return Err(CoreError::NotFound(format!(
                "no artifact for slug '{slug}'"
            )));
        }

        let meta = ArtifactMetadata::normalize(slug, raw);
        let mut payload = serde_json::to_string_pretty(&meta)?;
        payload.push('\n');
        fs::write(self.meta_path(slug), payload).await?;
        debug!(slug = %slug, "metadata sidecar written");
        Ok(meta)
    }
}
