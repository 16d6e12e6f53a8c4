use maildeck_model::{ArtifactItem, ArtifactSlug, Catalog};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::MetadataStore;

/// Scans the managed directory and joins each artifact with its metadata
/// record, producing the full catalog snapshot for one build.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    store: MetadataStore,
}

impl CatalogBuilder {
    pub fn new(store: MetadataStore) -> Self {
        CatalogBuilder { store }
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// List every `*.html` artifact and produce the joined, ordered
    /// snapshot.
    ///
    /// Items whose record is absent or unreadable stay in the catalog as
    /// unmanaged; an artifact is never hidden merely for lacking metadata.
    /// A missing managed directory yields an empty catalog.
    pub async fn build(&self) -> Result<Catalog> {
        let mut dir = match fs::read_dir(self.store.root()).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(root = %self.store.root().display(), "artifact directory missing");
                return Ok(Catalog::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut slugs = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = html_stem(name) else { continue };
            match ArtifactSlug::parse(stem) {
                Ok(slug) => slugs.push(slug),
                Err(_) => {
                    warn!(file = name, "skipping artifact with unusable file name");
                }
            }
        }

        let mut items = Vec::with_capacity(slugs.len());
        for slug in slugs {
            let metadata = self.store.read(&slug).await.into_option();
            items.push(ArtifactItem {
                asset_path: format!("/emails/{slug}.html"),
                slug,
                metadata,
            });
        }
        debug!(items = items.len(), "catalog built");
        Ok(Catalog::from_items(items))
    }
}

/// File stem for names ending in `.html`, case-insensitively.
fn html_stem(name: &str) -> Option<&str> {
    let tail = name.len().checked_sub(5)?;
    if tail > 0 && name[tail..].eq_ignore_ascii_case(".html") {
        Some(&name[..tail])
    } else {
        None
    }
}
