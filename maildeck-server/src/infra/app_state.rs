use std::{fmt, sync::Arc};

use maildeck_core::{AccessGuard, CatalogBuilder, MetadataStore};

use crate::infra::config::Config;

/// Shared per-request state: the immutable configuration plus the catalog
/// engine components wired from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MetadataStore,
    pub catalog: CatalogBuilder,
    pub guard: AccessGuard,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let store =
            MetadataStore::new(&config.artifacts_dir, config.local_meta_tools);
        let catalog = CatalogBuilder::new(store.clone());
        let guard = AccessGuard::new(config.preview_key.clone());
        AppState {
            config: Arc::new(config),
            store,
            catalog,
            guard,
        }
    }

    /// Absolute share link for a server-relative path, when a base URL is
    /// configured.
    pub fn share_url(&self, path: &str) -> Option<String> {
        self.config
            .base_url
            .as_ref()
            .and_then(|base| base.join(path).ok())
            .map(|url| url.to_string())
    }
}
