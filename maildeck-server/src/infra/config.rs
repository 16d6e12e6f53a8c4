use anyhow::Context;
use std::{env, path::PathBuf};
use url::Url;

/// Server configuration loaded from environment variables (with `.env`
/// support). Constructed once at startup and immutable for the process
/// lifetime; the store and guard receive their settings from here rather
/// than reading the environment at call sites.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    /// Managed artifact directory: `<slug>.html` files plus their
    /// `<slug>.meta.json` sidecars.
    pub artifacts_dir: PathBuf,

    /// Shared secret gating the internal catalog. `None` means open mode.
    pub preview_key: Option<String>,

    /// Enables the metadata write endpoint. Off by default.
    pub local_meta_tools: bool,

    /// Absolute base used to build copyable share links.
    pub base_url: Option<Url>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let base_url = match env::var("MAILDECK_BASE_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim())
                    .context("MAILDECK_BASE_URL is not a valid absolute URL")?,
            ),
            _ => None,
        };

        Ok(Self {
            server_host: env::var("MAILDECK_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("MAILDECK_PORT")
                .unwrap_or_else(|_| "3080".to_string())
                .parse()
                .unwrap_or(3080),

            artifacts_dir: env::var("MAILDECK_ARTIFACTS_DIR")
                .unwrap_or_else(|_| "./emails".to_string())
                .into(),

            preview_key: env::var("MAILDECK_PREVIEW_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),

            local_meta_tools: env::var("MAILDECK_LOCAL_META_TOOLS")
                .map(|v| v == "1")
                .unwrap_or(false),

            base_url,
        })
    }

    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.artifacts_dir).with_context(|| {
            format!(
                "failed to create artifact directory {}",
                self.artifacts_dir.display()
            )
        })?;
        Ok(())
    }

    /// Canonicalize the artifact directory so downstream services work with
    /// an absolute path. Called once during startup immediately after
    /// `ensure_directories`.
    pub fn normalize_paths(&mut self) -> anyhow::Result<()> {
        self.artifacts_dir = std::fs::canonicalize(&self.artifacts_dir)?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            server_host: "127.0.0.1".into(),
            server_port: 4000,
            artifacts_dir: "./emails".into(),
            preview_key: None,
            local_meta_tools: false,
            base_url: None,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }
}
