//! Maildeck server binary: loads configuration, wires the catalog engine,
//! and serves the preview surfaces.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maildeck_server::{AppState, Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "maildeck-server")]
#[command(about = "Gated catalog and preview server for rendered email artifacts")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "MAILDECK_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "MAILDECK_HOST")]
    host: Option<String>,

    /// Managed artifact directory (overrides config)
    #[arg(long, env = "MAILDECK_ARTIFACTS_DIR")]
    artifacts_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maildeck=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server_host = host;
    }
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    if let Some(dir) = cli.artifacts_dir {
        config.artifacts_dir = dir;
    }

    config.ensure_directories()?;
    config.normalize_paths()?;

    info!(
        artifacts_dir = %config.artifacts_dir.display(),
        local_meta_tools = config.local_meta_tools,
        "configuration loaded"
    );

    let state = AppState::from_config(config);
    if state.guard.open_mode() {
        warn!("no preview key configured; internal catalog runs in open mode");
    }

    let addr = state.config.bind_addr();
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("maildeck listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
