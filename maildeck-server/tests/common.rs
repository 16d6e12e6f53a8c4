//! Shared fixtures for the HTTP-level tests.
#![allow(dead_code)]

use axum_test::TestServer;
use maildeck_server::{AppState, Config, routes};
use tempfile::TempDir;

pub struct TestApp {
    pub server: TestServer,
    pub dir: TempDir,
}

#[derive(Debug, Default)]
pub struct TestOptions {
    pub preview_key: Option<String>,
    pub local_meta_tools: bool,
    pub base_url: Option<String>,
}

/// Build an app over a fresh temp artifact directory. The config is
/// assembled directly rather than via `Config::from_env` so tests do not
/// race on process environment.
pub fn build_test_app(options: TestOptions) -> TestApp {
    let dir = TempDir::new().expect("create temp artifact directory");
    let config = Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        artifacts_dir: dir.path().to_path_buf(),
        preview_key: options.preview_key,
        local_meta_tools: options.local_meta_tools,
        base_url: options
            .base_url
            .map(|raw| url::Url::parse(&raw).expect("valid test base url")),
    };
    let state = AppState::from_config(config);
    let server =
        TestServer::new(routes::create_router(state)).expect("start test server");
    TestApp { server, dir }
}

/// Drop a rendered artifact into the managed directory.
pub fn write_artifact(app: &TestApp, slug: &str) {
    std::fs::write(
        app.dir.path().join(format!("{slug}.html")),
        "<html><body>preview</body></html>",
    )
    .expect("write artifact file");
}

/// Drop a sidecar record next to an artifact, bypassing the write endpoint.
pub fn write_sidecar(app: &TestApp, slug: &str, contents: &str) {
    std::fs::write(app.dir.path().join(format!("{slug}.meta.json")), contents)
        .expect("write sidecar file");
}
