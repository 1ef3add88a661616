#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

#[allow(dead_code)]
/// An empty config file so the user's own config never leaks into tests.
fn config_file() -> &'static Path {
    static CONFIG: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, file) = CONFIG.get_or_init(|| {
        let dir = tempfile::tempdir().expect("failed to create config dir for tests");
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "").expect("failed to write config");
        (dir, file)
    });
    file
}

/// Create a configured `llmsfetch` command suitable for integration tests.
#[allow(dead_code)]
pub fn llmsfetch_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("llmsfetch"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("LLMSFETCH_CONFIG", config_file());
    cmd.env_remove("LLMSFETCH_REGISTRY");
    cmd.env_remove("LLMSFETCH_TIMEOUT");
    cmd.env_remove("LLMSFETCH_FALLBACK");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Serve `manifest` as the `latest` registry document for `name`.
#[allow(dead_code)]
pub async fn serve_package(server: &MockServer, name: &str, manifest: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{name}/latest")))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest))
        .mount(server)
        .await;
}

/// Serve a plain-text body at `at`.
#[allow(dead_code)]
pub async fn serve_text(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}
