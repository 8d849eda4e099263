//! Shared testing utilities for dataconf integration tests.

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONTAINER: &str = "configs";

pub const DEV_ACCOUNT: &str = "devstoreaccount1";
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

pub const VALID_CONFIG: &str = r#"version: 1.0.0
header: true
file_format: csv
columns:
  - name: Col1
    dtype: int
  - name: Col2
    dtype: str
  - name: Col3
    dtype: float
"#;

/// Mock blob endpoint plus a scratch directory.
#[allow(dead_code)]
pub struct TestContext {
    server: ServerGuard,
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let server = Server::new();
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { server, root }
    }

    pub fn connection_string(&self) -> String {
        format!("BlobEndpoint={};SharedAccessSignature=sv=2021&sig=test", self.server.url())
    }

    /// Development-storage style string that signs requests with an account key.
    pub fn shared_key_connection_string(&self) -> String {
        format!(
            "DefaultEndpointsProtocol=http;AccountName={};AccountKey={};BlobEndpoint={}/{};",
            DEV_ACCOUNT,
            DEV_ACCOUNT_KEY,
            self.server.url(),
            DEV_ACCOUNT
        )
    }

    /// Mock for an object reached through the shared-key endpoint; requires a signed request.
    pub fn mock_signed_object(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, format!("/{}/{}/{}", DEV_ACCOUNT, CONTAINER, path).as_str())
            .match_header(
                "authorization",
                Matcher::Regex(format!("^SharedKey {}:[A-Za-z0-9+/]+=*$", DEV_ACCOUNT)),
            )
            .with_status(status)
            .with_body(body)
            .create()
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn local(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Register a mock for `method` on an object path inside the test container.
    pub fn mock_object(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, format!("/{}/{}", CONTAINER, path).as_str())
            .match_query(Matcher::UrlEncoded("sig".into(), "test".into()))
            .with_status(status)
            .with_body(body)
            .create()
    }

    /// Build a command for invoking the compiled `dataconf` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("dataconf").expect("Failed to locate dataconf binary");
        cmd.current_dir(self.work_dir())
            .env("DATACONF_CONNECTION_STRING", self.connection_string())
            .env_remove("RUST_LOG");
        cmd
    }
}
