//! Test support utilities for vaultbind integration tests.
//!
//! Provides an isolated job directory, CLI helpers, and in-process fakes
//! for the credential store's collaborators.

#![allow(dead_code)]

pub mod assertions;
pub mod fakes;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated job directory.
///
/// Child processes run with `.current_dir()` set to the job directory, so
/// tests can run in parallel.
pub struct Test {
    /// Temporary directory holding `.vaultbind.toml` and credentials
    pub dir: TempDir,
}

impl Test {
    /// Create an empty job directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a job directory with a config and credentials file.
    pub fn with_files(config: &str, credentials: &str) -> Self {
        let t = Self::new();
        t.write("credentials.toml", credentials);
        t.write(
            ".vaultbind.toml",
            &format!("credentials = \"credentials.toml\"\n{}", config),
        );
        t
    }

    /// Write a file inside the job directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// A vaultbind command running in the job directory.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vaultbind").expect("failed to find vaultbind binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("VAULTBIND_LOG");
        cmd.env_remove("VAULTBIND_CONFIG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Run `vaultbind <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> std::process::Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run vaultbind")
    }
}

/// A vault-token binding on an address nothing listens on.
pub const UNREACHABLE_VAULT: &str = r#"
[client]
timeout = 5

[[binding]]
kind = "vault-token"
credential_id = "vault-static-1"
address = "http://127.0.0.1:1"
"#;

/// Credentials file with one static token and one secret text.
pub const CREDENTIALS: &str = r#"
[[credential]]
id = "vault-static-1"
kind = "token"
token = "s.abc123"

[[credential]]
id = "db-password"
kind = "secret-text"
secret = "hunter2"
"#;

/// A secret-text binding, which binds without any network I/O.
pub const SECRET_TEXT_BINDING: &str = r#"
[[binding]]
kind = "secret-text"
variable = "DB_PASSWORD"
credential_id = "db-password"
"#;
