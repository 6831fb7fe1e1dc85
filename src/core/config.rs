//! Job configuration file management.
//!
//! Handles reading and validating `.vaultbind.toml`:
//!
//! ```toml
//! credentials = "credentials.toml"
//!
//! [client]
//! timeout = 30
//! verify_tls = true
//!
//! [[binding]]
//! kind = "vault-token"
//! credential_id = "vault-static-1"
//! address = "https://vault.example:8200"
//! namespace = "team-a"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::client::VaultrsFactory;
use crate::core::constants;
use crate::core::credential::MemoryStore;
use crate::core::job::Job;
use crate::core::registry::Registry;
use crate::error::{ConfigError, Result};

/// Job configuration stored in `.vaultbind.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Credentials file, relative to the config file's directory
    #[serde(default)]
    pub credentials: Option<PathBuf>,
    /// Vault client settings shared by every binding
    #[serde(default)]
    pub client: ClientConfig,
    /// Binding tables, each with a `kind` key
    #[serde(default)]
    pub binding: Vec<toml::Table>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Vault client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Verify the server's TLS certificate
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

fn default_verify_tls() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            verify_tls: default_verify_tls(),
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Parse configuration text; relative paths resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed and
    /// `ConfigError::InvalidEntry` for invalid client settings.
    pub fn parse(contents: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::parse(&contents, base_dir)?;

        debug!(bindings = config.binding.len(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.client.timeout == Some(0) {
            return Err(ConfigError::InvalidEntry {
                kind: "client".to_string(),
                reason: "timeout must be at least 1 second".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Credentials file path, resolved against the config directory.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.credentials.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Build the job's bindings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown kinds or invalid binding entries.
    pub fn job(&self, registry: &Registry) -> Result<Job> {
        Job::from_tables(&self.binding, registry)
    }

    /// Load the credential store; empty when no credentials file is set.
    ///
    /// # Errors
    ///
    /// Returns errors from [`MemoryStore::load`].
    pub fn store(&self, registry: &Registry) -> Result<MemoryStore> {
        match self.credentials_path() {
            Some(path) => MemoryStore::load(&path, registry),
            None => Ok(MemoryStore::new()),
        }
    }

    /// Vault client factory configured from `[client]`.
    pub fn client_factory(&self) -> VaultrsFactory {
        VaultrsFactory::new()
            .with_timeout(self.client.timeout.map(Duration::from_secs))
            .with_tls_verification(self.client.verify_tls)
    }
}
