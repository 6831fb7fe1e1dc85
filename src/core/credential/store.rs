//! Credential lookup.
//!
//! Bindings resolve credentials by id through [`CredentialStore`]. The store
//! owns the credentials; a binding borrows one for a single bind call.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{Capability, Credential};
use crate::core::registry::Registry;
use crate::error::{ConfigError, LookupError, Result};

/// Maps credential ids to credentials.
pub trait CredentialStore {
    /// Look up `id` and check that it provides `required`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` for an unknown id and
    /// `LookupError::WrongCapability` for a credential of the wrong type.
    fn lookup(&self, id: &str, required: Capability) -> Result<&dyn Credential>;
}

/// In-memory credential store, optionally loaded from a TOML file.
///
/// ```toml
/// [[credential]]
/// id = "vault-static-1"
/// kind = "token"
/// token = "s.abc123"
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    credentials: BTreeMap<String, Box<dyn Credential>>,
}

#[derive(Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    credential: Vec<toml::Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential under `id`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::DuplicateId` if `id` is already present.
    pub fn insert(&mut self, id: impl Into<String>, credential: Box<dyn Credential>) -> Result<()> {
        let id = id.into();
        if self.credentials.contains_key(&id) {
            return Err(LookupError::DuplicateId(id).into());
        }
        self.credentials.insert(id, credential);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, id: impl Into<String>, credential: impl Credential + 'static) -> Result<Self> {
        self.insert(id, Box::new(credential))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Credential ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.credentials.keys().map(String::as_str)
    }

    /// Parse a credentials file, building each entry through `registry`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed entries or unknown kinds and
    /// `LookupError::DuplicateId` for repeated ids.
    pub fn parse(contents: &str, registry: &Registry) -> Result<Self> {
        let file: CredentialsFile = toml::from_str(contents).map_err(ConfigError::Parse)?;

        let mut store = Self::new();
        for table in &file.credential {
            let id = table
                .get("id")
                .and_then(toml::Value::as_str)
                .filter(|id| !id.trim().is_empty())
                .ok_or(ConfigError::MissingField("id"))?;
            let kind = table
                .get("kind")
                .and_then(toml::Value::as_str)
                .ok_or(ConfigError::MissingField("kind"))?;

            let credential = registry.build_credential(kind, table)?;
            debug!(id, kind, "loaded credential");
            store.insert(id, credential)?;
        }
        Ok(store)
    }

    /// Load a credentials file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is missing, plus
    /// everything [`parse`](Self::parse) returns.
    pub fn load(path: &Path, registry: &Registry) -> Result<Self> {
        debug!(path = %path.display(), "loading credentials");
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents, registry)
    }
}

impl CredentialStore for MemoryStore {
    fn lookup(&self, id: &str, required: Capability) -> Result<&dyn Credential> {
        let credential = self
            .credentials
            .get(id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))?;

        if credential.capability() != required {
            return Err(LookupError::WrongCapability {
                id: id.to_string(),
                kind: credential.kind(),
                expected: required,
            }
            .into());
        }

        Ok(credential.as_ref())
    }
}
