//! Registry of binding and credential kinds.
//!
//! Maps a kind id (the `kind` key of a config table) to a factory that
//! builds the trait object, plus a label for configuration surfaces. New
//! integrations register another entry; the bind protocol does not change.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::core::binding::{Binding, SecretTextBinding, VaultTokenBinding};
use crate::core::credential::{
    AppRole, Capability, Credential, Kubernetes, SecretText, StaticToken, TokenFile,
};
use crate::core::types::KindId;
use crate::error::{ConfigError, Result};

/// Builds a binding from its config table.
pub type BindingFactory = fn(&toml::Table) -> Result<Box<dyn Binding>>;

/// Builds a credential from its config table.
pub type CredentialFactory = fn(&toml::Table) -> Result<Box<dyn Credential>>;

/// A registered binding kind.
#[derive(Clone, Copy)]
pub struct BindingKind {
    pub id: KindId,
    pub label: &'static str,
    /// Capability the bound credential must provide.
    pub capability: Capability,
    pub factory: BindingFactory,
}

/// A registered credential kind.
#[derive(Clone, Copy)]
pub struct CredentialKind {
    pub id: KindId,
    pub label: &'static str,
    pub capability: Capability,
    pub factory: CredentialFactory,
}

impl fmt::Debug for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingKind")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialKind")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// Kind id to factory lookup for bindings and credentials.
#[derive(Debug, Default)]
pub struct Registry {
    bindings: BTreeMap<KindId, BindingKind>,
    credentials: BTreeMap<KindId, CredentialKind>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every builtin kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        let bindings = [
            BindingKind {
                id: "vault-token",
                label: "HashiCorp Vault: Address, Namespace and Token",
                capability: Capability::VaultToken,
                factory: VaultTokenBinding::from_table,
            },
            BindingKind {
                id: "secret-text",
                label: "Secret text",
                capability: Capability::SecretText,
                factory: SecretTextBinding::from_table,
            },
        ];
        let credentials = [
            CredentialKind {
                id: "token",
                label: "Vault token",
                capability: Capability::VaultToken,
                factory: StaticToken::from_table,
            },
            CredentialKind {
                id: "token-file",
                label: "Vault token file",
                capability: Capability::VaultToken,
                factory: TokenFile::from_table,
            },
            CredentialKind {
                id: "approle",
                label: "Vault AppRole",
                capability: Capability::VaultToken,
                factory: AppRole::from_table,
            },
            CredentialKind {
                id: "kubernetes",
                label: "Vault Kubernetes service account",
                capability: Capability::VaultToken,
                factory: Kubernetes::from_table,
            },
            CredentialKind {
                id: "secret-text",
                label: "Secret text",
                capability: Capability::SecretText,
                factory: SecretText::from_table,
            },
        ];

        // Builtin ids are distinct, so registration cannot fail.
        for kind in bindings {
            registry.bindings.insert(kind.id, kind);
        }
        for kind in credentials {
            registry.credentials.insert(kind.id, kind);
        }
        registry
    }

    /// Register a binding kind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateKind` if the id is taken.
    pub fn register_binding(&mut self, kind: BindingKind) -> Result<()> {
        if self.bindings.contains_key(kind.id) {
            return Err(ConfigError::DuplicateKind {
                what: "binding",
                kind: kind.id.to_string(),
            }
            .into());
        }
        self.bindings.insert(kind.id, kind);
        Ok(())
    }

    /// Register a credential kind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateKind` if the id is taken.
    pub fn register_credential(&mut self, kind: CredentialKind) -> Result<()> {
        if self.credentials.contains_key(kind.id) {
            return Err(ConfigError::DuplicateKind {
                what: "credential",
                kind: kind.id.to_string(),
            }
            .into());
        }
        self.credentials.insert(kind.id, kind);
        Ok(())
    }

    pub fn binding(&self, id: &str) -> Option<&BindingKind> {
        self.bindings.get(id)
    }

    pub fn credential(&self, id: &str) -> Option<&CredentialKind> {
        self.credentials.get(id)
    }

    /// Registered binding kinds, sorted by id.
    pub fn bindings(&self) -> impl Iterator<Item = &BindingKind> {
        self.bindings.values()
    }

    /// Registered credential kinds, sorted by id.
    pub fn credentials(&self) -> impl Iterator<Item = &CredentialKind> {
        self.credentials.values()
    }

    /// Build a binding from a table whose `kind` key names a registered kind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` without a `kind`,
    /// `ConfigError::UnknownKind` for an unregistered one, and whatever the
    /// kind's factory returns.
    pub fn build_binding(&self, table: &toml::Table) -> Result<Box<dyn Binding>> {
        let kind = table
            .get("kind")
            .and_then(toml::Value::as_str)
            .ok_or(ConfigError::MissingField("kind"))?;
        let entry = self.binding(kind).ok_or_else(|| ConfigError::UnknownKind {
            what: "binding",
            kind: kind.to_string(),
        })?;
        (entry.factory)(table)
    }

    /// Build a credential of `kind` from its table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKind` for an unregistered kind and
    /// whatever the kind's factory returns.
    pub fn build_credential(&self, kind: &str, table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry = self
            .credential(kind)
            .ok_or_else(|| ConfigError::UnknownKind {
                what: "credential",
                kind: kind.to_string(),
            })?;
        (entry.factory)(table)
    }
}

/// Deserialize a kind's config table into its entry struct.
pub(crate) fn decode<T: DeserializeOwned>(kind: &str, table: &toml::Table) -> Result<T> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e: toml::de::Error| {
            ConfigError::InvalidEntry {
                kind: kind.to_string(),
                reason: e.message().to_string(),
            }
            .into()
        })
}
