//! AppRole credentials.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::{Capability, Credential};
use crate::core::client::{ClientHandle, Exchange, Token};
use crate::core::constants;
use crate::core::context::BindContext;
use crate::core::validation::require;
use crate::error::Result;

/// Role id and secret id exchanged for a token at an AppRole mount.
pub struct AppRole {
    mount: String,
    role_id: String,
    secret_id: Zeroizing<String>,
}

#[derive(Deserialize)]
struct AppRoleEntry {
    role_id: String,
    secret_id: String,
    #[serde(default)]
    mount: Option<String>,
}

impl AppRole {
    /// AppRole credential on the default `approle` mount.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if either id is blank.
    pub fn new(role_id: impl Into<String>, secret_id: impl Into<String>) -> Result<Self> {
        let role_id = role_id.into();
        let secret_id = Zeroizing::new(secret_id.into());
        require("role_id", &role_id)?;
        require("secret_id", &secret_id)?;

        Ok(Self {
            mount: constants::DEFAULT_APPROLE_MOUNT.to_string(),
            role_id,
            secret_id,
        })
    }

    /// Use a non-default auth mount.
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry: AppRoleEntry = crate::core::registry::decode("approle", table)?;
        let mut cred = Self::new(entry.role_id, entry.secret_id)?;
        if let Some(mount) = entry.mount.filter(|m| !m.trim().is_empty()) {
            cred = cred.with_mount(mount.trim());
        }
        Ok(Box::new(cred))
    }
}

impl Credential for AppRole {
    fn kind(&self) -> &'static str {
        "approle"
    }

    fn capability(&self) -> Capability {
        Capability::VaultToken
    }

    fn token(&self, client: &dyn ClientHandle, ctx: &BindContext) -> Result<Token> {
        client.authenticate(
            &Exchange::AppRole {
                mount: &self.mount,
                role_id: &self.role_id,
                secret_id: &self.secret_id,
            },
            ctx,
        )
    }
}

impl fmt::Debug for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRole")
            .field("mount", &self.mount)
            .field("role_id", &self.role_id)
            .finish_non_exhaustive()
    }
}
