//! Pre-issued token credentials.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use super::{Capability, Credential};
use crate::core::client::{ClientHandle, Exchange, Token};
use crate::core::context::BindContext;
use crate::core::validation::{is_header_safe, require, require_header_safe};
use crate::error::{AuthError, Result};

/// A token issued ahead of time, validated with `lookup-self` on each bind.
pub struct StaticToken {
    token: Zeroizing<String>,
}

#[derive(Deserialize)]
struct StaticTokenEntry {
    token: String,
}

impl StaticToken {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the token is blank and
    /// `ConfigError::ControlCharacter` if it contains control characters.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = Zeroizing::new(token.into());
        require("token", &token)?;
        require_header_safe("token", &token)?;
        Ok(Self { token })
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry: StaticTokenEntry = crate::core::registry::decode("token", table)?;
        Ok(Box::new(Self::new(entry.token)?))
    }
}

impl Credential for StaticToken {
    fn kind(&self) -> &'static str {
        "token"
    }

    fn capability(&self) -> Capability {
        Capability::VaultToken
    }

    fn token(&self, client: &dyn ClientHandle, ctx: &BindContext) -> Result<Token> {
        client.authenticate(
            &Exchange::LookupSelf {
                token: self.token.as_str(),
            },
            ctx,
        )
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

/// A token read from a file when the binding runs.
///
/// Lets an agent rotate the file between jobs without touching the store.
#[derive(Debug)]
pub struct TokenFile {
    path: PathBuf,
}

#[derive(Deserialize)]
struct TokenFileEntry {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry: TokenFileEntry = crate::core::registry::decode("token-file", table)?;
        Ok(Box::new(Self::new(entry.path)))
    }

    fn read(&self) -> Result<Zeroizing<String>> {
        let unavailable = |reason: String| AuthError::CredentialUnavailable {
            kind: "token-file",
            reason,
        };

        let contents = Zeroizing::new(
            std::fs::read_to_string(&self.path)
                .map_err(|e| unavailable(format!("{}: {}", self.path.display(), e)))?,
        );
        let token = Zeroizing::new(contents.trim().to_string());
        if token.is_empty() {
            return Err(unavailable(format!("{} is empty", self.path.display())).into());
        }
        if !is_header_safe(&token) {
            return Err(unavailable(format!(
                "{} contains control characters",
                self.path.display()
            ))
            .into());
        }
        Ok(token)
    }
}

impl Credential for TokenFile {
    fn kind(&self) -> &'static str {
        "token-file"
    }

    fn capability(&self) -> Capability {
        Capability::VaultToken
    }

    fn token(&self, client: &dyn ClientHandle, ctx: &BindContext) -> Result<Token> {
        debug!(path = %self.path.display(), "reading token file");
        let token = self.read()?;
        client.authenticate(
            &Exchange::LookupSelf {
                token: token.as_str(),
            },
            ctx,
        )
    }
}
