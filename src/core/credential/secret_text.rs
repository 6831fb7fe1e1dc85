//! Plain secret text credentials.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::{Capability, Credential};
use crate::core::validation::require;
use crate::error::Result;

/// A stored secret exposed verbatim; cannot log in to vault.
pub struct SecretText {
    secret: Zeroizing<String>,
}

#[derive(Deserialize)]
struct SecretTextEntry {
    secret: String,
}

impl SecretText {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the secret is blank.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = Zeroizing::new(secret.into());
        require("secret", &secret)?;
        Ok(Self { secret })
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry: SecretTextEntry = crate::core::registry::decode("secret-text", table)?;
        Ok(Box::new(Self::new(entry.secret)?))
    }
}

impl Credential for SecretText {
    fn kind(&self) -> &'static str {
        "secret-text"
    }

    fn capability(&self) -> Capability {
        Capability::SecretText
    }

    fn secret(&self) -> Option<&str> {
        Some(&self.secret)
    }
}

impl fmt::Debug for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretText").finish_non_exhaustive()
    }
}
