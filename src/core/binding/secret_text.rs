//! Single secret text binding.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::debug;

use super::Binding;
use crate::core::client::ClientFactory;
use crate::core::context::BindContext;
use crate::core::credential::{Capability, CredentialStore};
use crate::core::validation::validate_variable;
use crate::core::variables::VariableMap;
use crate::error::{LookupError, Result};

/// Exposes a stored secret text under one variable. No network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretTextBinding {
    variable: String,
    credential_id: String,
}

#[derive(Deserialize)]
struct SecretTextEntry {
    variable: String,
    credential_id: String,
}

impl SecretTextBinding {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVariable` for an invalid variable name.
    pub fn new(variable: impl Into<String>, credential_id: impl Into<String>) -> Result<Self> {
        let variable = variable.into();
        validate_variable(&variable)?;
        Ok(Self {
            variable,
            credential_id: credential_id.into(),
        })
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Binding>> {
        let entry: SecretTextEntry = crate::core::registry::decode("secret-text", table)?;
        Ok(Box::new(Self::new(entry.variable, entry.credential_id)?))
    }
}

impl Binding for SecretTextBinding {
    fn kind(&self) -> &'static str {
        "secret-text"
    }

    fn credential_id(&self) -> &str {
        &self.credential_id
    }

    fn variables(&self) -> BTreeSet<String> {
        BTreeSet::from([self.variable.clone()])
    }

    fn bind(
        &self,
        ctx: &BindContext,
        credentials: &dyn CredentialStore,
        _clients: &dyn ClientFactory,
    ) -> Result<VariableMap> {
        let _span = ctx.span().enter();

        let credential = credentials.lookup(&self.credential_id, Capability::SecretText)?;
        let secret = credential
            .secret()
            .ok_or_else(|| LookupError::WrongCapability {
                id: self.credential_id.clone(),
                kind: credential.kind(),
                expected: Capability::SecretText,
            })?;
        debug!(credential_id = %self.credential_id, variable = %self.variable, "bound secret text");

        let mut vars = VariableMap::new();
        vars.insert_secret(self.variable.as_str(), secret);
        Ok(vars)
    }
}
