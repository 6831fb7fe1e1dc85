//! Vault address, namespace, and token binding.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::{debug, warn};

use super::Binding;
use crate::core::client::ClientFactory;
use crate::core::constants;
use crate::core::context::BindContext;
use crate::core::credential::{Capability, CredentialStore};
use crate::core::endpoint::Endpoint;
use crate::core::validation::{default_if_blank, validate_variable};
use crate::core::variables::VariableMap;
use crate::error::Result;

/// Exposes a vault address, namespace, and freshly obtained token.
///
/// Blank variable names fall back to `VAULT_ADDR`, `VAULT_TOKEN`, and
/// `VAULT_NAMESPACE`. If two names coincide the later write wins; the order
/// is address, namespace, token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultTokenBinding {
    addr_variable: String,
    token_variable: String,
    namespace_variable: String,
    credential_id: String,
    address: String,
    namespace: String,
}

#[derive(Deserialize)]
struct VaultTokenEntry {
    #[serde(default)]
    addr_variable: Option<String>,
    #[serde(default)]
    token_variable: Option<String>,
    #[serde(default)]
    namespace_variable: Option<String>,
    credential_id: String,
    address: String,
    #[serde(default)]
    namespace: String,
}

impl VaultTokenBinding {
    /// Create a binding using the default variable names.
    ///
    /// `address` and `namespace` are stored as given and validated at bind time.
    pub fn new(
        credential_id: impl Into<String>,
        address: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            addr_variable: constants::DEFAULT_ADDR_VARIABLE.to_string(),
            token_variable: constants::DEFAULT_TOKEN_VARIABLE.to_string(),
            namespace_variable: constants::DEFAULT_NAMESPACE_VARIABLE.to_string(),
            credential_id: credential_id.into(),
            address: address.into(),
            namespace: namespace.into(),
        }
    }

    /// Override the variable names; `None` or blank keeps the default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVariable` if a resulting name is not a
    /// valid environment variable name.
    pub fn with_variables(
        mut self,
        addr_variable: Option<&str>,
        token_variable: Option<&str>,
        namespace_variable: Option<&str>,
    ) -> Result<Self> {
        self.addr_variable = default_if_blank(addr_variable, constants::DEFAULT_ADDR_VARIABLE);
        self.token_variable = default_if_blank(token_variable, constants::DEFAULT_TOKEN_VARIABLE);
        self.namespace_variable =
            default_if_blank(namespace_variable, constants::DEFAULT_NAMESPACE_VARIABLE);

        validate_variable(&self.addr_variable)?;
        validate_variable(&self.token_variable)?;
        validate_variable(&self.namespace_variable)?;

        if self.variables().len() < 3 {
            warn!(
                addr = %self.addr_variable,
                token = %self.token_variable,
                namespace = %self.namespace_variable,
                "vault binding reuses a variable name; later values overwrite earlier ones"
            );
        }

        Ok(self)
    }

    pub fn addr_variable(&self) -> &str {
        &self.addr_variable
    }

    pub fn token_variable(&self) -> &str {
        &self.token_variable
    }

    pub fn namespace_variable(&self) -> &str {
        &self.namespace_variable
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Binding>> {
        let entry: VaultTokenEntry = crate::core::registry::decode("vault-token", table)?;
        let binding = Self::new(entry.credential_id, entry.address, entry.namespace)
            .with_variables(
                entry.addr_variable.as_deref(),
                entry.token_variable.as_deref(),
                entry.namespace_variable.as_deref(),
            )?;
        Ok(Box::new(binding))
    }
}

impl Binding for VaultTokenBinding {
    fn kind(&self) -> &'static str {
        "vault-token"
    }

    fn credential_id(&self) -> &str {
        &self.credential_id
    }

    fn variables(&self) -> BTreeSet<String> {
        [
            self.addr_variable.clone(),
            self.namespace_variable.clone(),
            self.token_variable.clone(),
        ]
        .into_iter()
        .collect()
    }

    fn validate(&self) -> Result<()> {
        Endpoint::new(&self.address, &self.namespace).map(|_| ())
    }

    fn bind(
        &self,
        ctx: &BindContext,
        credentials: &dyn CredentialStore,
        clients: &dyn ClientFactory,
    ) -> Result<VariableMap> {
        let _span = ctx.span().enter();

        let credential = credentials.lookup(&self.credential_id, Capability::VaultToken)?;
        debug!(
            credential_id = %self.credential_id,
            kind = credential.kind(),
            "resolved credential"
        );

        let endpoint = Endpoint::new(&self.address, &self.namespace)?;
        let client = clients.build(&endpoint)?;

        let token = credential.token(client.as_ref(), ctx)?;
        debug!(
            credential_id = %self.credential_id,
            address = %endpoint.address(),
            namespace = endpoint.namespace().unwrap_or(""),
            "obtained vault token"
        );

        let mut vars = VariableMap::new();
        vars.insert(self.addr_variable.as_str(), self.address.as_str());
        vars.insert(self.namespace_variable.as_str(), self.namespace.as_str());
        vars.insert_secret(self.token_variable.as_str(), token.expose());
        Ok(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let binding = VaultTokenBinding::new("vault-static-1", "https://vault.example:8200", "")
            .with_variables(None, Some(""), Some("  "))
            .unwrap();
        assert_eq!(binding.addr_variable(), "VAULT_ADDR");
        assert_eq!(binding.token_variable(), "VAULT_TOKEN");
        assert_eq!(binding.namespace_variable(), "VAULT_NAMESPACE");
    }

    #[test]
    fn test_custom_names() {
        let binding = VaultTokenBinding::new("id", "https://vault.example:8200", "")
            .with_variables(Some("ADDR"), Some("TOKEN"), Some("NS"))
            .unwrap();
        let vars: Vec<_> = binding.variables().into_iter().collect();
        assert_eq!(vars, vec!["ADDR", "NS", "TOKEN"]);
    }

    #[test]
    fn test_invalid_name() {
        let result = VaultTokenBinding::new("id", "https://vault.example:8200", "")
            .with_variables(Some("VAULT-ADDR"), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_names_accepted() {
        let binding = VaultTokenBinding::new("id", "https://vault.example:8200", "")
            .with_variables(Some("SAME"), Some("SAME"), None)
            .unwrap();
        assert_eq!(binding.variables().len(), 2);
    }

    #[test]
    fn test_validate_checks_address() {
        assert!(VaultTokenBinding::new("id", "https://vault.example:8200", "team-a")
            .validate()
            .is_ok());
        assert!(VaultTokenBinding::new("id", "", "").validate().is_err());
    }

    #[test]
    fn test_from_table() {
        let table: toml::Table = toml::from_str(
            r#"
            kind = "vault-token"
            credential_id = "vault-static-1"
            address = "https://vault.example:8200"
            token_variable = "MY_TOKEN"
            "#,
        )
        .unwrap();
        let binding = VaultTokenBinding::from_table(&table).unwrap();
        assert_eq!(binding.credential_id(), "vault-static-1");
        assert!(binding.variables().contains("MY_TOKEN"));
        assert!(binding.variables().contains("VAULT_NAMESPACE"));
    }
}
