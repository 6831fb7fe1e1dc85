//! Bindings: stored credential in, named variables out.
//!
//! A [`Binding`] is declarative job configuration. Each call to
//! [`Binding::bind`] resolves the credential, authenticates if needed, and
//! returns a fresh [`VariableMap`]. Nothing is cached between calls.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::client::ClientFactory;
use crate::core::context::BindContext;
use crate::core::credential::CredentialStore;
use crate::core::variables::VariableMap;
use crate::error::Result;

mod secret_text;
mod vault;

pub use secret_text::SecretTextBinding;
pub use vault::VaultTokenBinding;

/// A configured binding of one credential to job variables.
pub trait Binding: fmt::Debug + Send + Sync {
    /// Registered kind name (e.g., `vault-token`).
    fn kind(&self) -> &'static str;

    /// Id of the credential this binding resolves.
    fn credential_id(&self) -> &str;

    /// Variable names this binding produces. Pure; no I/O.
    fn variables(&self) -> BTreeSet<String>;

    /// Check static configuration without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for configuration that `bind` would reject.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Resolve the credential and produce the variables.
    ///
    /// Either every variable is returned or nothing is.
    ///
    /// # Errors
    ///
    /// Returns the crate `Error`; [`Error::phase`](crate::error::Error::phase)
    /// names the step that failed.
    fn bind(
        &self,
        ctx: &BindContext,
        credentials: &dyn CredentialStore,
        clients: &dyn ClientFactory,
    ) -> Result<VariableMap>;
}
