//! Job-level binding: every binding of a job step, bound together.
//!
//! Checks that no two bindings declare the same variable before any of them
//! runs, then binds them in order. A failure discards everything bound so
//! far; the step gets all variables or none.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::binding::Binding;
use crate::core::client::ClientFactory;
use crate::core::context::BindContext;
use crate::core::credential::CredentialStore;
use crate::core::registry::Registry;
use crate::core::variables::VariableMap;
use crate::error::{ConfigError, Result};

/// The bindings of one job step.
#[derive(Debug, Default)]
pub struct Job {
    bindings: Vec<Box<dyn Binding>>,
}

impl Job {
    pub fn new(bindings: Vec<Box<dyn Binding>>) -> Self {
        Self { bindings }
    }

    /// Build every binding table through `registry`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown kinds or invalid entries.
    pub fn from_tables(tables: &[toml::Table], registry: &Registry) -> Result<Self> {
        let bindings = tables
            .iter()
            .map(|table| registry.build_binding(table))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(bindings))
    }

    pub fn bindings(&self) -> &[Box<dyn Binding>] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All declared variable names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::VariableCollision` if two bindings declare the
    /// same name.
    pub fn variables(&self) -> Result<BTreeSet<String>> {
        let mut owners: BTreeMap<String, usize> = BTreeMap::new();
        for (index, binding) in self.bindings.iter().enumerate() {
            for name in binding.variables() {
                if let Some(&owner) = owners.get(&name) {
                    if owner != index {
                        return Err(ConfigError::VariableCollision { name }.into());
                    }
                }
                owners.insert(name, index);
            }
        }
        Ok(owners.into_keys().collect())
    }

    /// Check variable collisions and every binding's static configuration.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<()> {
        self.variables()?;
        for binding in &self.bindings {
            binding.validate()?;
        }
        Ok(())
    }

    /// Bind every binding in order and merge the results.
    ///
    /// # Errors
    ///
    /// Returns the first error; no variables are returned in that case.
    pub fn bind(
        &self,
        ctx: &BindContext,
        credentials: &dyn CredentialStore,
        clients: &dyn ClientFactory,
    ) -> Result<VariableMap> {
        self.variables()?;

        let mut vars = VariableMap::new();
        for binding in &self.bindings {
            debug!(
                kind = binding.kind(),
                credential_id = binding.credential_id(),
                "binding"
            );
            vars.extend(binding.bind(&ctx.child(), credentials, clients)?);
        }
        Ok(vars)
    }
}
