//! Check command.
//!
//! Validates the job configuration offline: binding entries, endpoints,
//! variable collisions, and that every credential exists with the right
//! capability.

use std::path::Path;

use crate::cli::output;
use crate::core::credential::CredentialStore;
use crate::error::Result;

/// Validate bindings and credentials without contacting vault.
pub fn execute(config: &Path) -> Result<()> {
    let (config_file, registry) = super::load(config)?;
    let job = config_file.job(&registry)?;
    let store = config_file.store(&registry)?;

    if job.is_empty() {
        output::warn("no bindings configured");
        return Ok(());
    }

    job.validate()?;

    for binding in job.bindings() {
        if let Some(kind) = registry.binding(binding.kind()) {
            store.lookup(binding.credential_id(), kind.capability)?;
        }
    }

    output::success(&format!(
        "{} binding{} valid",
        job.bindings().len(),
        if job.bindings().len() == 1 { "" } else { "s" }
    ));
    Ok(())
}
