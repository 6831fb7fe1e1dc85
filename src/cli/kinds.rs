//! Kinds command.
//!
//! Lists registered binding and credential kinds with their labels.

use crate::cli::output;
use crate::core::registry::Registry;
use crate::error::Result;

/// List registered binding and credential kinds.
pub fn execute() -> Result<()> {
    let registry = Registry::builtin();

    output::header("Bindings");
    for kind in registry.bindings() {
        output::kv(kind.id, kind.label);
    }

    println!();
    output::header("Credentials");
    for kind in registry.credentials() {
        output::kv(kind.id, format!("{} ({})", kind.label, kind.capability));
    }
    Ok(())
}
