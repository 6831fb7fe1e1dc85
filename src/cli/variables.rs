//! Variables command.
//!
//! Lists the variable names each binding declares, so an executor can
//! check them against its own environment before the job runs.

use std::path::Path;

use serde::Serialize;

use crate::cli::output;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct BindingVariables<'a> {
    kind: &'a str,
    credential_id: &'a str,
    variables: Vec<String>,
}

/// List declared variable names per binding.
pub fn execute(config: &Path, json: bool) -> Result<()> {
    let (config_file, registry) = super::load(config)?;
    let job = config_file.job(&registry)?;
    job.variables()?;

    let listing: Vec<_> = job
        .bindings()
        .iter()
        .map(|b| BindingVariables {
            kind: b.kind(),
            credential_id: b.credential_id(),
            variables: b.variables().into_iter().collect(),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&listing)
            .map_err(|e| Error::Other(format!("failed to serialize: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if listing.is_empty() {
        output::dimmed("no bindings configured");
        return Ok(());
    }

    for entry in &listing {
        output::header(&format!("{} ({})", entry.credential_id, entry.kind));
        for name in &entry.variables {
            output::list_item(name);
        }
    }
    Ok(())
}
