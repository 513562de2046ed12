//! Addresses command.

use std::path::Path;

use serde_json::json;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::registry::{AddressRegistry, FileRegistry};
use crate::error::Result;

/// List registered addresses and their key fingerprints.
pub fn execute(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = FileRegistry::open(&config.gnupg.registry)?;
    let entries = registry.entries()?;

    if json {
        let entries: Vec<_> = entries
            .iter()
            .map(|entry| json!({ "address": entry.address, "fingerprint": entry.fingerprint }))
            .collect();
        output::data(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::dimmed("no registered addresses");
        return Ok(());
    }

    output::header(&format!(
        "Registered ({})",
        output::count(entries.len(), "address", "addresses")
    ));
    for entry in &entries {
        output::kv(&entry.address, &entry.fingerprint);
    }
    Ok(())
}
