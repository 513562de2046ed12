//! Key commands.
//!
//! Importing a key registers its addresses; removing it unregisters them.

use std::path::Path;

use dialoguer::Confirm;
use serde_json::json;

use crate::cli::output;
use crate::core::cipher::{Gpg, KeyTool};
use crate::core::config::Config;
use crate::core::keys;
use crate::core::registry::FileRegistry;
use crate::error::Result;

/// Import a key file, armored or binary.
pub fn import(config_path: Option<&Path>, path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let gpg = Gpg::from_config(&config);
    gpg.ensure_available()?;
    let mut registry = FileRegistry::open(&config.gnupg.registry)?;

    let key_data = std::fs::read(path)?;
    let registered = keys::import_key(&gpg, &mut registry, &key_data)?;

    if registered.is_empty() {
        output::warn("key imported but carries no addresses");
        return Ok(());
    }
    output::success(&format!(
        "registered {}",
        output::count(registered.len(), "address", "addresses")
    ));
    for address in &registered {
        output::list_item(&output::key(address));
    }
    Ok(())
}

/// Delete a key and unregister its addresses.
pub fn rm(config_path: Option<&Path>, fingerprint: &str, yes: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let gpg = Gpg::from_config(&config);
    gpg.ensure_available()?;
    let mut registry = FileRegistry::open(&config.gnupg.registry)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete key {}?", fingerprint))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    let removed = keys::remove_key(&gpg, &mut registry, fingerprint)?;
    output::success(&format!(
        "removed {} ({} unregistered)",
        output::key(fingerprint),
        output::count(removed.len(), "address", "addresses")
    ));
    Ok(())
}

/// List keys in the keyring with the addresses they cover.
pub fn list(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let gpg = Gpg::from_config(&config);
    gpg.ensure_available()?;

    let records = gpg.list_keys()?;

    if json {
        let keys: Vec<_> = records
            .iter()
            .map(|record| {
                let addresses: Vec<String> =
                    record.uids.iter().filter_map(|uid| keys::parse_address(uid)).collect();
                json!({
                    "fingerprint": record.fingerprint,
                    "uids": record.uids,
                    "addresses": addresses,
                })
            })
            .collect();
        output::data(&serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    if records.is_empty() {
        output::dimmed("no keys in keyring");
        return Ok(());
    }

    output::header(&format!("Keys ({})", records.len()));
    for record in &records {
        println!("{}", output::key(&record.fingerprint));
        for uid in &record.uids {
            output::list_item(uid);
        }
    }
    Ok(())
}
