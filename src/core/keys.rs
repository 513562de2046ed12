//! Key inspection and lifecycle.
//!
//! Maps keys to the addresses they cover, and keeps the address registry in
//! step with the key tool when keys are imported or removed.

use tracing::{debug, info};

use crate::core::cipher::{KeyRecord, KeyTool};
use crate::core::registry::AddressRegistry;
use crate::core::types::EmailAddress;
use crate::error::{KeyError, Result};

/// Extract the address from a user-id such as `Alice <alice@example.com>`.
///
/// Takes everything after the last `<` and strips `>` from both ends. A
/// user-id without brackets is returned as is. Empty user-ids yield `None`.
pub fn parse_address(uid: &str) -> Option<EmailAddress> {
    if uid.is_empty() {
        return None;
    }
    let tail = uid.rsplit('<').next().unwrap_or(uid);
    Some(tail.trim_matches('>').to_string())
}

/// Addresses on every listed key sharing `key`'s fingerprint.
///
/// No match is not an error; the result is simply empty.
///
/// # Errors
///
/// Propagates the tool's listing failure.
pub fn addresses_for_key(tool: &dyn KeyTool, key: &KeyRecord) -> Result<Vec<EmailAddress>> {
    let addresses: Vec<EmailAddress> = tool
        .list_keys()?
        .iter()
        .filter(|listed| listed.fingerprint == key.fingerprint)
        .flat_map(|listed| listed.uids.iter().filter_map(|uid| parse_address(uid)))
        .collect();

    debug!(
        fingerprint = %key.fingerprint,
        addresses = addresses.len(),
        "resolved key addresses"
    );
    Ok(addresses)
}

/// Import key data (armored or binary) and register every address it
/// covers.
///
/// # Returns
///
/// The registered addresses in import order.
///
/// # Errors
///
/// Returns `KeyError::ImportFailed` if nothing was imported, or a registry
/// error if the registry cannot be written.
pub fn import_key(
    tool: &dyn KeyTool,
    registry: &mut dyn AddressRegistry,
    key_data: &[u8],
) -> Result<Vec<EmailAddress>> {
    let fingerprints = tool.import(key_data)?;
    if fingerprints.is_empty() {
        return Err(KeyError::ImportFailed("no keys found in input".to_string()).into());
    }

    let mut registered = Vec::new();
    for fingerprint in fingerprints {
        let addresses = addresses_for_key(tool, &KeyRecord::new(fingerprint.as_str()))?;
        for address in addresses {
            registry.register(&address, &fingerprint)?;
            info!(address = %address, fingerprint = %fingerprint, "registered address");
            registered.push(address);
        }
    }
    Ok(registered)
}

/// Delete a key from the tool and unregister its addresses.
///
/// # Returns
///
/// The addresses that were unregistered.
pub fn remove_key(
    tool: &dyn KeyTool,
    registry: &mut dyn AddressRegistry,
    fingerprint: &str,
) -> Result<Vec<EmailAddress>> {
    tool.delete(fingerprint)?;
    let removed = registry.unregister_fingerprint(fingerprint)?;
    info!(fingerprint = %fingerprint, addresses = removed.len(), "removed key");
    Ok(removed)
}
