//! File-backed address registry.
//!
//! Stores the registry as TOML:
//!
//! ```toml
//! [addresses]
//! "alice@example.com" = "0123456789ABCDEF0123456789ABCDEF01234567"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{AddressEntry, AddressRegistry};
use crate::core::types::{EmailAddress, Fingerprint};
use crate::error::{RegistryError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AddressBook {
    #[serde(default)]
    addresses: BTreeMap<EmailAddress, Fingerprint>,
}

/// Registry persisted to a TOML file, written on every change.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    book: AddressBook,
}

impl FileRegistry {
    /// Open the registry at `path`. A missing file is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Read` or `RegistryError::Parse` if an
    /// existing file cannot be loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let book = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(RegistryError::Read)?;
            toml::from_str(&contents).map_err(RegistryError::Parse)?
        } else {
            AddressBook::default()
        };

        debug!(
            path = %path.display(),
            addresses = book.addresses.len(),
            "registry opened"
        );
        Ok(Self { path, book })
    }

    /// Registry file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(RegistryError::Write)?;
        }
        let contents = toml::to_string_pretty(&self.book).map_err(RegistryError::Serialize)?;
        fs::write(&self.path, contents).map_err(RegistryError::Write)?;
        Ok(())
    }
}

impl AddressRegistry for FileRegistry {
    fn registered(&self, addresses: &[EmailAddress]) -> Result<BTreeSet<EmailAddress>> {
        let found: BTreeSet<EmailAddress> = addresses
            .iter()
            .filter(|a| self.book.addresses.contains_key(a.as_str()))
            .cloned()
            .collect();
        debug!(
            queried = addresses.len(),
            registered = found.len(),
            "registry lookup"
        );
        Ok(found)
    }

    fn register(&mut self, address: &str, fingerprint: &str) -> Result<()> {
        self.book
            .addresses
            .insert(address.to_string(), fingerprint.to_string());
        self.save()
    }

    fn unregister_fingerprint(&mut self, fingerprint: &str) -> Result<Vec<EmailAddress>> {
        let removed: Vec<EmailAddress> = self
            .book
            .addresses
            .iter()
            .filter(|(_, fpr)| fpr.as_str() == fingerprint)
            .map(|(addr, _)| addr.clone())
            .collect();

        if removed.is_empty() {
            return Ok(removed);
        }

        for addr in &removed {
            self.book.addresses.remove(addr);
        }
        self.save()?;
        Ok(removed)
    }

    fn entries(&self) -> Result<Vec<AddressEntry>> {
        Ok(self
            .book
            .addresses
            .iter()
            .map(|(address, fingerprint)| AddressEntry {
                address: address.clone(),
                fingerprint: fingerprint.clone(),
            })
            .collect())
    }
}
