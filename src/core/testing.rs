//! In-memory collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::cipher::{KeyRecord, KeyTool};
use crate::core::registry::{AddressEntry, AddressRegistry};
use crate::core::types::{Armored, EmailAddress, Fingerprint};
use crate::error::{KeyError, Result};

pub const ARMOR_HEADER: &str = "-----BEGIN PGP MESSAGE-----";

/// Key tool that "encrypts" by wrapping the plaintext length and recipient in armor.
#[derive(Default)]
pub struct FakeKeys {
    keys: Vec<KeyRecord>,
    imports: Vec<Fingerprint>,
    deleted: RefCell<Vec<Fingerprint>>,
    encrypted_for: RefCell<Vec<EmailAddress>>,
    availability_checks: Cell<usize>,
    import_inputs: RefCell<Vec<Vec<u8>>>,
    fail_encrypt: bool,
}

impl FakeKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: KeyRecord) -> Self {
        self.keys.push(key);
        self
    }

    pub fn importing(mut self, fingerprints: &[&str]) -> Self {
        self.imports = fingerprints.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_encrypt = true;
        self
    }

    pub fn deleted(&self) -> Vec<Fingerprint> {
        self.deleted.borrow().clone()
    }

    pub fn encrypted_for(&self) -> Vec<EmailAddress> {
        self.encrypted_for.borrow().clone()
    }

    pub fn availability_checks(&self) -> usize {
        self.availability_checks.get()
    }

    pub fn import_inputs(&self) -> Vec<Vec<u8>> {
        self.import_inputs.borrow().clone()
    }
}

impl KeyTool for FakeKeys {
    fn ensure_available(&self) -> Result<()> {
        self.availability_checks.set(self.availability_checks.get() + 1);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<KeyRecord>> {
        Ok(self.keys.clone())
    }

    fn encrypt(&self, plaintext: &[u8], recipient: &str) -> Result<Armored> {
        if self.fail_encrypt {
            return Err(KeyError::EncryptionFailed(format!("no public key for {}", recipient)).into());
        }
        self.encrypted_for.borrow_mut().push(recipient.to_string());
        Ok(format!(
            "{}\n\nfor={} len={}\n-----END PGP MESSAGE-----\n",
            ARMOR_HEADER,
            recipient,
            plaintext.len()
        ))
    }

    fn import(&self, key_data: &[u8]) -> Result<Vec<Fingerprint>> {
        self.import_inputs.borrow_mut().push(key_data.to_vec());
        Ok(self.imports.clone())
    }

    fn delete(&self, fingerprint: &str) -> Result<()> {
        self.deleted.borrow_mut().push(fingerprint.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Registry held in a map.
#[derive(Default)]
pub struct MemoryRegistry {
    addresses: BTreeMap<EmailAddress, Fingerprint>,
}

impl MemoryRegistry {
    pub fn with(addresses: &[(&str, &str)]) -> Self {
        Self {
            addresses: addresses
                .iter()
                .map(|(a, f)| (a.to_string(), f.to_string()))
                .collect(),
        }
    }

    pub fn fingerprint_of(&self, address: &str) -> Option<&str> {
        self.addresses.get(address).map(String::as_str)
    }
}

impl AddressRegistry for MemoryRegistry {
    fn registered(&self, addresses: &[EmailAddress]) -> Result<BTreeSet<EmailAddress>> {
        Ok(addresses
            .iter()
            .filter(|a| self.addresses.contains_key(a.as_str()))
            .cloned()
            .collect())
    }

    fn register(&mut self, address: &str, fingerprint: &str) -> Result<()> {
        self.addresses
            .insert(address.to_string(), fingerprint.to_string());
        Ok(())
    }

    fn unregister_fingerprint(&mut self, fingerprint: &str) -> Result<Vec<EmailAddress>> {
        let removed: Vec<EmailAddress> = self
            .addresses
            .iter()
            .filter(|(_, f)| f.as_str() == fingerprint)
            .map(|(a, _)| a.clone())
            .collect();
        for address in &removed {
            self.addresses.remove(address);
        }
        Ok(removed)
    }

    fn entries(&self) -> Result<Vec<AddressEntry>> {
        Ok(self
            .addresses
            .iter()
            .map(|(address, fingerprint)| AddressEntry {
                address: address.clone(),
                fingerprint: fingerprint.clone(),
            })
            .collect())
    }
}
