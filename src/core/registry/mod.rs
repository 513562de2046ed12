//! Address registry.
//!
//! Records which email addresses have an encryption key on file. Sending
//! only asks "is this address registered"; the fingerprint is kept so a
//! removed key can take its addresses with it.
//!
//! ## Adding a New Registry Backend
//!
//! 1. Implement the `AddressRegistry` trait
//! 2. Add the implementation in a new file (e.g., `sqlite.rs`)
//! 3. Re-export from this module

use std::collections::BTreeSet;

use crate::core::types::{EmailAddress, Fingerprint};
use crate::error::Result;

mod fs;

pub use fs::FileRegistry;

/// One registered address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    pub address: EmailAddress,
    pub fingerprint: Fingerprint,
}

/// Persisted address-to-key registry.
pub trait AddressRegistry {
    /// The subset of `addresses` that have a registered key.
    ///
    /// Matching is exact.
    fn registered(&self, addresses: &[EmailAddress]) -> Result<BTreeSet<EmailAddress>>;

    /// Register `address` under `fingerprint`, replacing any previous entry.
    fn register(&mut self, address: &str, fingerprint: &str) -> Result<()>;

    /// Remove every address registered under `fingerprint`.
    ///
    /// # Returns
    ///
    /// The removed addresses, sorted.
    fn unregister_fingerprint(&mut self, fingerprint: &str) -> Result<Vec<EmailAddress>>;

    /// All entries, sorted by address.
    fn entries(&self) -> Result<Vec<AddressEntry>>;
}
