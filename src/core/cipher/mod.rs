//! Key management and encryption.
//!
//! Abstracts the external key tool so the mailer never talks to gpg
//! directly. Key material and the cryptography stay in the tool's own
//! keyring; this side only lists, imports, deletes, and asks for
//! ciphertext.
//!
//! ## Backends
//!
//! - **GPG**: uses GnuPG via the `gpg` CLI, optionally scoped to a
//!   dedicated `--homedir`.

use crate::core::types::{Armored, Fingerprint, UserId};
use crate::error::Result;

mod gpg;

pub use gpg::Gpg;

/// A key as listed by the key tool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyRecord {
    /// Primary key fingerprint
    pub fingerprint: Fingerprint,
    /// User-ids, each normally embedding an address in angle brackets
    pub uids: Vec<UserId>,
}

impl KeyRecord {
    /// A record carrying only a fingerprint.
    pub fn new(fingerprint: impl Into<Fingerprint>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            uids: Vec::new(),
        }
    }

    /// Add a user-id.
    pub fn with_uid(mut self, uid: impl Into<UserId>) -> Self {
        self.uids.push(uid.into());
        self
    }
}

/// Key-management tool trait.
///
/// Recipients are identified by email address; the tool resolves the
/// address to a key in its own keyring.
pub trait KeyTool {
    /// Check that the tool can be used at all.
    ///
    /// Called once per send, and only when some recipient has a key.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// List every known public key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::ListFailed` if the keyring cannot be read.
    fn list_keys(&self) -> Result<Vec<KeyRecord>>;

    /// Encrypt `plaintext` for a single recipient address.
    ///
    /// # Returns
    ///
    /// ASCII-armored ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::EncryptionFailed` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipient: &str) -> Result<Armored>;

    /// Import key data, armored or binary, returning the fingerprints
    /// imported.
    fn import(&self, key_data: &[u8]) -> Result<Vec<Fingerprint>>;

    /// Delete a public key by fingerprint.
    fn delete(&self, fingerprint: &str) -> Result<()>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
