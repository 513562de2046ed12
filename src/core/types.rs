//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An email address as it appears in the registry and on the envelope.
pub type EmailAddress = String;

/// A key fingerprint (uppercase hex as printed by gpg).
pub type Fingerprint = String;

/// A key user-id, e.g. `Alice Example <alice@example.com>`.
pub type UserId = String;

/// ASCII-armored OpenPGP data.
pub type Armored = String;
