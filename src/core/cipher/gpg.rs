//! GPG key tool.
//!
//! Drives GnuPG through the `gpg` CLI.
//!
//! ## Requirements
//!
//! - `gpg` CLI must be installed
//! - The keyring (default or `gnupg.home`) holds the recipients' public keys
//!
//! ## Usage
//!
//! ```toml
//! [gnupg]
//! enabled = true
//! home = "~/.sealpost/gnupg"
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::trace;

use super::{KeyRecord, KeyTool};
use crate::core::config::Config;
use crate::core::types::{Armored, Fingerprint};
use crate::error::{KeyError, Result};

/// GPG key tool using the gpg CLI
#[derive(Debug, Clone)]
pub struct Gpg {
    home: Option<PathBuf>,
    always_trust: bool,
}

impl Gpg {
    /// Create a handle for the given home directory (gpg's default when `None`).
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home,
            always_trust: true,
        }
    }

    /// Handle configured from the `[gnupg]` section.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gnupg_home()).always_trust(config.gnupg.always_trust)
    }

    /// Encrypt with `--trust-model always`.
    pub fn always_trust(mut self, always_trust: bool) -> Self {
        self.always_trust = always_trust;
        self
    }

    /// Configured home directory, if any.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Run gpg non-interactively, feeding `input` on stdin.
    fn run(&self, args: &[&str], input: Option<&[u8]>) -> std::io::Result<Output> {
        let mut cmd = Command::new("gpg");
        if let Some(home) = &self.home {
            cmd.arg("--homedir").arg(home);
        }
        cmd.args(["--batch", "--no-tty"]).args(args);

        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        trace!(?args, input_len = input.map(<[u8]>::len), "running gpg");

        let mut child = cmd.spawn()?;
        let stdin = child.stdin.take();

        // Feed stdin from a second thread so a large body can't deadlock
        // against gpg filling its stdout pipe.
        std::thread::scope(|scope| {
            if let (Some(mut stdin), Some(input)) = (stdin, input) {
                scope.spawn(move || {
                    // A write failure shows up as a non-zero gpg exit.
                    let _ = stdin.write_all(input);
                });
            }
            child.wait_with_output()
        })
    }
}

impl KeyTool for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn ensure_available(&self) -> Result<()> {
        which::which("gpg").map_err(|_| {
            KeyError::Unavailable(
                "gpg CLI not found. Install GnuPG from https://gnupg.org/download/".to_string(),
            )
        })?;

        if let Some(home) = &self.home {
            if !home.is_dir() {
                return Err(KeyError::Unavailable(format!(
                    "gnupg home {} does not exist",
                    home.display()
                ))
                .into());
            }
        }
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<KeyRecord>> {
        let output = self
            .run(
                &["--with-colons", "--fixed-list-mode", "--fingerprint", "--list-keys"],
                None,
            )
            .map_err(|e| KeyError::ListFailed(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyError::ListFailed(stderr.trim().to_string()).into());
        }

        let keys = parse_colon_listing(&String::from_utf8_lossy(&output.stdout));
        trace!(count = keys.len(), "listed gpg keys");
        Ok(keys)
    }

    fn encrypt(&self, plaintext: &[u8], recipient: &str) -> Result<Armored> {
        trace!(plaintext_len = plaintext.len(), "encrypting with gpg");

        let mut args = vec!["--armor", "--encrypt"];
        if self.always_trust {
            args.extend(["--trust-model", "always"]);
        }
        args.extend(["--recipient", recipient]);

        let output = self
            .run(&args, Some(plaintext))
            .map_err(|e| KeyError::EncryptionFailed(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyError::EncryptionFailed(format!(
                "gpg encrypt for {} failed: {}",
                recipient,
                stderr.trim()
            ))
            .into());
        }

        // Armor is ASCII
        let ciphertext = String::from_utf8(output.stdout)
            .map_err(|e| KeyError::EncryptionFailed(format!("UTF-8 error: {}", e)))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted with gpg");
        Ok(ciphertext)
    }

    fn import(&self, key_data: &[u8]) -> Result<Vec<Fingerprint>> {
        let output = self
            .run(&["--status-fd", "1", "--import"], Some(key_data))
            .map_err(|e| KeyError::ImportFailed(format!("failed to spawn gpg: {}", e)))?;

        // gpg exits non-zero when any key in the bundle was rejected; keep
        // whatever did import.
        let fingerprints = parse_import_status(&String::from_utf8_lossy(&output.stdout));
        if fingerprints.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyError::ImportFailed(format!(
                "no keys imported: {}",
                stderr.trim()
            ))
            .into());
        }

        trace!(count = fingerprints.len(), "imported gpg keys");
        Ok(fingerprints)
    }

    fn delete(&self, fingerprint: &str) -> Result<()> {
        let output = self
            .run(&["--yes", "--delete-keys", fingerprint], None)
            .map_err(|e| KeyError::DeleteFailed(format!("failed to spawn gpg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyError::DeleteFailed(format!(
                "gpg delete {} failed: {}",
                fingerprint,
                stderr.trim()
            ))
            .into());
        }
        Ok(())
    }
}

/// Parse `gpg --with-colons --fingerprint --list-keys` output.
///
/// Only the first `fpr` record after a `pub` is the primary fingerprint;
/// subkey fingerprints follow `sub` records and are ignored.
fn parse_colon_listing(listing: &str) -> Vec<KeyRecord> {
    let mut keys = Vec::new();
    let mut current: Option<KeyRecord> = None;
    let mut awaiting_primary = false;

    for line in listing.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields[0] {
            "pub" => {
                keys.extend(current.take());
                current = Some(KeyRecord::default());
                awaiting_primary = true;
            }
            "fpr" if awaiting_primary => {
                if let (Some(key), Some(fpr)) = (current.as_mut(), fields.get(9)) {
                    key.fingerprint = (*fpr).to_string();
                }
                awaiting_primary = false;
            }
            "sub" => awaiting_primary = false,
            "uid" => {
                if let (Some(key), Some(uid)) = (current.as_mut(), fields.get(9)) {
                    key.uids.push(unescape_field(uid));
                }
            }
            _ => {}
        }
    }
    keys.extend(current);
    keys
}

/// Decode the `\xHH` escapes gpg uses inside colon-listing fields.
fn unescape_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let decoded = bytes
                .get(i + 2..i + 4)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Collect fingerprints from `[GNUPG:] IMPORT_OK <flags> <fpr>` lines.
fn parse_import_status(status: &str) -> Vec<Fingerprint> {
    let mut fingerprints: Vec<Fingerprint> = Vec::new();
    for line in status.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("[GNUPG:]") || parts.next() != Some("IMPORT_OK") {
            continue;
        }
        if let Some(fpr) = parts.nth(1) {
            if !fingerprints.iter().any(|f| f == fpr) {
                fingerprints.push(fpr.to_string());
            }
        }
    }
    fingerprints
}
