//! Configuration file management.
//!
//! Handles reading and validating `.sealpost.toml`. Every section is
//! optional; a missing default config file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.sealpost.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encryption feature toggle and key store location
    pub gnupg: GnupgConfig,
    /// Outgoing mail transport
    pub email: EmailConfig,
    /// Template search directories
    pub templates: TemplateConfig,
}

/// `[gnupg]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GnupgConfig {
    /// Encrypt for registered recipients. Defaults to whether `gpg` is on PATH.
    pub enabled: bool,
    /// GnuPG home directory passed as `--homedir`; gpg's default when unset.
    pub home: Option<PathBuf>,
    /// Encrypt with `--trust-model always`.
    pub always_trust: bool,
    /// Address registry file.
    pub registry: PathBuf,
}

impl Default for GnupgConfig {
    fn default() -> Self {
        Self {
            enabled: which::which("gpg").is_ok(),
            home: None,
            always_trust: true,
            registry: PathBuf::from(constants::REGISTRY_FILE),
        }
    }
}

/// Transport backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Deliver through an SMTP relay
    #[default]
    Smtp,
    /// Print formatted messages to stdout
    Console,
    /// Write `.eml` files into `email.file_path`
    File,
}

/// SMTP connection security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// Plaintext connection
    #[default]
    None,
    /// Upgrade with STARTTLS
    Starttls,
    /// Implicit TLS
    Tls,
}

/// `[email]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub backend: Backend,
    /// Default sender address
    pub from: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub security: Security,
    pub timeout_secs: Option<u64>,
    /// Output directory for the file backend
    pub file_path: Option<PathBuf>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            from: constants::DEFAULT_FROM.to_string(),
            host: constants::DEFAULT_SMTP_HOST.to_string(),
            port: constants::DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            security: Security::default(),
            timeout_secs: None,
            file_path: None,
        }
    }
}

/// `[templates]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directories searched in order; earlier directories win.
    pub dirs: Vec<PathBuf>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from(constants::TEMPLATE_DIR)],
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `.sealpost.toml` is read if present and defaults are used otherwise.
    /// Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit file,
    /// `ConfigError::Parse` for malformed TOML, or a validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                Self::read(path)?
            }
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::read(&path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        debug!(
            backend = ?config.email.backend,
            gnupg = config.gnupg.enabled,
            "config parsed"
        );
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(home) = lookup(constants::GNUPG_HOME_ENV) {
            self.gnupg.home = Some(PathBuf::from(home));
        }
        if let Some(password) = lookup(constants::SMTP_PASSWORD_ENV) {
            self.email.password = Some(password);
        }
    }

    /// GnuPG home with a leading `~` expanded.
    pub fn gnupg_home(&self) -> Option<PathBuf> {
        self.gnupg.home.as_deref().map(expand_home)
    }

    /// Validate the configuration contents
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.email.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "email.port",
                reason: "must be non-zero".to_string(),
            }
            .into());
        }

        if self.email.backend == Backend::Smtp && self.email.host.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "email.host" }.into());
        }

        if self.email.backend == Backend::File && self.email.file_path.is_none() {
            return Err(ConfigError::MissingField {
                field: "email.file_path",
            }
            .into());
        }

        if self.email.from.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "email.from" }.into());
        }

        Ok(())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
