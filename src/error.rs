//! Error types.
//!
//! Each subsystem has its own error enum; `Error` wraps them so every
//! function can return `crate::error::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("cannot read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// Key tool (gpg) errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("gpg not available: {0}")]
    Unavailable(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("listing keys failed: {0}")]
    ListFailed(String),

    #[error("key import failed: {0}")]
    ImportFailed(String),

    #[error("key removal failed: {0}")]
    DeleteFailed(String),
}

/// Address registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write registry: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse registry: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] toml::ser::Error),
}

/// Message construction and transport errors.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("no recipients given")]
    NoRecipients,

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to open connection: {0}")]
    Connection(String),

    #[error("send failed: {0}")]
    Send(String),
}

/// Template lookup and rendering errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template not found: {}", .0.join(", "))]
    NotFound(Vec<String>),

    #[error("failed to load templates: {0}")]
    Load(String),

    #[error("failed to render {name}: {reason}")]
    Render { name: String, reason: String },

    #[error("invalid template context: {0}")]
    Context(String),
}

impl TemplateError {
    /// Whether this is the "no candidate template exists" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
