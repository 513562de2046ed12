//! Constants used throughout sealpost.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.sealpost.toml).
pub const CONFIG_FILE: &str = ".sealpost.toml";

/// Default address registry location, relative to the working directory.
pub const REGISTRY_FILE: &str = ".sealpost/addresses.toml";

/// Namespace directory searched before the bare template name.
pub const TEMPLATE_NAMESPACE: &str = "sealpost";

/// Default template directory.
pub const TEMPLATE_DIR: &str = "templates";

/// Sender used when neither the request nor the config names one.
pub const DEFAULT_FROM: &str = "webmaster@localhost";

/// Default SMTP host and port (plain, unauthenticated local relay).
pub const DEFAULT_SMTP_HOST: &str = "localhost";
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SEALPOST_CONFIG";

/// Environment variable overriding `gnupg.home`.
pub const GNUPG_HOME_ENV: &str = "SEALPOST_GNUPG_HOME";

/// Environment variable overriding `email.password`.
pub const SMTP_PASSWORD_ENV: &str = "SEALPOST_SMTP_PASSWORD";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SEALPOST_LOG";

/// MIME type of the HTML alternative.
pub const HTML_MIME: &str = "text/html";
