//! Mail transports.
//!
//! A transport delivers one `Message` at a time. `get_connection` builds
//! the configured backend and wraps it in a `Connection`, which handles
//! the caller's silent-failure flag.
//!
//! ## Backends
//!
//! - **smtp**: delivers through an SMTP relay (lettre)
//! - **console**: prints the formatted message to stdout
//! - **file**: writes one `.eml` file per message (lettre)
//! - **outbox**: keeps messages in memory; not selectable from config

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::config::{Backend, EmailConfig};
use crate::core::message::Message;
use crate::error::{Error, MailError, Result};

mod console;
mod file;
mod outbox;
mod smtp;

pub use console::ConsoleBackend;
pub use file::FileBackend;
pub use outbox::Outbox;
pub use smtp::SmtpBackend;

/// Something that can deliver a message.
///
/// Sending takes `&self` so one connection can be shared across the
/// per-recipient loop.
pub trait Transport {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Send` if delivery fails.
    fn send(&self, message: &Message) -> Result<()>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn send(&self, message: &Message) -> Result<()> {
        (**self).send(message)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// SMTP login.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A backend plus the silent-failure policy for this send.
pub struct Connection {
    backend: Box<dyn Transport>,
    fail_silently: bool,
}

impl Connection {
    pub fn new(backend: Box<dyn Transport>, fail_silently: bool) -> Self {
        Self {
            backend,
            fail_silently,
        }
    }

    pub fn fail_silently(&self) -> bool {
        self.fail_silently
    }
}

impl Transport for Connection {
    fn send(&self, message: &Message) -> Result<()> {
        match self.backend.send(message) {
            Err(Error::Mail(err @ (MailError::Send(_) | MailError::Connection(_))))
                if self.fail_silently =>
            {
                warn!(
                    backend = self.backend.name(),
                    error = %err,
                    "send failed, ignoring"
                );
                Ok(())
            }
            other => other,
        }
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Build a connection for the configured backend.
///
/// Explicit `credentials` win over `email.username`/`email.password`.
///
/// # Errors
///
/// Returns `MailError::Connection` if the backend cannot be set up.
pub fn get_connection(
    config: &EmailConfig,
    credentials: Option<Credentials>,
    fail_silently: bool,
) -> Result<Connection> {
    let credentials = credentials.or_else(|| match (&config.username, &config.password) {
        (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
        _ => None,
    });

    debug!(backend = ?config.backend, fail_silently, "opening connection");

    let backend: Box<dyn Transport> = match config.backend {
        Backend::Smtp => Box::new(SmtpBackend::new(config, credentials.as_ref())?),
        Backend::Console => Box::new(ConsoleBackend),
        Backend::File => {
            let dir = config.file_path.as_ref().ok_or_else(|| {
                MailError::Connection("file backend requires email.file_path".to_string())
            })?;
            Box::new(FileBackend::new(dir)?)
        }
    };

    Ok(Connection::new(backend, fail_silently))
}
