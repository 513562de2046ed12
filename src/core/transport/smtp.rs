//! SMTP backend.

use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{SmtpTransport, Transport as _};
use tracing::trace;

use super::{Credentials, Transport};
use crate::core::config::{EmailConfig, Security};
use crate::core::message::Message;
use crate::error::{MailError, Result};

/// Delivers through an SMTP relay.
///
/// lettre connects on first send, so building never touches the network.
pub struct SmtpBackend {
    transport: SmtpTransport,
}

impl SmtpBackend {
    /// Build from the `[email]` section.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Connection` if the TLS parameters cannot be built.
    pub fn new(config: &EmailConfig, credentials: Option<&Credentials>) -> Result<Self> {
        let builder = match config.security {
            Security::None => SmtpTransport::builder_dangerous(&config.host),
            Security::Starttls => SmtpTransport::starttls_relay(&config.host)
                .map_err(|e| MailError::Connection(e.to_string()))?,
            Security::Tls => SmtpTransport::relay(&config.host)
                .map_err(|e| MailError::Connection(e.to_string()))?,
        };

        let mut builder = builder.port(config.port);
        if let Some(credentials) = credentials {
            builder = builder.credentials(SmtpCredentials::new(
                credentials.username().to_string(),
                credentials.password().to_string(),
            ));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Some(Duration::from_secs(secs)));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl Transport for SmtpBackend {
    fn send(&self, message: &Message) -> Result<()> {
        let email = message.to_lettre()?;
        self.transport
            .send(&email)
            .map_err(|e| MailError::Send(e.to_string()))?;
        trace!(to = ?message.to(), "smtp accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
