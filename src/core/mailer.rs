//! Per-recipient encrypted sending.
//!
//! Every recipient gets their own message. When encryption is enabled and
//! the recipient's address is in the registry, the body, the HTML
//! alternative and every attachment are encrypted for that recipient
//! alone. Other recipients get the plaintext parts unchanged.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::KeyTool;
use crate::core::config::Config;
use crate::core::constants::HTML_MIME;
use crate::core::message::{Message, MessageKind};
use crate::core::registry::AddressRegistry;
use crate::core::template::{candidates, Context, TemplateRenderer};
use crate::core::transport::{get_connection, Connection, Credentials, Transport};
use crate::core::types::EmailAddress;
use crate::error::{Error, Result};

/// Recipient list; a single address becomes a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients(Vec<EmailAddress>);

impl Recipients {
    pub fn as_slice(&self) -> &[EmailAddress] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<EmailAddress> {
        self.0
    }
}

impl From<&str> for Recipients {
    fn from(addr: &str) -> Self {
        Self(vec![addr.to_string()])
    }
}

impl From<String> for Recipients {
    fn from(addr: String) -> Self {
        Self(vec![addr])
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addrs: Vec<String>) -> Self {
        Self(addrs)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addrs: Vec<&str>) -> Self {
        Self(addrs.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Recipients {
    fn from(addrs: &[&str]) -> Self {
        Self(addrs.iter().map(|a| a.to_string()).collect())
    }
}

impl From<&[String]> for Recipients {
    fn from(addrs: &[String]) -> Self {
        Self(addrs.to_vec())
    }
}

/// Arguments for one send call.
pub struct MailRequest<'a> {
    subject: String,
    body: String,
    html: Option<String>,
    from: Option<EmailAddress>,
    recipients: Recipients,
    fail_silently: bool,
    credentials: Option<Credentials>,
    connection: Option<&'a dyn Transport>,
    attachments: Vec<PathBuf>,
}

impl<'a> MailRequest<'a> {
    pub fn new(subject: impl Into<String>, recipients: impl Into<Recipients>) -> Self {
        Self {
            subject: subject.into(),
            body: String::new(),
            html: None,
            from: None,
            recipients: recipients.into(),
            fail_silently: false,
            credentials: None,
            connection: None,
            attachments: Vec::new(),
        }
    }

    /// Plain-text body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// HTML alternative.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sender; defaults to `email.from`.
    pub fn from(mut self, from: impl Into<EmailAddress>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Ignore transport-level send failures.
    pub fn fail_silently(mut self, fail_silently: bool) -> Self {
        self.fail_silently = fail_silently;
        self
    }

    /// Credentials for a newly opened connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Reuse an existing connection instead of opening one.
    pub fn connection(mut self, connection: &'a dyn Transport) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Attach a file by path.
    pub fn attach(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// Attach several files.
    pub fn attachments<P: Into<PathBuf>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.attachments.extend(paths.into_iter().map(Into::into));
        self
    }
}

/// Which recipients get encrypted copies.
#[derive(Debug, Clone, Default)]
pub struct EncryptionPlan {
    enabled: bool,
    keyed: BTreeSet<EmailAddress>,
}

impl EncryptionPlan {
    pub fn new(enabled: bool, keyed: BTreeSet<EmailAddress>) -> Self {
        Self { enabled, keyed }
    }

    /// Encrypt for `addr` only when the feature is on and `addr` has a key.
    pub fn should_encrypt(&self, addr: &str) -> bool {
        self.enabled && self.keyed.contains(addr)
    }

    /// Whether any recipient will be encrypted for.
    pub fn any(&self) -> bool {
        self.enabled && !self.keyed.is_empty()
    }
}

/// Sends mail through the registry, key tool and transport it is built with.
pub struct Mailer<'a> {
    config: &'a Config,
    registry: &'a dyn AddressRegistry,
    keys: &'a dyn KeyTool,
}

impl<'a> Mailer<'a> {
    pub fn new(config: &'a Config, registry: &'a dyn AddressRegistry, keys: &'a dyn KeyTool) -> Self {
        Self {
            config,
            registry,
            keys,
        }
    }

    /// Send one message per recipient, encrypted where a key is registered.
    ///
    /// Attachments are read up front; any unreadable file aborts the call
    /// before anything is sent.
    ///
    /// # Returns
    ///
    /// The number of messages dispatched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Attachment` for unreadable attachments,
    /// `KeyError` if encryption fails, and transport errors unless the
    /// request fails silently.
    pub fn send_mail(&self, request: MailRequest<'_>) -> Result<usize> {
        let MailRequest {
            subject,
            body,
            html,
            from,
            recipients,
            fail_silently,
            credentials,
            connection,
            attachments,
        } = request;

        let recipients = recipients.into_vec();
        if recipients.is_empty() {
            debug!("no recipients, nothing to send");
            return Ok(0);
        }

        let enabled = self.config.gnupg.enabled;
        let keyed = if enabled {
            self.registry.registered(&recipients)?
        } else {
            BTreeSet::new()
        };
        let plan = EncryptionPlan::new(enabled, keyed);
        if plan.any() {
            self.keys.ensure_available()?;
        }

        let parts = read_attachments(&attachments)?;

        let opened: Connection;
        let connection: &dyn Transport = match connection {
            Some(connection) => connection,
            None => {
                opened = get_connection(&self.config.email, credentials, fail_silently)?;
                &opened
            }
        };

        let html = html.filter(|h| !h.is_empty());
        let kind = if parts.is_empty() && html.is_none() {
            MessageKind::Plain
        } else {
            MessageKind::Multipart
        };
        let from = from.unwrap_or_else(|| self.config.email.from.clone());

        for addr in &recipients {
            let mut message = Message::new(
                kind,
                subject.clone(),
                self.seal_text(&plan, &body, addr)?,
                from.clone(),
                vec![addr.clone()],
            );
            if let Some(html) = &html {
                message.attach_alternative(self.seal_text(&plan, html, addr)?, HTML_MIME)?;
            }
            for (filename, content) in &parts {
                message.attach(filename.clone(), self.seal_bytes(&plan, content, addr)?);
            }

            connection.send(&message)?;
            info!(
                to = %addr,
                encrypted = plan.should_encrypt(addr),
                backend = connection.name(),
                "dispatched message"
            );
        }

        Ok(recipients.len())
    }

    /// Render `<template>.txt` (required) and `<template>.html` (optional)
    /// and send them.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotFound` if the text template is missing;
    /// nothing is sent in that case.
    pub fn send_mail_template(
        &self,
        renderer: &dyn TemplateRenderer,
        template: &str,
        context: Option<&Context>,
        request: MailRequest<'_>,
    ) -> Result<usize> {
        let empty = Context::new();
        let context = context.unwrap_or(&empty);

        let text = renderer.select_and_render(&candidates(&format!("{}.txt", template)), context)?;
        let html = match renderer.select_and_render(&candidates(&format!("{}.html", template)), context)
        {
            Ok(html) => Some(html),
            Err(Error::Template(e)) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        let mut request = request.body(text);
        request.html = html;
        self.send_mail(request)
    }

    fn seal_text(&self, plan: &EncryptionPlan, text: &str, addr: &str) -> Result<String> {
        if plan.should_encrypt(addr) {
            self.keys.encrypt(text.as_bytes(), addr)
        } else {
            Ok(text.to_string())
        }
    }

    fn seal_bytes(&self, plan: &EncryptionPlan, content: &[u8], addr: &str) -> Result<Vec<u8>> {
        if plan.should_encrypt(addr) {
            Ok(self.keys.encrypt(content, addr)?.into_bytes())
        } else {
            Ok(content.to_vec())
        }
    }
}

/// Read each attachment into `(base filename, bytes)`.
fn read_attachments(paths: &[PathBuf]) -> Result<Vec<(String, Vec<u8>)>> {
    paths
        .iter()
        .map(|path| {
            let content = std::fs::read(path).map_err(|source| Error::Attachment {
                path: path.clone(),
                source,
            })?;
            Ok((base_name(path), content))
        })
        .collect()
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
