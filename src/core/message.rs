//! Outgoing message representation.
//!
//! A `Message` is what the mailer builds per recipient and what transports
//! send. It converts to a `lettre::Message` for the wire.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};

use crate::core::types::EmailAddress;
use crate::error::{MailError, Result};

/// Plain messages carry a single text body (plus optional attachments);
/// multipart messages may also carry alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Plain,
    Multipart,
}

/// Alternative rendering of the body, e.g. HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub content: String,
    pub mimetype: String,
}

/// Named binary part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub mimetype: String,
}

impl Attachment {
    /// Create an attachment, guessing the MIME type from the filename.
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        let filename = filename.into();
        let mimetype = mime_guess::from_path(&filename)
            .first()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self {
            filename,
            content,
            mimetype,
        }
    }
}

/// An email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    subject: String,
    body: String,
    from: EmailAddress,
    to: Vec<EmailAddress>,
    alternatives: Vec<Alternative>,
    attachments: Vec<Attachment>,
}

impl Message {
    pub fn new(
        kind: MessageKind,
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<EmailAddress>,
        to: Vec<EmailAddress>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
            alternatives: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Attach an alternative body.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Build` on a plain message.
    pub fn attach_alternative(
        &mut self,
        content: impl Into<String>,
        mimetype: impl Into<String>,
    ) -> Result<()> {
        if self.kind != MessageKind::Multipart {
            return Err(
                MailError::Build("alternatives require a multipart message".to_string()).into(),
            );
        }
        self.alternatives.push(Alternative {
            content: content.into(),
            mimetype: mimetype.into(),
        });
        Ok(())
    }

    /// Attach a named binary part.
    pub fn attach(&mut self, filename: impl Into<String>, content: Vec<u8>) {
        self.attachments.push(Attachment::new(filename, content));
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// The `text/html` alternative, if any.
    pub fn html(&self) -> Option<&str> {
        self.alternatives
            .iter()
            .find(|a| a.mimetype == crate::core::constants::HTML_MIME)
            .map(|a| a.content.as_str())
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Build the wire message.
    ///
    /// # Errors
    ///
    /// Returns `MailError::InvalidAddress` for unparsable addresses,
    /// `MailError::NoRecipients` for an empty `to`, or `MailError::Build`.
    pub fn to_lettre(&self) -> Result<lettre::Message> {
        if self.to.is_empty() {
            return Err(MailError::NoRecipients.into());
        }

        let mut builder = lettre::Message::builder()
            .from(parse_mailbox(&self.from)?)
            .subject(self.subject.clone());
        for addr in &self.to {
            builder = builder.to(parse_mailbox(addr)?);
        }

        let text = SinglePart::plain(self.body.clone());
        let content = if self.alternatives.is_empty() {
            Content::Single(text)
        } else {
            let mut alternative = MultiPart::alternative().singlepart(text);
            for alt in &self.alternatives {
                alternative = alternative.singlepart(
                    SinglePart::builder()
                        .header(parse_content_type(&alt.mimetype)?)
                        .body(alt.content.clone()),
                );
            }
            Content::Multi(alternative)
        };

        let built = if self.attachments.is_empty() {
            match content {
                Content::Single(part) => builder.singlepart(part),
                Content::Multi(part) => builder.multipart(part),
            }
        } else {
            let mut mixed = match content {
                Content::Single(part) => MultiPart::mixed().singlepart(part),
                Content::Multi(part) => MultiPart::mixed().multipart(part),
            };
            for attachment in &self.attachments {
                mixed = mixed.singlepart(MimeAttachment::new(attachment.filename.clone()).body(
                    attachment.content.clone(),
                    parse_content_type(&attachment.mimetype)?,
                ));
            }
            builder.multipart(mixed)
        };

        built.map_err(|e| MailError::Build(e.to_string()).into())
    }
}

enum Content {
    Single(SinglePart),
    Multi(MultiPart),
}

fn parse_mailbox(addr: &str) -> Result<Mailbox> {
    addr.parse()
        .map_err(|_| MailError::InvalidAddress(addr.to_string()).into())
}

fn parse_content_type(mimetype: &str) -> Result<ContentType> {
    ContentType::parse(mimetype)
        .map_err(|e| MailError::Build(format!("bad content type {}: {}", mimetype, e)).into())
}
