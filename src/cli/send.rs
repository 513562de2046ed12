//! Send commands.
//!
//! `send` takes the body directly; `template` renders it first.

use std::path::{Path, PathBuf};

use crate::cli::{output, DeliveryArgs};
use crate::core::cipher::Gpg;
use crate::core::config::Config;
use crate::core::mailer::{MailRequest, Mailer};
use crate::core::registry::FileRegistry;
use crate::core::template::{Context, TeraRenderer};
use crate::error::{Result, TemplateError};

/// Send a message built from command-line arguments.
pub fn send(
    config_path: Option<&Path>,
    subject: &str,
    body: Option<String>,
    body_file: Option<PathBuf>,
    html_file: Option<PathBuf>,
    delivery: DeliveryArgs,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = FileRegistry::open(&config.gnupg.registry)?;
    let gpg = Gpg::from_config(&config);

    let body = match (body, body_file) {
        (Some(body), _) => body,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let mut request = request(subject, delivery).body(body);
    if let Some(path) = html_file {
        request = request.html(std::fs::read_to_string(path)?);
    }

    let sent = Mailer::new(&config, &registry, &gpg).send_mail(request)?;
    output::success(&format!("sent {}", output::count(sent, "message", "messages")));
    Ok(())
}

/// Render a template pair and send it.
pub fn template(
    config_path: Option<&Path>,
    subject: &str,
    template: &str,
    context: Option<String>,
    context_file: Option<PathBuf>,
    delivery: DeliveryArgs,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = FileRegistry::open(&config.gnupg.registry)?;
    let gpg = Gpg::from_config(&config);
    let renderer = TeraRenderer::from_dirs(&config.templates.dirs)?;

    let raw = match (context, context_file) {
        (Some(json), _) => Some(json),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) => None,
    };
    let context = raw.as_deref().map(parse_context).transpose()?;

    let sent = Mailer::new(&config, &registry, &gpg).send_mail_template(
        &renderer,
        template,
        context.as_ref(),
        request(subject, delivery),
    )?;
    output::success(&format!("sent {}", output::count(sent, "message", "messages")));
    Ok(())
}

fn request(subject: &str, delivery: DeliveryArgs) -> MailRequest<'static> {
    let DeliveryArgs {
        to,
        from,
        attachments,
        fail_silently,
        auth_user,
        auth_password,
    } = delivery;

    let mut request = MailRequest::new(subject, to)
        .attachments(attachments)
        .fail_silently(fail_silently);
    if let Some(from) = from {
        request = request.from(from);
    }
    if let (Some(user), Some(password)) = (auth_user, auth_password) {
        request = request.auth(user, password);
    }
    request
}

/// Parse a JSON object into a rendering context.
fn parse_context(json: &str) -> Result<Context> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(TemplateError::Context("context must be a JSON object".to_string()).into());
    }
    Context::from_value(value).map_err(|e| TemplateError::Context(e.to_string()).into())
}
