//! Command-line interface.

pub mod addresses;
pub mod completions;
pub mod key;
pub mod output;
pub mod send;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants;

/// Sealpost - send email encrypted for each recipient's GPG key.
#[derive(Parser)]
#[command(
    name = "sealpost",
    about = "Send email encrypted for each recipient's GPG key",
    version
)]
pub struct Cli {
    /// Config file (default: ./.sealpost.toml)
    #[arg(long, global = true, env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Recipient and delivery options shared by `send` and `template`.
#[derive(Args, Debug, Clone)]
pub struct DeliveryArgs {
    /// Recipient address (repeatable)
    #[arg(long, required = true, num_args = 1..)]
    pub to: Vec<String>,

    /// Sender address (default: email.from)
    #[arg(long)]
    pub from: Option<String>,

    /// File to attach (repeatable)
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Ignore transport errors
    #[arg(long)]
    pub fail_silently: bool,

    /// SMTP username (overrides email.username)
    #[arg(long, requires = "auth_password")]
    pub auth_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SEALPOST_AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Send a message, encrypted per recipient where a key is registered
    Send {
        /// Subject line
        #[arg(long)]
        subject: String,
        /// Plain-text body
        #[arg(long, conflicts_with = "body_file", required_unless_present = "body_file")]
        body: Option<String>,
        /// Read the plain-text body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Read an HTML alternative from a file
        #[arg(long)]
        html_file: Option<PathBuf>,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },

    /// Render <NAME>.txt and optional <NAME>.html, then send
    Template {
        /// Subject line
        #[arg(long)]
        subject: String,
        /// Template base name (without extension)
        #[arg(long)]
        template: String,
        /// Rendering context as a JSON object
        #[arg(long, conflicts_with = "context_file")]
        context: Option<String>,
        /// Read the rendering context from a JSON file
        #[arg(long)]
        context_file: Option<PathBuf>,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },

    /// Manage recipient keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// List registered addresses
    Addresses {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Key subcommands.
#[derive(Subcommand)]
pub enum KeyAction {
    /// Import a public key and register its addresses
    Import {
        /// Path to the key file (armored or binary `gpg --export` output)
        path: PathBuf,
    },

    /// Delete a key and unregister its addresses
    Rm {
        /// Key fingerprint
        fingerprint: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List keys in the keyring
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> crate::error::Result<()> {
    use Command::*;

    let config = config.as_deref();
    match command {
        Send {
            subject,
            body,
            body_file,
            html_file,
            delivery,
        } => send::send(config, &subject, body, body_file, html_file, delivery),
        Template {
            subject,
            template,
            context,
            context_file,
            delivery,
        } => send::template(config, &subject, &template, context, context_file, delivery),
        Key { action } => match action {
            KeyAction::Import { path } => key::import(config, &path),
            KeyAction::Rm { fingerprint, yes } => key::rm(config, &fingerprint, yes),
            KeyAction::List { json } => key::list(config, json),
        },
        Addresses { json } => addresses::execute(config, json),
        Completions { shell } => completions::execute(shell),
    }
}
