//! Sealpost - send email encrypted for each recipient's GPG key.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealpost::cli::output;
use sealpost::cli::{execute, Cli};
use sealpost::core::constants;
use sealpost::error::{ConfigError, Error, KeyError, TemplateError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealpost=debug")
        } else {
            EnvFilter::new("sealpost=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => Some("create .sealpost.toml or pass --config"),
            Error::Key(KeyError::Unavailable(_)) => {
                Some("install GnuPG or set gnupg.enabled = false")
            }
            Error::Template(TemplateError::NotFound(_)) => {
                Some("templates are searched under [templates] dirs")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
