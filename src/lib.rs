//! Sealpost - send email encrypted for each recipient's GPG key.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── send          # send / template commands
//! │   ├── key           # key import / rm / list
//! │   ├── addresses     # registry listing
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .sealpost.toml management
//!     ├── cipher/       # Key tool trait + gpg implementation
//!     ├── keys          # Key-to-address inspection, import/remove
//!     ├── registry/     # Address registry trait + TOML file store
//!     ├── message       # Outgoing message and lettre conversion
//!     ├── transport/    # smtp, console, file and in-memory backends
//!     ├── template      # tera-backed template lookup
//!     └── mailer        # send_mail / send_mail_template
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sealpost::core::cipher::Gpg;
//! use sealpost::core::config::Config;
//! use sealpost::core::mailer::{MailRequest, Mailer};
//! use sealpost::core::registry::FileRegistry;
//!
//! # fn main() -> sealpost::error::Result<()> {
//! let config = Config::load(None)?;
//! let registry = FileRegistry::open(&config.gnupg.registry)?;
//! let gpg = Gpg::from_config(&config);
//!
//! Mailer::new(&config, &registry, &gpg).send_mail(
//!     MailRequest::new("Quarterly numbers", vec!["alice@example.com", "bob@example.com"])
//!         .body("Numbers attached.")
//!         .attach("q3.pdf"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
