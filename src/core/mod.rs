//! Core library components.
//!
//! This module contains the reusable logic for per-recipient encrypted
//! sending: key inspection, the address registry, message construction,
//! transports and template rendering.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod keys;
pub mod mailer;
pub mod message;
pub mod registry;
pub mod template;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
