//! Console backend: prints messages instead of sending them.

use std::io::Write;

use super::Transport;
use crate::core::message::Message;
use crate::error::{MailError, Result};

const SEPARATOR_WIDTH: usize = 79;

/// Writes each formatted message to stdout, followed by a separator line.
pub struct ConsoleBackend;

impl Transport for ConsoleBackend {
    fn send(&self, message: &Message) -> Result<()> {
        let formatted = message.to_lettre()?.formatted();

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&formatted)
            .and_then(|_| writeln!(stdout, "\n{}", "-".repeat(SEPARATOR_WIDTH)))
            .and_then(|_| stdout.flush())
            .map_err(|e| MailError::Send(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
