//! File backend: one `.eml` file per message.

use std::path::{Path, PathBuf};

use lettre::{FileTransport, Transport as _};
use tracing::debug;

use super::Transport;
use crate::core::message::Message;
use crate::error::{MailError, Result};

/// Writes messages into a directory.
pub struct FileBackend {
    dir: PathBuf,
    transport: FileTransport,
}

impl FileBackend {
    /// Create the backend, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            MailError::Connection(format!("cannot create {}: {}", dir.display(), e))
        })?;
        Ok(Self {
            transport: FileTransport::new(&dir),
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Transport for FileBackend {
    fn send(&self, message: &Message) -> Result<()> {
        let email = message.to_lettre()?;
        let id = self
            .transport
            .send(&email)
            .map_err(|e| MailError::Send(e.to_string()))?;
        debug!(id = %id, dir = %self.dir.display(), "wrote message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
