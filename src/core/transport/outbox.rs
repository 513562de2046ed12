//! In-memory backend.

use std::cell::RefCell;

use super::Transport;
use crate::core::message::Message;
use crate::error::{MailError, Result};

/// Collects sent messages in memory.
///
/// Useful for tests and for callers that want to inspect what would be
/// sent. A failing outbox rejects every message.
#[derive(Default)]
pub struct Outbox {
    messages: RefCell<Vec<Message>>,
    fail: bool,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// An outbox whose every send fails with `MailError::Send`.
    pub fn failing() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages sent so far, in order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Transport for Outbox {
    fn send(&self, message: &Message) -> Result<()> {
        if self.fail {
            return Err(MailError::Send("outbox rejects all messages".to_string()).into());
        }
        self.messages.borrow_mut().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "outbox"
    }
}
