use serde::{Deserialize, Serialize};

/// A message sent to the chat backend.
///
/// The message text is the only field on the wire:
/// `{ "message": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

impl ChatRequest {
    /// Creates a request carrying `message`.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A successful answer from the chat backend: `{ "reply": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub reply: String,
}

impl ChatReply {
    /// Creates a reply carrying `reply`.
    #[inline]
    pub fn new<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}
