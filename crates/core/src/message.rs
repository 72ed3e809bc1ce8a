//! Messages in a conversation.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};

/// Identifier of a message, unique and strictly increasing within one
/// conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Returns the raw value of this id.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "msg:{}", self.0)
    }
}

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing.
    User,
    /// The backend.
    Assistant,
}

/// A single entry in the transcript.
///
/// Messages are immutable once created. The timestamp is taken when the
/// message is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message stamped with the current time.
    #[inline]
    pub fn new<S: Into<String>>(
        id: MessageId,
        text: S,
        sender: Sender,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Returns the id of this message.
    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns who authored this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns when this message was created.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Hands out message ids from a counter.
///
/// Ids never depend on the clock, so two messages created in the same
/// instant still get distinct, ordered ids.
#[derive(Debug)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Creates a sequence whose first id is 1.
    #[inline]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next id.
    #[inline]
    pub fn next_id(&mut self) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let mut seq = IdSequence::new();
        let ids: Vec<_> = (0..100).map(|_| seq.next_id()).collect();
        assert_eq!(ids[0].get(), 1);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_instant_messages() {
        let mut seq = IdSequence::new();
        let question = Message::new(seq.next_id(), "Hi", Sender::User);
        let answer = Message::new(seq.next_id(), "Hi there", Sender::Assistant);
        assert!(answer.id() > question.id());
        assert!(answer.timestamp() >= question.timestamp());
        assert_eq!(answer.id().to_string(), "msg:2");
    }
}
