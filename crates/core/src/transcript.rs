//! The ordered, append-only list of messages.

use std::sync::Arc;

use crate::message::Message;

/// Holds the messages of a conversation in the order they were appended.
///
/// The transcript never reorders, edits or removes entries. It doesn't
/// validate ids either; keeping them unique and increasing is up to
/// whoever appends.
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    items: Vec<Message>,
}

impl Transcript {
    /// Adds a message to the end.
    #[inline]
    pub fn append(&mut self, message: Message) {
        self.items.push(message);
    }

    /// Returns the current messages, oldest first.
    ///
    /// The snapshot is detached from the transcript, so it stays valid
    /// after further appends.
    pub fn snapshot(&self) -> Arc<[Message]> {
        Arc::from(self.items.as_slice())
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.items.last()
    }

    /// Iterates over the messages, oldest first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{IdSequence, Sender};

    #[test]
    fn test_append_keeps_order() {
        let mut ids = IdSequence::new();
        let mut transcript = Transcript::default();
        assert!(transcript.is_empty());

        transcript.append(Message::new(ids.next_id(), "one", Sender::User));
        transcript
            .append(Message::new(ids.next_id(), "two", Sender::Assistant));
        transcript.append(Message::new(ids.next_id(), "three", Sender::User));

        let texts: Vec<_> = transcript.iter().map(Message::text).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(transcript.last().map(Message::text), Some("three"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut ids = IdSequence::new();
        let mut transcript = Transcript::default();
        transcript.append(Message::new(ids.next_id(), "first", Sender::User));

        let before = transcript.snapshot();
        transcript.append(Message::new(ids.next_id(), "second", Sender::User));

        assert_eq!(before.len(), 1);
        assert_eq!(transcript.snapshot().len(), 2);
        assert_eq!(before[0], transcript.snapshot()[0]);
    }
}
