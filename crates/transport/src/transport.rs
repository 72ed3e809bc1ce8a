use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{ChatReply, ChatRequest};

/// The error type for a chat transport.
pub trait TransportError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that carries a single chat message to a backend and brings the
/// reply back.
///
/// Once the transport is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the transport should be prepared for being dropped anytime.
pub trait ChatTransport: Send + Sync {
    /// The error type that may be returned by the transport.
    type Error: TransportError;

    /// Sends a message and resolves with the backend's reply.
    ///
    /// The returned future must not borrow `self` or `req`, so callers can
    /// drive it on another task.
    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
