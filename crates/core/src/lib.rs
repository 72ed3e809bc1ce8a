//! Conversation logic: the transcript, the pending flag, and the rules that
//! reconcile backend replies into them.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
pub mod message;
pub mod transcript;
mod transport_client;

pub use controller::{
    Controller, ControllerBuilder, ConversationView, FALLBACK_REPLY,
    IgnoreReason, Phase, SubmitOutcome,
};
pub use message::{Message, MessageId, Sender};
pub use transcript::Transcript;
