//! A terminal chat client: configuration, input composing and rendering
//! around the conversation logic in [`chatline_core`].
//!
//! The crate includes a CLI for use in the terminal. The pieces are also
//! usable as a library by other front ends.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod input;
pub mod render;
mod session;

pub use session::Session;

/// Re-exports of [`chatline_core`] crate.
pub mod core {
    pub use chatline_core::*;
}
