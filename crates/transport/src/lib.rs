//! The contract between a chat client and its backend.
//!
//! A chat backend takes one user message and answers with one reply. This
//! crate pins down the shape of that exchange so the conversation logic can
//! talk to an HTTP endpoint, an in-process fake, or anything else without
//! knowing which one it is.
//!
//! Types in this crate don't define any behavior. Implementors live in
//! their own crates.

#![deny(missing_docs)]

mod error;
mod request;
mod transport;

pub use error::*;
pub use request::*;
pub use transport::*;
