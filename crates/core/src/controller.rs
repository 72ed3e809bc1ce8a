mod builder;
mod mailbox;
mod state;

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tracing::Instrument;

use crate::message::{IdSequence, Message};
use crate::transcript::Transcript;
pub use builder::ControllerBuilder;
use mailbox::{Mailbox, run_conversation};
use state::{ConversationState, SetDraft, Submit, SubmitDraft};

/// The assistant message shown in place of a reply when the transport
/// fails for any reason.
pub const FALLBACK_REPLY: &str = "Error connecting to backend.";

/// Whether the conversation is waiting on the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No request in flight; input is accepted.
    Idle,
    /// One request is in flight; input is ignored until it resolves.
    AwaitingReply,
}

/// Why a submission was not sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The text was empty or whitespace only.
    EmptyInput,
    /// Another message is still waiting for its reply.
    AwaitingReply,
    /// The conversation task is gone.
    Closed,
}

/// How a call to [`Controller::submit`] settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// Nothing happened; the transcript and the pending flag are untouched.
    Ignored(IgnoreReason),
    /// The backend replied and its text was appended.
    Replied,
    /// The transport failed and [`FALLBACK_REPLY`] was appended.
    Failed,
}

impl SubmitOutcome {
    /// Returns `true` if the message was sent, whatever came back.
    #[inline]
    pub fn is_accepted(self) -> bool {
        !matches!(self, SubmitOutcome::Ignored(_))
    }
}

/// A read-only snapshot of the conversation, for rendering.
#[derive(Clone, Debug)]
pub struct ConversationView {
    messages: Arc<[Message]>,
    pending: bool,
    draft: String,
}

impl ConversationView {
    fn empty() -> Self {
        Self {
            messages: Transcript::default().snapshot(),
            pending: false,
            draft: String::new(),
        }
    }

    /// Messages in conversational order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns `true` while a request is in flight.
    #[inline]
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Unsent input.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns `true` if no message has been exchanged yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the current phase of the state machine.
    #[inline]
    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::AwaitingReply
        } else {
            Phase::Idle
        }
    }
}

/// Handle to a running conversation.
///
/// The conversation state lives on its own task. Every handle talks to
/// that task through a mailbox, so commands from any number of clones are
/// applied one at a time, in the order they were sent. Reading the state
/// goes through a [`watch`] channel and never waits on the backend.
///
/// The task stops once all handles are dropped.
#[derive(Clone)]
pub struct Controller {
    mailbox: Mailbox,
    view_rx: watch::Receiver<ConversationView>,
}

impl Controller {
    /// Sends `text` as a user message and waits for the exchange to settle.
    ///
    /// Empty input, or input while another message is awaiting its reply,
    /// is ignored. Otherwise the user message is appended and the pending
    /// flag raised before the backend is called, and exactly one assistant
    /// message is appended when it answers or fails. Transport failures are
    /// never returned as errors.
    pub async fn submit<S: Into<String>>(&self, text: S) -> SubmitOutcome {
        let (done, rx) = oneshot::channel();
        let cmd = Submit {
            text: text.into(),
            done,
        };
        if self.mailbox.send(cmd).is_err() {
            return SubmitOutcome::Ignored(IgnoreReason::Closed);
        }
        rx.await
            .unwrap_or(SubmitOutcome::Ignored(IgnoreReason::Closed))
    }

    /// Submits the current draft. See [`Controller::submit`].
    pub async fn submit_draft(&self) -> SubmitOutcome {
        let (done, rx) = oneshot::channel();
        if self.mailbox.send(SubmitDraft { done }).is_err() {
            return SubmitOutcome::Ignored(IgnoreReason::Closed);
        }
        rx.await
            .unwrap_or(SubmitOutcome::Ignored(IgnoreReason::Closed))
    }

    /// Replaces the unsent input.
    #[inline]
    pub fn set_draft<S: Into<String>>(&self, draft: S) {
        self.mailbox.send(SetDraft(draft.into())).ok();
    }

    /// Returns the latest snapshot of the conversation.
    #[inline]
    pub fn view(&self) -> ConversationView {
        self.view_rx.borrow().clone()
    }

    /// Returns a receiver that is notified whenever the conversation
    /// changes.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<ConversationView> {
        self.view_rx.clone()
    }

    /// Waits until no request is in flight.
    pub async fn wait_idle(&self) {
        let mut rx = self.view_rx.clone();
        // An error means the task is gone, which is idle enough.
        rx.wait_for(|view| !view.pending()).await.ok();
    }

    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder { transport, on_idle } = builder;

        let (view_tx, view_rx) = watch::channel(ConversationView::empty());
        let state = ConversationState {
            transport,
            transcript: Transcript::default(),
            pending: false,
            draft: String::new(),
            ids: IdSequence::new(),
            waiter: None,
            view_tx,
            on_idle,
        };

        let (mailbox, cmd_rx) = Mailbox::new();
        tokio::spawn(
            run_conversation(mailbox.downgrade(), state, cmd_rx)
                .instrument(trace_span!("conversation")),
        );
        Self { mailbox, view_rx }
    }
}
