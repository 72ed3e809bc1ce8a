use std::fmt::{self, Debug};

use chatline_transport::ChatRequest;
use tokio::sync::{oneshot, watch};

use super::mailbox::{Command, Mailbox};
use super::{ConversationView, FALLBACK_REPLY, IgnoreReason, SubmitOutcome};
use crate::message::{IdSequence, Message, Sender};
use crate::transcript::Transcript;
use crate::transport_client::{SendResult, TransportClient};

/// Everything the conversation task owns.
///
/// Only command handlers touch this, so every mutation happens on one task
/// and in mailbox order.
pub struct ConversationState {
    pub(super) transport: TransportClient,
    pub(super) transcript: Transcript,
    pub(super) pending: bool,
    pub(super) draft: String,
    pub(super) ids: IdSequence,
    pub(super) waiter: Option<oneshot::Sender<SubmitOutcome>>,
    pub(super) view_tx: watch::Sender<ConversationView>,
    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ConversationState {
    fn submit(
        &mut self,
        text: String,
        done: oneshot::Sender<SubmitOutcome>,
        mailbox: &Mailbox,
    ) {
        if text.trim().is_empty() {
            trace!("ignoring empty input");
            done.send(SubmitOutcome::Ignored(IgnoreReason::EmptyInput))
                .ok();
            return;
        }
        if self.pending {
            // At most one request may be in flight.
            debug!("ignoring input while awaiting a reply");
            done.send(SubmitOutcome::Ignored(IgnoreReason::AwaitingReply))
                .ok();
            return;
        }

        let message =
            Message::new(self.ids.next_id(), text.clone(), Sender::User);
        debug!("accepted user message {}", message.id());
        self.transcript.append(message);

        self.draft.clear();
        self.pending = true;
        self.waiter = Some(done);
        self.publish();

        let fut = self.transport.spawn_send(ChatRequest::new(text));
        let mailbox = mailbox.clone();
        tokio::spawn(async move {
            let result = fut.await;
            mailbox.send(TransportFinished(result)).ok();
        });
    }

    fn finish(&mut self, result: SendResult) {
        if !self.pending {
            warn!("got a transport result with no request in flight");
            return;
        }

        let (text, outcome) = match result {
            Ok(reply) => (reply.reply, SubmitOutcome::Replied),
            Err(err) => {
                warn!("falling back after transport failure: {err}");
                (FALLBACK_REPLY.to_owned(), SubmitOutcome::Failed)
            }
        };

        let message =
            Message::new(self.ids.next_id(), text, Sender::Assistant);
        debug!("appended assistant message {}", message.id());
        self.transcript.append(message);

        self.pending = false;
        self.publish();

        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
        if let Some(waiter) = self.waiter.take() {
            waiter.send(outcome).ok();
        }
    }

    fn set_draft(&mut self, draft: String) {
        if self.draft == draft {
            return;
        }
        self.draft = draft;
        self.publish();
    }

    pub(super) fn view(&self) -> ConversationView {
        ConversationView {
            messages: self.transcript.snapshot(),
            pending: self.pending,
            draft: self.draft.clone(),
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}

#[derive(Debug)]
pub struct Submit {
    pub text: String,
    pub done: oneshot::Sender<SubmitOutcome>,
}

impl Command for Submit {
    fn handle(
        self: Box<Self>,
        state: &mut ConversationState,
        mailbox: &Mailbox,
    ) {
        let Submit { text, done } = *self;
        state.submit(text, done, mailbox);
    }
}

#[derive(Debug)]
pub struct SubmitDraft {
    pub done: oneshot::Sender<SubmitOutcome>,
}

impl Command for SubmitDraft {
    fn handle(
        self: Box<Self>,
        state: &mut ConversationState,
        mailbox: &Mailbox,
    ) {
        let text = state.draft.clone();
        state.submit(text, self.done, mailbox);
    }
}

#[derive(Debug)]
pub struct SetDraft(pub String);

impl Command for SetDraft {
    #[inline]
    fn handle(
        self: Box<Self>,
        state: &mut ConversationState,
        _mailbox: &Mailbox,
    ) {
        state.set_draft(self.0);
    }
}

struct TransportFinished(SendResult);

impl Debug for TransportFinished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransportFinished")
            .field(&self.0.as_ref().map(|reply| &reply.reply))
            .finish()
    }
}

impl Command for TransportFinished {
    #[inline]
    fn handle(
        self: Box<Self>,
        state: &mut ConversationState,
        _mailbox: &Mailbox,
    ) {
        state.finish(self.0);
    }
}
