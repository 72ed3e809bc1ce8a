use std::fmt::Debug;

use tokio::sync::mpsc;

use super::state::ConversationState;

/// A command that the conversation task can handle.
pub trait Command: Send + Debug + 'static {
    /// Handles the command with mutable access to the conversation state.
    fn handle(
        self: Box<Self>,
        state: &mut ConversationState,
        mailbox: &Mailbox,
    );
}

type CommandTx = mpsc::UnboundedSender<Box<dyn Command>>;
type CommandRx = mpsc::UnboundedReceiver<Box<dyn Command>>;
type WeakCommandTx = mpsc::WeakUnboundedSender<Box<dyn Command>>;

/// Sending side of the conversation task's command queue.
#[derive(Clone)]
pub struct Mailbox {
    tx: CommandTx,
}

/// Returned by [`Mailbox::send`] when the conversation task has ended.
#[derive(Debug)]
pub struct MailboxClosed;

impl Mailbox {
    #[inline]
    pub fn new() -> (Mailbox, CommandRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Mailbox { tx }, rx)
    }

    #[inline]
    pub fn send<C: Command>(&self, cmd: C) -> Result<(), MailboxClosed> {
        self.tx.send(Box::new(cmd)).map_err(|_| MailboxClosed)
    }

    #[inline]
    pub fn downgrade(&self) -> WeakCommandTx {
        self.tx.downgrade()
    }
}

/// Runs the conversation task until every [`Mailbox`] is dropped.
///
/// Commands are handled one at a time, in the order they were sent. A
/// handler never awaits; anything asynchronous is spawned and reports back
/// through another command.
pub async fn run_conversation(
    weak_tx: WeakCommandTx,
    mut state: ConversationState,
    mut cmd_rx: CommandRx,
) {
    debug!("started");
    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");

        let Some(tx) = weak_tx.upgrade() else {
            warn!("last mailbox has been dropped, discard the command");
            break;
        };

        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            cmd.handle(&mut state, &Mailbox { tx });
            trace!("finished");
        });
    }
    debug!("will terminate");
}
