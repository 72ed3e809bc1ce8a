use chatline_core::{Controller, ControllerBuilder, SubmitOutcome};
use chatline_http_transport::HttpTransport;
use chatline_transport::ChatTransport;

use crate::config::Config;
use crate::input::{Composed, Composer};

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session couples a [`Composer`] with a [`Controller`]: every line
/// typed updates the shared draft, and a completed message is submitted
/// from that draft.
pub struct Session {
    controller: Controller,
    composer: Composer,
}

impl Session {
    /// Creates a session talking to the backend named by `config`.
    #[inline]
    pub fn from_config(config: &Config) -> Self {
        Self::with_transport(HttpTransport::new(config.transport_config()))
    }

    /// Creates a session over any chat transport.
    pub fn with_transport<T: ChatTransport + 'static>(transport: T) -> Self {
        let controller = ControllerBuilder::with_transport(transport).build();
        Self {
            controller,
            composer: Composer::default(),
        }
    }

    /// Returns the underlying controller.
    #[inline]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Returns `true` if a multi-line message is being composed.
    #[inline]
    pub fn is_composing(&self) -> bool {
        self.composer.is_composing()
    }

    /// Feeds one typed line. Returns `true` once a message is complete
    /// and ready for [`Session::send`].
    pub fn push_line(&mut self, line: &str) -> bool {
        match self.composer.push_line(line) {
            Composed::Continue => {
                trace!("message continues on the next line");
                self.controller.set_draft(self.composer.draft());
                false
            }
            Composed::Ready(text) => {
                self.controller.set_draft(text);
                true
            }
        }
    }

    /// Sends the current draft and waits for the exchange to settle.
    pub async fn send(&self) -> SubmitOutcome {
        let outcome = self.controller.submit_draft().await;
        debug!("message settled: {outcome:?}");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::{FALLBACK_REPLY, IgnoreReason, Sender};
    use chatline_test_transport::TestTransport;

    use super::*;
    use crate::render::{self, Printer};

    #[tokio::test]
    async fn test_multi_line_message() {
        let transport = TestTransport::default();
        transport.add_reply("Got both lines");
        let mut session = Session::with_transport(transport.clone());

        assert!(!session.push_line("first\\\n"));
        assert!(session.is_composing());
        session
            .controller()
            .subscribe()
            .wait_for(|v| v.draft() == "first\n")
            .await
            .unwrap();

        assert!(session.push_line("second\n"));
        assert_eq!(session.send().await, SubmitOutcome::Replied);

        assert_eq!(transport.requests()[0].message, "first\nsecond");
        let view = session.controller().view();
        assert_eq!(view.draft(), "");
        assert_eq!(view.messages()[1].text(), "Got both lines");
    }

    #[tokio::test]
    async fn test_blank_line_sends_nothing() {
        let transport = TestTransport::default();
        let mut session = Session::with_transport(transport.clone());

        assert!(session.push_line("   \n"));
        assert_eq!(
            session.send().await,
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput)
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_render_exchange() {
        let transport = TestTransport::default();
        transport.add_failure("offline");
        let mut session = Session::with_transport(transport);
        let mut printer = Printer::default();

        let view = session.controller().view();
        assert!(render::transcript(&view, false).contains(render::EMPTY_TITLE));
        assert!(printer.take_new(&view).is_empty());

        session.push_line("Hi\n");
        session.send().await;

        let view = session.controller().view();
        let rendered = render::transcript(&view, false);
        assert!(rendered.contains("▎Hi\n"));
        assert!(rendered.contains(FALLBACK_REPLY));
        assert!(!rendered.contains(render::COMPOSING));

        let new = printer.take_new(&view);
        assert_eq!(new.len(), 2);
        assert_eq!(new[0].sender(), Sender::User);
        assert_eq!(new[1].text(), FALLBACK_REPLY);
        assert!(printer.take_new(&view).is_empty());
    }
}
