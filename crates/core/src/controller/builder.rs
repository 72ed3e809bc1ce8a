use chatline_transport::ChatTransport;

use super::Controller;
use crate::transport_client::TransportClient;

/// [`Controller`] builder.
pub struct ControllerBuilder {
    pub(super) transport: TransportClient,
    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified chat transport.
    #[inline]
    pub fn with_transport<T: ChatTransport + 'static>(transport: T) -> Self {
        Self {
            transport: TransportClient::new(transport),
            on_idle: None,
        }
    }

    /// Attaches a callback to be invoked each time a reply (or the
    /// fallback) has been appended and the conversation is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Starts the conversation task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    #[inline]
    pub fn build(self) -> Controller {
        Controller::spawn_from_builder(self)
    }
}
