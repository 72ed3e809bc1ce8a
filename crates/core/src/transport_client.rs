use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::pin::Pin;
use std::sync::Arc;

use chatline_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use tokio::task::JoinError;
use tracing::Instrument;

pub type SendResult = Result<ChatReply, Box<dyn TransportError>>;
pub type BoxedSendFuture = Pin<Box<dyn Future<Output = SendResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ChatRequest) -> BoxedSendFuture + Send + Sync>;

/// A wrapper around a chat transport that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct TransportClient {
    handler_fn: HandlerFn,
}

impl TransportClient {
    #[inline]
    pub fn new<T: ChatTransport + 'static>(transport: T) -> Self {
        // Erase `T` so the conversation state doesn't need a generic
        // parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = transport.send(&req);
            Box::pin(
                async move {
                    trace!("sending request: {:?}", req);
                    let result = fut.await;
                    match &result {
                        Ok(reply) => trace!("got a reply: {:?}", reply),
                        Err(err) => {
                            error!("request failed ({}): {err}", err.kind())
                        }
                    }
                    result.map_err(|err| {
                        Box::new(err) as Box<dyn TransportError>
                    })
                }
                .instrument(trace_span!("transport req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request. The returned future is independent of `self`.
    #[inline]
    pub fn send(&self, req: ChatRequest) -> BoxedSendFuture {
        (self.handler_fn)(req)
    }

    /// Sends a request on its own task.
    ///
    /// The returned future always resolves, even if the transport panics
    /// or its task is cancelled.
    pub fn spawn_send(
        &self,
        req: ChatRequest,
    ) -> impl Future<Output = SendResult> + Send + 'static {
        let handle = tokio::spawn(self.send(req));
        async move {
            handle.await.unwrap_or_else(|err| {
                error!("transport task aborted: {err}");
                Err(Box::new(TaskAborted(err)) as Box<dyn TransportError>)
            })
        }
    }
}

/// The task driving a request ended without a result.
#[derive(Debug)]
pub struct TaskAborted(JoinError);

impl Display for TaskAborted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "transport task aborted: {}", self.0)
    }
}

impl Error for TaskAborted {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl TransportError for TaskAborted {
    #[inline]
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}
