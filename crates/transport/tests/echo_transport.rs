use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::time::Duration;

use chatline_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use tokio::time::sleep;

#[derive(Debug)]
struct EchoTransportError(ErrorKind);

impl Display for EchoTransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for EchoTransportError {}

impl TransportError for EchoTransportError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Answers every message with "You said ...", after a short pause.
struct EchoTransport;

impl ChatTransport for EchoTransport {
    type Error = EchoTransportError;

    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let message = req.message.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if message.is_empty() {
                return Err(EchoTransportError(ErrorKind::Malformed));
            }
            Ok(ChatReply::new(format!("You said {message}")))
        }
    }
}

/// Never answers anything.
struct RefusingTransport;

impl ChatTransport for RefusingTransport {
    type Error = EchoTransportError;

    fn send(
        &self,
        _req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        ready(Err(EchoTransportError(ErrorKind::Connect)))
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply() {
        let transport = EchoTransport;
        let reply = transport
            .send(&ChatRequest::new("Good morning"))
            .await
            .unwrap();
        assert_eq!(reply.reply, "You said Good morning");
    }

    #[tokio::test]
    async fn test_future_outlives_request() {
        let transport = EchoTransport;
        let fut = {
            let req = ChatRequest::new("detached");
            transport.send(&req)
        };
        let reply = tokio::spawn(fut).await.unwrap().unwrap();
        assert_eq!(reply.reply, "You said detached");
    }

    #[tokio::test]
    async fn test_error() {
        let err = EchoTransport
            .send(&ChatRequest::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = RefusingTransport
            .send(&ChatRequest::new("Hello"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connect);
    }
}
