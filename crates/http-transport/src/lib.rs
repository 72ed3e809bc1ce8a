//! A chat transport that posts messages to an HTTP backend.
//!
//! The backend is expected to accept `POST {base}/chat` with a JSON body
//! `{ "message": "..." }` and answer `{ "reply": "..." }`.

#[macro_use]
extern crate tracing;

mod config;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use chatline_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use reqwest::{Client, Response, header};

pub use config::{HttpTransportConfig, HttpTransportConfigBuilder};

/// Error type for [`HttpTransport`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() || err.is_timeout() {
            ErrorKind::Connect
        } else if err.is_status() {
            ErrorKind::Status
        } else if err.is_decode() {
            ErrorKind::Malformed
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP chat transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    config: Arc<HttpTransportConfig>,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` with the given configuration.
    #[inline]
    pub fn new(config: HttpTransportConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ChatTransport for HttpTransport {
    type Error = Error;

    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        trace!("posting to {}", self.config.chat_url);
        let resp_fut = self
            .client
            .post(&self.config.chat_url)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send();

        async move {
            let resp = resp_fut
                .await
                .and_then(Response::error_for_status)
                .map_err(Error::from_reqwest)?;

            let body = resp.text().await.map_err(Error::from_reqwest)?;
            serde_json::from_str::<ChatReply>(&body).map_err(|err| {
                debug!("unexpected body: {body:?}");
                Error::new(
                    format!("Unexpected reply payload: {err}"),
                    ErrorKind::Malformed,
                )
            })
        }
    }
}
