//! A local fake chat backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chatline_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use tokio::sync::Semaphore;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<PresetReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

/// A local fake chat backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// backend should answer each request in turn. Every call to `send` takes
/// the next preset off the script. If the script runs out, the request
/// fails.
///
/// Clones share the same script and the same call log, so a test can keep
/// one clone for inspection and hand the other to the code under test.
#[derive(Clone, Default)]
pub struct TestTransport {
    inner: Arc<Inner>,
}

impl TestTransport {
    #[inline]
    pub fn add_reply<S: Into<String>>(&self, text: S) {
        self.push(PresetReply::reply(text));
    }

    #[inline]
    pub fn add_failure<S: Into<String>>(&self, reason: S) {
        self.push(PresetReply::failure(reason));
    }

    pub fn push(&self, preset: PresetReply) {
        lock(&self.inner.script).push_back(preset);
    }

    /// Delays every answer by `duration`.
    #[inline]
    pub fn set_delay(&self, duration: Duration) {
        *lock(&self.inner.delay) = Some(duration);
    }

    /// Holds every request in flight until the returned gate lets it pass.
    pub fn gate(&self) -> Gate {
        let semaphore = Arc::new(Semaphore::new(0));
        *lock(&self.inner.gate) = Some(Arc::clone(&semaphore));
        Gate { semaphore }
    }

    /// Number of times `send` has been called.
    #[inline]
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.inner.requests).clone()
    }
}

impl Debug for TestTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestTransport")
            .field("calls", &self.calls())
            .field("remaining", &lock(&self.inner.script).len())
            .finish_non_exhaustive()
    }
}

/// Releases requests held by a gated [`TestTransport`].
#[derive(Clone, Debug)]
pub struct Gate {
    semaphore: Arc<Semaphore>,
}

impl Gate {
    /// Lets one held (or future) request through.
    #[inline]
    pub fn release(&self) {
        self.semaphore.add_permits(1);
    }
}

impl ChatTransport for TestTransport {
    type Error = crate::Error;

    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.inner.requests).push(req.clone());

        let preset = lock(&self.inner.script).pop_front();
        let delay = *lock(&self.inner.delay);
        let gate = lock(&self.inner.gate).clone();

        async move {
            if let Some(gate) = gate {
                // The gate is never closed, so acquiring can't fail.
                if let Ok(permit) = gate.acquire_owned().await {
                    permit.forget();
                }
            }
            if let Some(delay) = delay {
                sleep(delay).await;
            }

            match preset {
                Some(PresetReply::Reply(text)) => Ok(ChatReply::new(text)),
                Some(PresetReply::Failure(reason)) => Err(Error {
                    message: reason,
                    kind: ErrorKind::Connect,
                }),
                None => Err(Error {
                    message: "no enough presets".to_owned(),
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use tokio::time::{Instant, timeout};

    use super::*;

    #[tokio::test]
    async fn test_script_order() {
        let transport = TestTransport::default();
        transport.add_reply("Hello, world!");
        transport.add_failure("connection refused");

        let reply = transport.send(&ChatRequest::new("Hi")).await.unwrap();
        assert_eq!(reply.reply, "Hello, world!");

        let err = transport
            .send(&ChatRequest::new("Again"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connect);

        let err = transport
            .send(&ChatRequest::new("Once more"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        assert_eq!(transport.calls(), 3);
        let messages: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(messages, ["Hi", "Again", "Once more"]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let transport = TestTransport::default();
        let observer = transport.clone();
        transport.add_reply("ok");
        transport.send(&ChatRequest::new("Hi")).await.unwrap();
        assert_eq!(observer.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let transport = TestTransport::default();
        transport.add_reply("late");
        transport.set_delay(Duration::from_secs(3));

        let start = Instant::now();
        transport.send(&ChatRequest::new("Hi")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_gate() {
        let transport = TestTransport::default();
        transport.add_reply("released");
        let gate = transport.gate();

        let mut fut = Box::pin(transport.send(&ChatRequest::new("Hi")));
        let held = timeout(Duration::from_millis(20), &mut fut).await;
        assert!(held.is_err());

        gate.release();
        let reply = fut.await.unwrap();
        assert_eq!(reply.reply, "released");
    }
}
