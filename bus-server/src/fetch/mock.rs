//! Mock transport for running without network access.
//!
//! Serves scripted replies in order, then falls back to a fixed reply
//! (typically a JSON fixture loaded from disk).

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use super::error::FetchError;
use super::request::PreparedRequest;
use super::transport::{RawResponse, Transport};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Complete with the given status and body.
    Response {
        status: u16,
        body: Vec<u8>,
        delay: Duration,
    },
    /// Fail at the transport level.
    Failure { message: String, delay: Duration },
}

impl MockReply {
    /// A 200 response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(200, body)
    }

    /// A response with an arbitrary status code.
    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::Response {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// A transport failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            delay: Duration::ZERO,
        }
    }

    /// Delay the reply.
    pub fn delayed(self, by: Duration) -> Self {
        match self {
            Self::Response { status, body, .. } => Self::Response {
                status,
                body,
                delay: by,
            },
            Self::Failure { message, .. } => Self::Failure { message, delay: by },
        }
    }

    async fn resolve(self) -> Result<RawResponse, FetchError> {
        match self {
            Self::Response {
                status,
                body,
                delay,
            } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(RawResponse::new(status, body))
            }
            Self::Failure { message, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Err(FetchError::Transport { message })
            }
        }
    }
}

/// Transport that replays scripted replies.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: Option<MockReply>,
    requests: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl MockTransport {
    /// Create a transport with an empty script and no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that answers every request with `reply`.
    pub fn always(reply: MockReply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::default()
        }
    }

    /// Create a transport that serves a JSON fixture file with status 200.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let body = std::fs::read(path).map_err(|e| FetchError::InvalidRequest {
            message: format!("failed to read mock data {}: {e}", path.display()),
        })?;

        serde_json::from_slice::<serde_json::Value>(&body).map_err(|e| FetchError::Parse {
            message: format!("mock data {} is not JSON: {e}", path.display()),
        })?;

        Ok(Self::always(MockReply::ok(body)))
    }

    /// Queue a reply.
    pub async fn push(&self, reply: MockReply) {
        self.script.lock().await.push_back(reply);
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn reply(&self, request: PreparedRequest) -> Result<RawResponse, FetchError> {
        self.requests.lock().await.push(request);

        let scripted = self.script.lock().await.pop_front();
        let reply = scripted
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| FetchError::Transport {
                message: "no mock reply configured".to_string(),
            })?;

        reply.resolve().await
    }
}

impl Transport for MockTransport {
    fn send(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse, FetchError>> {
        Box::pin(self.reply(request))
    }
}
