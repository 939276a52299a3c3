//! HTTP transport for the fetch controller.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::FetchError;
use super::request::{HttpMethod, PreparedRequest};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = concat!("bus-server/", env!("CARGO_PKG_VERSION"));

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can execute a prepared request.
///
/// A transport only reports transport-level failures. Non-2xx statuses
/// come back as a normal [`RawResponse`].
pub trait Transport: Send + Sync {
    fn send(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse, FetchError>>;
}

/// Configuration for the reqwest transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl TransportConfig {
    /// Create a config with the defaults.
    pub fn new() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Live transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Patch => Method::PATCH,
        }
    }

    fn headers(request: &PreparedRequest) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| FetchError::InvalidRequest {
                    message: format!("invalid header name: {name}"),
                })?;
            let value = HeaderValue::from_str(value).map_err(|_| FetchError::InvalidRequest {
                message: format!("invalid value for header {name}"),
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, FetchError> {
        let headers = Self::headers(&request)?;

        let mut builder = self
            .http
            .request(Self::method(request.method), &request.url)
            .headers(headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse, FetchError>> {
        Box::pin(self.execute(request))
    }
}
