//! Request configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Content type sent unless the caller overrides it.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// HTTP methods a [`FetchOptions`] may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Returns the method as a static string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent unchanged.
    Text(String),
    /// Serialized to JSON text before sending.
    Json(serde_json::Value),
}

impl RequestBody {
    /// Build a JSON body from any serializable value.
    pub fn json<S: Serialize>(value: &S) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// The text to put on the wire, or `None` if the body is empty.
    ///
    /// An empty string and JSON `null` are treated as no body at all.
    fn to_wire(&self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text.clone()),
            Self::Json(serde_json::Value::Null) => None,
            Self::Json(value) => Some(value.to_string()),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Optional request configuration for a fetch.
///
/// Immutable once handed to a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// HTTP method (defaults to GET)
    pub method: HttpMethod,
    /// Extra headers; these override the default content type
    pub headers: BTreeMap<String, String>,
    /// Body, ignored for GET
    pub body: Option<RequestBody>,
    /// Issue the request automatically on mount and URL change
    pub auto_fetch: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            body: None,
            auto_fetch: true,
        }
    }
}

impl FetchOptions {
    /// Create options with the defaults (GET, no headers, auto fetch).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Enable or disable the auto-trigger.
    pub fn with_auto_fetch(mut self, auto_fetch: bool) -> Self {
        self.auto_fetch = auto_fetch;
        self
    }

    /// Build the concrete request for `url`.
    pub fn prepare(&self, url: &str) -> PreparedRequest {
        let mut headers = vec![("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string())];
        for (name, value) in &self.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        let body = match self.method {
            HttpMethod::Get => None,
            _ => self.body.as_ref().and_then(RequestBody::to_wire),
        };

        PreparedRequest {
            method: self.method,
            url: url.to_string(),
            headers,
            body,
        }
    }
}

/// A fully resolved request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://example.test/routes";

    #[test]
    fn defaults() {
        let options = FetchOptions::default();
        assert_eq!(options.method, HttpMethod::Get);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
        assert!(options.auto_fetch);
    }

    #[test]
    fn default_content_type() {
        let request = FetchOptions::new().prepare(URL);
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, URL);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn caller_header_overrides_content_type() {
        let request = FetchOptions::new()
            .with_header("content-type", "text/plain")
            .with_header("X-Trace", "abc")
            .prepare(URL);

        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.header("x-trace"), Some("abc"));
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn get_never_sends_body() {
        let request = FetchOptions::new()
            .with_body(json!({"route": "1A"}))
            .prepare(URL);
        assert!(request.body.is_none());
    }

    #[test]
    fn text_body_passed_through() {
        let request = FetchOptions::new()
            .with_method(HttpMethod::Post)
            .with_body("route=1A")
            .prepare(URL);
        assert_eq!(request.body.as_deref(), Some("route=1A"));
    }

    #[test]
    fn json_body_serialized() {
        let request = FetchOptions::new()
            .with_method(HttpMethod::Put)
            .with_body(json!({"route": "1A"}))
            .prepare(URL);
        assert_eq!(request.body.as_deref(), Some(r#"{"route":"1A"}"#));
    }

    #[test]
    fn empty_bodies_are_dropped() {
        let request = FetchOptions::new()
            .with_method(HttpMethod::Post)
            .with_body("")
            .prepare(URL);
        assert!(request.body.is_none());

        let request = FetchOptions::new()
            .with_method(HttpMethod::Patch)
            .with_body(serde_json::Value::Null)
            .prepare(URL);
        assert!(request.body.is_none());
    }

    #[test]
    fn method_strings() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        let parsed: HttpMethod = serde_json::from_str("\"PATCH\"").unwrap();
        assert_eq!(parsed, HttpMethod::Patch);
    }
}
