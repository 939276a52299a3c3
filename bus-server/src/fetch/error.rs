//! Fetch error types.

/// Shown when an error carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Errors that can occur while issuing a request through a [`FetchController`].
///
/// None of these escape the controller: they are converted into the
/// failure state and observed through its `error` field.
///
/// [`FetchController`]: super::FetchController
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network failure (DNS, connection refused, timeout, etc.)
    #[error("{message}")]
    Transport { message: String },

    /// Server answered with a non-success status code
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Response body was not valid for the expected payload
    #[error("invalid response body: {message}")]
    Parse { message: String },

    /// Request could not be built (bad URL, bad header, etc.)
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl FetchError {
    /// Human-readable message for the failure state.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return FetchError::InvalidRequest {
                message: err.to_string(),
            };
        }

        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        FetchError::Transport { message }
    }
}
