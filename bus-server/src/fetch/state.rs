//! Observable result of a fetch.

use std::sync::Arc;

/// Coarse status derived from a [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing issued yet.
    Idle,
    /// A request is in flight (stale data may still be present).
    Loading,
    /// Last request succeeded.
    Success,
    /// Last request failed.
    Failure,
}

/// Current data, error and loading flag of a fetch.
///
/// `data` and `error` are never both set. Every transition replaces
/// the previous result rather than merging into it.
#[derive(Debug)]
pub struct FetchState<T> {
    data: Option<Arc<T>>,
    error: Option<String>,
    loading: bool,
}

impl<T> FetchState<T> {
    /// The state before any request has been issued.
    pub fn idle() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> FetchStatus {
        if self.loading {
            FetchStatus::Loading
        } else if self.error.is_some() {
            FetchStatus::Failure
        } else if self.data.is_some() {
            FetchStatus::Success
        } else {
            FetchStatus::Idle
        }
    }

    /// A request has started. Clears the error, keeps any stale data.
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = Some(Arc::new(data));
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.data = None;
        self.error = Some(message);
        self.loading = false;
    }
}

impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            loading: self.loading,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}
