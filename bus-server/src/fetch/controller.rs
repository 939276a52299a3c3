//! Stateful request/response manager.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::error::FetchError;
use super::request::{FetchOptions, PreparedRequest};
use super::state::FetchState;
use super::transport::Transport;

/// Issues one configured request and tracks its result.
///
/// Each request takes a generation number. A resolution whose generation
/// is no longer the latest issued is discarded, so a slow response can
/// never overwrite a newer one. After [`close`](Self::close) every
/// pending resolution is discarded and new requests are refused.
pub struct FetchController<T> {
    url: RwLock<String>,
    options: FetchOptions,
    transport: Arc<dyn Transport>,
    state: watch::Sender<FetchState<T>>,
    generation: AtomicU64,
    mounted: AtomicBool,
    closed: AtomicBool,
    auto_task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> FetchController<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a controller. Nothing is issued until [`mount`](Self::mount)
    /// or [`refetch`](Self::refetch).
    pub fn new(url: impl Into<String>, options: FetchOptions, transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(FetchState::idle());
        Self {
            url: RwLock::new(url.into()),
            options,
            transport,
            state,
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            auto_task: Mutex::new(None),
        }
    }

    /// Current target URL.
    pub async fn url(&self) -> String {
        self.url.read().await.clone()
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// First use: auto-trigger if enabled and a URL is present.
    ///
    /// Later calls do nothing.
    pub async fn mount(self: &Arc<Self>) {
        if self.mounted.swap(true, Ordering::AcqRel) {
            return;
        }
        let url = self.url().await;
        self.auto_trigger(url).await;
    }

    /// Change the target URL, auto-triggering if it actually changed.
    pub async fn set_url(self: &Arc<Self>, url: impl Into<String>) {
        let url = url.into();
        {
            let mut current = self.url.write().await;
            if *current == url {
                return;
            }
            *current = url.clone();
        }
        self.auto_trigger(url).await;
    }

    /// Issue the configured request now, superseding any earlier one.
    ///
    /// Works whether or not auto-fetch is enabled. Failures end up in the
    /// state's `error` field and never propagate to the caller.
    pub async fn refetch(&self) {
        let Some(ticket) = self.begin() else {
            debug!("controller closed, ignoring refetch");
            return;
        };

        let url = self.url().await;
        self.run(ticket, &url).await;
    }

    /// Teardown: ignore pending results and refuse new requests.
    pub async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.auto_task.lock().await.take() {
            handle.abort();
        }
    }

    /// Enter the loading state now and resolve on a spawned task.
    async fn auto_trigger(self: &Arc<Self>, url: String) {
        if !self.options.auto_fetch || url.is_empty() {
            return;
        }
        let Some(ticket) = self.begin() else {
            return;
        };

        let controller = Arc::clone(self);
        let handle = tokio::spawn(async move { controller.run(ticket, &url).await });
        *self.auto_task.lock().await = Some(handle);
    }

    async fn run(&self, ticket: u64, url: &str) {
        let request = self.options.prepare(url);
        debug!(method = %request.method, url = %request.url, ticket, "issuing request");

        let outcome = self.execute(request).await;
        self.settle(ticket, outcome);
    }

    /// Enter the loading state and take a new generation number.
    fn begin(&self) -> Option<u64> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            if self.is_closed() {
                return false;
            }
            ticket = Some(self.generation.fetch_add(1, Ordering::AcqRel) + 1);
            state.begin();
            true
        });
        ticket
    }

    async fn execute(&self, request: PreparedRequest) -> Result<T, FetchError> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| FetchError::Parse {
            message: e.to_string(),
        })
    }

    /// Apply a resolution if it is still the latest one.
    fn settle(&self, ticket: u64, outcome: Result<T, FetchError>) {
        let failure = outcome.as_ref().err().map(FetchError::user_message);

        let applied = self.state.send_if_modified(|state| {
            if self.is_closed() || self.generation.load(Ordering::Acquire) != ticket {
                return false;
            }
            match outcome {
                Ok(data) => state.succeed(data),
                Err(err) => state.fail(err.user_message()),
            }
            true
        });

        match (applied, failure) {
            (false, _) => debug!(ticket, "discarding superseded response"),
            (true, Some(message)) => warn!(ticket, error = %message, "request failed"),
            (true, None) => debug!(ticket, "request succeeded"),
        }
    }
}
