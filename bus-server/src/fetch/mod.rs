//! Generic data fetching.
//!
//! A [`FetchController`] owns one configured request (URL, method,
//! headers, body) and exposes its result as a [`FetchState`]: the parsed
//! data, a human-readable error, and a loading flag.
//!
//! Key characteristics:
//! - Requests go through a [`Transport`], so the live `reqwest` client
//!   can be swapped for the [`MockTransport`] in tests and offline runs
//! - Every failure (transport, non-2xx status, unparseable body) becomes
//!   the failure state; nothing propagates to the caller
//! - Overlapping requests are ordered by generation, and only the most
//!   recently issued one may update the state

mod controller;
mod error;
mod mock;
mod request;
mod state;
mod transport;

pub use controller::FetchController;
pub use error::{FetchError, UNKNOWN_ERROR_MESSAGE};
pub use mock::{MockReply, MockTransport};
pub use request::{FetchOptions, HttpMethod, PreparedRequest, RequestBody};
pub use state::{FetchState, FetchStatus};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportConfig};
