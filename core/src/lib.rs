//! Thin blocking client for JSON-over-HTTP APIs such as AnkiConnect.
//!
//! # Overview
//! `ApiClient` sends a JSON payload via POST or issues a GET, checks that the
//! server answered 200, and returns the body as text. Anything else ends the
//! call with an `ApiError`.
//!
//! # Design
//! - The network call goes through a `Transport` and the body is drained by
//!   a `BodyReader`; both are traits so tests can swap them out.
//! - `UreqTransport` is the production transport. Timeouts, pooling and TLS
//!   belong to the `ureq::Agent` it wraps.
//! - `ApiClient` keeps no state between calls and never retries.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, BoxError};
pub use http::{BodyReader, HttpMethod, HttpRequest, HttpResponse, ReadToEnd, Transport};
pub use transport::UreqTransport;
