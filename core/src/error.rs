//! Error types for the API client.
//!
//! # Design
//! A call ends in exactly one of three failures, so each gets its own
//! variant. `Transport` and `BodyRead` display the underlying message
//! unchanged; callers that compare error text against what the transport or
//! reader produced see the same string. `Status` keeps a fixed message
//! format because downstream code may parse it.

use std::io;

use thiserror::Error;

/// Boxed error returned by a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The outbound call could not complete (DNS, connection refused, ...).
    #[error("{0}")]
    Transport(BoxError),

    /// The server answered with a status other than 200.
    #[error("apiclient: Received non-200 status code from api endpoint: {0}")]
    Status(u16),

    /// The status was 200 but the response body could not be drained.
    #[error(transparent)]
    BodyRead(io::Error),
}

impl ApiError {
    /// The rejected status code, if this is a [`ApiError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// Recover the transport's original error.
    pub fn into_transport(self) -> Option<BoxError> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_is_plain_decimal() {
        let err = ApiError::Status(404);
        assert_eq!(
            err.to_string(),
            "apiclient: Received non-200 status code from api endpoint: 404"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn transport_message_is_forwarded_verbatim() {
        let inner: BoxError = "mock: simple error for testing".into();
        let err = ApiError::Transport(inner);
        assert_eq!(err.to_string(), "mock: simple error for testing");
        assert!(err.status().is_none());

        let back = err.into_transport().unwrap();
        assert_eq!(back.to_string(), "mock: simple error for testing");
    }

    #[test]
    fn body_read_message_is_forwarded_verbatim() {
        let err = ApiError::BodyRead(io::Error::other("error reading body"));
        assert_eq!(err.to_string(), "error reading body");
        assert!(err.into_transport().is_none());
    }
}
