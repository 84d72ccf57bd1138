//! The request executor.
//!
//! # Design
//! `ApiClient` holds its two collaborators and nothing else, so a call never
//! depends on a previous one. Each call is one round trip with three exits:
//! the transport fails, the status is not 200, or the body cannot be read.
//! There is no retry; a caller that wants one issues a new call.

use log::{debug, warn};

use crate::error::ApiError;
use crate::http::{
    BodyReader, HttpMethod, HttpRequest, HttpResponse, ReadToEnd, Transport, JSON_CONTENT_TYPE,
};
use crate::transport::UreqTransport;

/// Sends JSON via POST or issues a GET and returns the body text of a 200.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport, R = ReadToEnd> {
    transport: T,
    reader: R,
}

impl ApiClient {
    /// A client using a default `ureq` agent.
    pub fn new() -> Self {
        Self::with_parts(UreqTransport::new(), ReadToEnd)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self::with_parts(transport, ReadToEnd)
    }
}

impl<T: Transport, R: BodyReader> ApiClient<T, R> {
    pub fn with_parts(transport: T, reader: R) -> Self {
        Self { transport, reader }
    }

    /// POST a well-formed JSON message to `uri`.
    pub fn do_post(&self, uri: &str, json_body: &str) -> Result<String, ApiError> {
        self.execute(&HttpRequest::post(uri, json_body))
    }

    /// GET `uri` and return the response body.
    pub fn do_get(&self, uri: &str) -> Result<String, ApiError> {
        self.execute(&HttpRequest::get(uri))
    }

    pub fn execute(&self, request: &HttpRequest) -> Result<String, ApiError> {
        let response = self.send(request)?;

        if response.status != 200 {
            warn!(
                "{} {} answered with status {}",
                request.method, request.uri, response.status
            );
            // Dropping the response here releases the unread stream.
            return Err(ApiError::Status(response.status));
        }

        let Some(mut body) = response.body else {
            debug!("{} {} answered 200 without a body", request.method, request.uri);
            return Ok(String::new());
        };

        let bytes = self.reader.read_all(body.as_mut()).map_err(|e| {
            warn!("failed to read body from {}: {e}", request.uri);
            ApiError::BodyRead(e)
        })?;
        drop(body);

        debug!(
            "{} {} answered 200 with {} bytes",
            request.method,
            request.uri,
            bytes.len()
        );
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match request.method {
            HttpMethod::Post => {
                let payload = request.body.as_deref().unwrap_or_default();
                debug!("POST {} ({} byte payload)", request.uri, payload.len());
                self.transport
                    .post(&request.uri, JSON_CONTENT_TYPE, payload.as_bytes())
            }
            HttpMethod::Get => {
                debug!("GET {}", request.uri);
                self.transport.get(&request.uri)
            }
        };

        result.map_err(|e| {
            debug!("{} {} failed: {e}", request.method, request.uri);
            ApiError::Transport(e)
        })
    }
}
