//! HTTP request/response types and the two collaborator traits.
//!
//! # Design
//! `ApiClient` never talks to the network itself. It hands an
//! `HttpRequest` to a [`Transport`] and drains the returned body through a
//! [`BodyReader`]. Both are traits so the production implementations
//! (`UreqTransport`, [`ReadToEnd`]) and test doubles are interchangeable.
//!
//! The response body is an owned `Box<dyn Read>`: whoever holds it owns the
//! underlying stream, and dropping it releases the connection.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use crate::error::BoxError;

/// Content type sent with every POST.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request. The body is ignored for GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            uri: uri.to_string(),
            body: None,
        }
    }

    /// A POST carrying `body` verbatim. The payload is not checked for
    /// well-formed JSON.
    pub fn post(uri: &str, body: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            uri: uri.to_string(),
            body: Some(body.to_string()),
        }
    }
}

/// A response as returned by a [`Transport`].
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Box<dyn Read>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + 'static) -> Self {
        Self {
            status,
            body: Some(Box::new(body)),
        }
    }

    /// A response with no body stream at all.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("body", &self.body.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Performs the actual network call.
pub trait Transport {
    fn post(&self, uri: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse, BoxError>;

    fn get(&self, uri: &str) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, uri: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse, BoxError> {
        (**self).post(uri, content_type, body)
    }

    fn get(&self, uri: &str) -> Result<HttpResponse, BoxError> {
        (**self).get(uri)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, uri: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse, BoxError> {
        (**self).post(uri, content_type, body)
    }

    fn get(&self, uri: &str) -> Result<HttpResponse, BoxError> {
        (**self).get(uri)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post(&self, uri: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse, BoxError> {
        (**self).post(uri, content_type, body)
    }

    fn get(&self, uri: &str) -> Result<HttpResponse, BoxError> {
        (**self).get(uri)
    }
}

/// Drains a response body into bytes.
pub trait BodyReader {
    fn read_all(&self, body: &mut dyn Read) -> io::Result<Vec<u8>>;
}

impl<R: BodyReader + ?Sized> BodyReader for &R {
    fn read_all(&self, body: &mut dyn Read) -> io::Result<Vec<u8>> {
        (**self).read_all(body)
    }
}

impl<R: BodyReader + ?Sized> BodyReader for Box<R> {
    fn read_all(&self, body: &mut dyn Read) -> io::Result<Vec<u8>> {
        (**self).read_all(body)
    }
}

impl<R: BodyReader + ?Sized> BodyReader for Arc<R> {
    fn read_all(&self, body: &mut dyn Read) -> io::Result<Vec<u8>> {
        (**self).read_all(body)
    }
}

/// Default [`BodyReader`]: `Read::read_to_end`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadToEnd;

impl BodyReader for ReadToEnd {
    fn read_all(&self, body: &mut dyn Read) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
