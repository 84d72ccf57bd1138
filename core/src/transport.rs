//! Production [`Transport`] backed by a blocking `ureq::Agent`.

use ureq::Agent;

use crate::error::BoxError;
use crate::http::{HttpResponse, Transport};

/// Blocking transport over `ureq`.
///
/// The agent is built with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data and `ApiClient` does the status check.
/// Timeouts, proxies and TLS are whatever the agent was configured with.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a caller-configured agent. It should have
    /// `http_status_as_error(false)`, otherwise non-2xx statuses surface as
    /// transport errors.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post(&self, uri: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse, BoxError> {
        let response = self.agent.post(uri).content_type(content_type).send(body)?;
        Ok(into_response(response))
    }

    fn get(&self, uri: &str) -> Result<HttpResponse, BoxError> {
        let response = self.agent.get(uri).call()?;
        Ok(into_response(response))
    }
}

fn into_response(response: ureq::http::Response<ureq::Body>) -> HttpResponse {
    let status = response.status().as_u16();
    HttpResponse::new(status, response.into_body().into_reader())
}
