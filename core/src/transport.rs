//! The transport boundary and the bundled ureq implementation.
//!
//! # Design
//! The router never talks to the network directly; it hands a finished
//! `HttpRequest` to a [`Transport`]. The verb-to-primitive mapping lives
//! inside the transport implementation, one arm per method, so swapping
//! the HTTP stack (or substituting a recording fake in tests) touches
//! nothing else.
//!
//! `UreqTransport` is built from a `ClientConfig`: the agent carries the
//! fixed timeout and the TLS-verification flag, and is configured to
//! report non-2xx statuses as responses rather than errors — status
//! interpretation belongs to the caller, not this layer.

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Executes a single blocking HTTP round-trip.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Synchronous transport backed by a ureq agent.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Builds an agent from the client's fixed settings.
    pub fn from_config(config: &ClientConfig) -> Self {
        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(!config.verify_tls())
            .build();
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .tls_config(tls)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body.map(render_body)) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&url), &headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| TransportError::new(err.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Renders a request body to bytes. The degraded `Raw` case goes out as
/// form-urlencoded pairs, which is what the unserialized payload amounts
/// to on the wire.
fn render_body(body: RequestBody) -> String {
    match body {
        RequestBody::Json(json) => json,
        RequestBody::Raw(args) => {
            let mut pairs = url::form_urlencoded::Serializer::new(String::new());
            for (name, value) in &args {
                pairs.append_pair(name, &value.to_string());
            }
            pairs.finish()
        }
    }
}
