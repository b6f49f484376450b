//! HTTP transport types shared between the router and the transport.
//!
//! # Design
//! Requests and responses are plain data. The router builds an
//! `HttpRequest` and hands it to whatever [`Transport`](crate::Transport)
//! it was constructed with; the response comes back as an opaque
//! `HttpResponse` that the router returns to the caller unmodified — no
//! status interpretation, no body decoding.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be logged,
//! recorded by test doubles, and moved across threads without lifetime
//! concerns.

use crate::args::CallArguments;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Wire name of the method, e.g. `"GET"`.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is attached for this method. Only POST and
    /// PUT carry one; payloads supplied for the other methods are dropped
    /// before the request is built.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an outgoing request.
///
/// The normal case is `Json`: the payload serialized up front by the
/// router. `Raw` is the degraded case — serialization failed, the payload
/// is passed through unencoded and the transport renders it best-effort.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Payload already serialized to a JSON string.
    Json(String),
    /// Payload that could not be serialized; sent best-effort.
    Raw(CallArguments),
}

/// An HTTP request described as plain data, ready for a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Fully qualified URL (base URL + substituted path).
    pub url: String,
    /// The client's fixed header bundle.
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
///
/// Returned to the caller exactly as the transport produced it. Status
/// codes — including 4xx and 5xx — are data here, not errors.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_wire_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
    }
}
