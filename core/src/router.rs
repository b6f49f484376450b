//! Request routing: candidate selection, URL building, payload
//! encoding, and the handoff to the transport.
//!
//! # Design
//! `RequestRouter` is constructed once from an immutable `ClientConfig`
//! and a transport, and holds no other state; concurrent calls share
//! nothing mutable. `dispatch` is the whole request pipeline:
//!
//! 1. restrict the arguments to the operation's recognized payload
//!    parameters;
//! 2. select the first satisfiable candidate path (declaration order);
//! 3. substitute the template, prefix the base URL, and re-check for
//!    surviving placeholder syntax;
//! 4. serialize the payload, degrading to the raw payload on encoding
//!    failure rather than aborting the call;
//! 5. send via the transport and hand the response back untouched.
//!
//! Routing failures are immediate and carry the scanned candidates and
//! arguments; HTTP statuses are never inspected here.

use crate::args::CallArguments;
use crate::config::ClientConfig;
use crate::entities::host_groups::HostGroups;
use crate::entities::hosts::Hosts;
use crate::error::DispatchError;
use crate::http::{HttpRequest, HttpResponse, RequestBody};
use crate::route::{self, Operation};
use crate::transport::{Transport, UreqTransport};

/// Resolves operations to concrete endpoints and performs the calls.
#[derive(Debug)]
pub struct RequestRouter<T> {
    config: ClientConfig,
    transport: T,
}

impl RequestRouter<UreqTransport> {
    /// Router with the bundled synchronous transport, configured from
    /// the client's fixed settings.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::from_config(&config);
        Self::new(config, transport)
    }
}

impl<T> RequestRouter<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Host operations.
    pub fn hosts(&self) -> Hosts<'_, T> {
        Hosts::new(self)
    }

    /// Host-group operations.
    pub fn host_groups(&self) -> HostGroups<'_, T> {
        HostGroups::new(self)
    }
}

impl<T: Transport> RequestRouter<T> {
    /// Resolves `op` against `args` and performs the HTTP call.
    ///
    /// The response is returned exactly as the transport produced it;
    /// interpreting status codes and decoding bodies is the caller's
    /// job.
    pub fn dispatch(
        &self,
        op: &Operation,
        args: &CallArguments,
    ) -> Result<HttpResponse, DispatchError> {
        let payload: CallArguments = args
            .iter()
            .filter(|(name, _)| op.params.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let candidate = route::select_path(op.candidates, args).ok_or_else(|| {
            DispatchError::NoMatchingPath {
                candidates: op.candidates,
                arguments: args.clone(),
            }
        })?;

        let url = format!(
            "{}{}",
            self.config.base_url(),
            route::substitute(candidate.template, args)
        );
        if route::contains_placeholder_syntax(&url) {
            return Err(DispatchError::MissingPathParameter { url });
        }

        let body = if candidate.method.allows_body() {
            self.encode_payload(op, payload)
        } else {
            if !payload.is_empty() {
                tracing::warn!(
                    operation = op.name,
                    method = %candidate.method,
                    "payload dropped: method takes no body"
                );
            }
            None
        };

        tracing::debug!(
            operation = op.name,
            method = %candidate.method,
            url = %url,
            "dispatching request"
        );

        let request = HttpRequest {
            method: candidate.method,
            url,
            headers: self.config.headers(),
            body,
        };
        Ok(self.transport.send(request)?)
    }

    /// Serializes a non-empty payload. Encoding failure is downgraded:
    /// the call proceeds with the raw payload and a warning, preserving
    /// the request over a formatting-stage abort.
    fn encode_payload(&self, op: &Operation, payload: CallArguments) -> Option<RequestBody> {
        if payload.is_empty() {
            return None;
        }
        match serde_json::to_string(&payload) {
            Ok(json) => Some(RequestBody::Json(json)),
            Err(err) => {
                tracing::warn!(
                    operation = op.name,
                    error = %err,
                    "payload encoding failed; sending raw payload"
                );
                Some(RequestBody::Raw(payload))
            }
        }
    }
}
