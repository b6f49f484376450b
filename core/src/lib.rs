//! Synchronous client for the Quarry inventory API.
//!
//! # Overview
//! Every API operation is declared as data: an ordered list of endpoint
//! candidates (method + path template) plus the parameter names the API
//! accepts in the payload. A single router resolves each call — first
//! candidate whose placeholders the arguments satisfy wins — then
//! substitutes the path, restricts the arguments to the payload, and
//! performs the request with the client's fixed header bundle.
//!
//! # Design
//! - `ClientConfig` is read once (explicitly or from the environment)
//!   and immutable afterwards; timeout, TLS verification and content
//!   type are fixed per client.
//! - `RequestRouter` is generic over a blocking [`Transport`];
//!   `UreqTransport` is the bundled implementation, and tests substitute
//!   recording fakes.
//! - Responses pass through whole. The router never interprets status
//!   codes or decodes bodies; 404 is a response here, not an error.
//! - Entity modules are uniform, table-driven and thin by intent — the
//!   routing machinery is the engineered part.
//!
//! ```no_run
//! use quarry_core::{ClientConfig, NewHost, RequestRouter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let router = RequestRouter::from_config(config);
//! let response = router.hosts().create(NewHost {
//!     name: "web01".to_string(),
//!     comment: None,
//!     managed: true,
//!     host_group_id: Some(3),
//! })?;
//! assert_eq!(response.status, 201);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod entities;
pub mod error;
pub mod field;
pub mod http;
pub mod route;
pub mod router;
pub mod transport;

pub use args::{CallArguments, IntoArguments, ParamValue};
pub use config::{ClientConfig, Credentials};
pub use entities::host_groups::{HostGroup, HostGroupUpdate, HostGroups, NewHostGroup};
pub use entities::hosts::{Host, HostUpdate, Hosts, NewHost};
pub use error::{ConfigError, DispatchError, TransportError};
pub use field::FieldValue;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use route::{select_path, Operation, PathCandidate};
pub use router::RequestRouter;
pub use transport::{Transport, UreqTransport};
