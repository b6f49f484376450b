//! Error types for the client.
//!
//! # Design
//! Routing errors are caller contract violations: the arguments supplied
//! cannot produce a concrete endpoint. They are not retriable, so both
//! variants embed everything needed to debug the call site — the
//! candidate list that was scanned and the arguments it was scanned
//! against, or the partially substituted URL. Transport errors stay
//! opaque: this layer does not classify them, and HTTP statuses are never
//! errors at all (responses pass through whole).

use std::fmt;

use crate::args::CallArguments;
use crate::route::PathCandidate;

/// Errors returned by `RequestRouter::dispatch`.
#[derive(Debug)]
pub enum DispatchError {
    /// No candidate path's placeholders are satisfiable by the supplied
    /// arguments.
    NoMatchingPath {
        candidates: &'static [PathCandidate],
        arguments: CallArguments,
    },

    /// The selected path still contains placeholder syntax after
    /// substitution. Selection succeeded, so this points at a malformed
    /// template rather than missing arguments.
    MissingPathParameter { url: String },

    /// The transport failed below HTTP: connect, TLS, read. Passed
    /// through unclassified.
    Transport(TransportError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoMatchingPath {
                candidates,
                arguments,
            } => {
                write!(f, "no endpoint matches the supplied arguments; tried [")?;
                for (i, candidate) in candidates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{candidate}")?;
                }
                write!(f, "] with arguments {{")?;
                for (i, (name, value)) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
            DispatchError::MissingPathParameter { url } => {
                write!(
                    f,
                    "path still contains placeholder syntax after substitution: {url}"
                )
            }
            DispatchError::Transport(err) => write!(f, "transport failed: {err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        DispatchError::Transport(err)
    }
}

/// An opaque transport-level failure. Carries the underlying message and
/// nothing else; callers wanting HTTP semantics look at responses, not
/// errors.
#[derive(Debug)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Errors building a `ClientConfig`.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    MissingEnv { var: &'static str },

    /// The credential string is not of the form `username:password`.
    MalformedAuth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnv { var } => {
                write!(f, "environment variable {var} is not set")
            }
            ConfigError::MalformedAuth => {
                f.write_str("auth credential must be of the form username:password")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
