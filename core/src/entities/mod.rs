//! Resource modules mirroring the remote API surface.
//!
//! Each module carries the same three things, in the same shape: const
//! operation tables (endpoint candidates in preference order plus the
//! payload parameters the API recognizes), the resource's data types,
//! and a thin wrapper that lowers typed inputs into call arguments and
//! dispatches. The wrappers return raw responses; decoding them is up to
//! the caller.

pub mod host_groups;
pub mod hosts;

use crate::args::{CallArguments, ParamValue};

pub(crate) fn id_args(id: u64) -> CallArguments {
    CallArguments::from([("id".to_string(), ParamValue::from(id))])
}
