//! Tri-state update fields.
//!
//! # Design
//! A partial update must distinguish "leave this field alone" from
//! "clear this field on the server", which a plain `Option` cannot do.
//! `FieldValue` makes the three states explicit; the check happens when
//! an update type is lowered into call arguments: `Unset` fields are
//! omitted from the payload, `Null` becomes an explicit JSON `null`,
//! `Set` carries the value.

use crate::args::ParamValue;

/// An update field that may be absent, explicitly null, or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<T> {
    /// Field not mentioned in this update; the server keeps its value.
    Unset,
    /// Field explicitly cleared; serialized as JSON `null`.
    Null,
    /// Field set to a value.
    Set(T),
}

impl<T> FieldValue<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, FieldValue::Set(_))
    }

    /// The set value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldValue::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        FieldValue::Unset
    }
}

impl<T: Into<ParamValue>> FieldValue<T> {
    /// The payload value this field contributes, or `None` when the field
    /// is unset and must not appear at all.
    pub fn into_param(self) -> Option<ParamValue> {
        match self {
            FieldValue::Unset => None,
            FieldValue::Null => Some(ParamValue::Null),
            FieldValue::Set(value) => Some(value.into()),
        }
    }
}
