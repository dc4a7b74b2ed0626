//! Value construction and decode errors

use std::fmt::Display;

use crate::mutf8::Mutf8Error;
use crate::value::TagKind;

/// Errors raised by tag values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// A native value that cannot be represented by the tag kind
    #[error("{kind} value `{value}` is invalid: {reason}")]
    Invalid {
        kind: TagKind,
        value: String,
        reason: String,
    },

    /// A binary payload that cannot be decoded
    #[error("{kind} value failed to decode: {reason}")]
    Decode {
        kind: TagKind,
        reason: String,
        #[source]
        source: Option<Mutf8Error>,
    },
}

impl ValueError {
    pub(crate) fn invalid(kind: TagKind, value: impl Display, reason: impl Into<String>) -> Self {
        ValueError::Invalid {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(kind: TagKind, reason: impl Into<String>) -> Self {
        ValueError::Decode {
            kind,
            reason: reason.into(),
            source: None,
        }
    }

    /// Kind of the value that failed
    pub fn kind(&self) -> TagKind {
        match self {
            ValueError::Invalid { kind, .. } | ValueError::Decode { kind, .. } => *kind,
        }
    }
}
