//! Error taxonomy for parsing and mutation.

use std::fmt;

use crate::value::JsonType;

/// Everything that can go wrong talking to a [`JsonValue`](crate::value::JsonValue) tree.
///
/// Strict-mode parsing and access are the only paths that produce these;
/// loose mode (the default) suppresses access-time errors by returning the
/// shared `Empty` sentinel instead.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonError {
    /// Malformed input at parse time, or a mutation attempted against a
    /// holder whose type does not support it (e.g. `push` on an object).
    InvalidJson {
        /// Byte offset into the source buffer where the problem was found.
        /// Zero for mutation errors, which have no source position.
        offset: usize,
        reason: String,
    },
    /// A scalar accessor was called against a holder of the wrong type
    /// while strict mode was in effect.
    TypeMismatch { expected: JsonType, found: JsonType },
}

impl JsonError {
    pub(crate) fn invalid(offset: usize, reason: impl Into<String>) -> Self {
        JsonError::InvalidJson {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn mutation(reason: impl Into<String>) -> Self {
        JsonError::InvalidJson {
            offset: 0,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::InvalidJson { offset, reason } if *offset > 0 => {
                write!(f, "invalid JSON at byte {offset}: {reason}")
            }
            JsonError::InvalidJson { reason, .. } => write!(f, "invalid operation: {reason}"),
            JsonError::TypeMismatch { expected, found } => {
                write!(f, "expected {expected:?}, found {found:?}")
            }
        }
    }
}

impl std::error::Error for JsonError {}

pub type Result<T> = std::result::Result<T, JsonError>;
