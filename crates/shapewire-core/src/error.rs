//! Error types for the shapewire codec.

use crate::descriptor::ScalarKind;

/// Errors raised while encoding or decoding shapes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The caller handed the encoder something that does not satisfy the
    /// shape's contract (missing required field, wrong value kind, unknown
    /// field, duplicate parameter).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The text of a recognized field could not be converted to its scalar type.
    #[error("failed to parse {shape}.{field} from '{text}': {reason}")]
    Parse {
        /// Shape that owns the field.
        shape: &'static str,
        /// Wire name of the field.
        field: &'static str,
        /// The offending text.
        text: String,
        /// Why conversion failed.
        reason: String,
    },

    /// A record value did not have the kind a typed shape expected.
    #[error("type mismatch for field {field}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Field name.
        field: &'static str,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        found: &'static str,
    },

    /// Element nesting exceeded the configured limit.
    #[error("element nesting exceeds maximum depth of {0}")]
    TooDeep(usize),

    /// The element stream was not well formed (unbalanced enter/exit).
    #[error("malformed element stream: {0}")]
    MalformedStream(String),
}

impl CodecError {
    pub(crate) fn parse(
        shape: &'static str,
        field: &'static str,
        kind: ScalarKind,
        text: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::Parse {
            shape,
            field,
            text: text.to_owned(),
            reason: format!("invalid {}: {reason}", kind.as_str()),
        }
    }
}

/// Convenience result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
