use thiserror::Error;

use crate::{Kind, Span};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way an operation on a [`JsonValue`][crate::JsonValue] can fail. None of these are
/// recoverable inside the crate; they are handed straight back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A payload of one variant was requested from a value holding another.
    #[error("type mismatch: expected {expected} but found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A field-set (or push) was attempted on a value that cannot hold one.
    #[error("cannot {op} on a {found} value")]
    InvalidMutationTarget { op: &'static str, found: Kind },

    /// The parser input does not match the JSON grammar at `span`.
    #[error("malformed JSON at {span}: {reason}")]
    MalformedJson { span: Span, reason: String },

    /// Container nesting went past the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// NaN and the infinities have no JSON spelling.
    #[error("non-finite float cannot be serialized as JSON")]
    NonFiniteFloat,
}

impl Error {
    pub(crate) fn malformed(span: Span, reason: impl Into<String>) -> Self {
        Error::MalformedJson {
            span,
            reason: reason.into(),
        }
    }

    /// The offending source region, for errors that carry one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::MalformedJson { span, .. } => Some(*span),
            _ => None,
        }
    }
}
