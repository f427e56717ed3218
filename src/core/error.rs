use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
/// Errors that could appear in messages' constructors and operations
pub enum MessageError {
    /// A parameter violates a message's invariant (e.g. negative precision or variance)
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: String,

        /// Value that has been rejected
        value: f64,

        /// Why the value has been rejected
        reason: String,
    },

    /// Two discrete messages are defined over different numbers of outcomes
    #[error("Dimension mismatch: a message over {left} outcomes cannot be combined with a message over {right} outcomes")]
    DimensionMismatch {
        /// Number of outcomes of the left operand
        left: usize,

        /// Number of outcomes of the right operand
        right: usize,
    },

    /// A reduction has been applied to an empty sequence
    #[error("Empty input: at least one value is required")]
    EmptyInput,
}

impl MessageError {
    #[inline]
    pub(crate) fn invalid(name: &str, value: f64, reason: &str) -> Self {
        tracing::debug!(name, value, reason, "rejecting message parameter");
        MessageError::InvalidParameter {
            name: name.to_owned(),
            value,
            reason: reason.to_owned(),
        }
    }

    #[inline]
    pub(crate) fn mismatch(left: usize, right: usize) -> Self {
        tracing::debug!(left, right, "rejecting messages of different dimensions");
        MessageError::DimensionMismatch { left, right }
    }
}

/// Messages' methods result type
pub type MessageResult<T> = Result<T, MessageError>;
