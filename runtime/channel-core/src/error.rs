//! Error types for the channel-data pipeline.

use thiserror::Error;

/// Result type alias for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Errors produced by the read/write/subscribe pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    // =========================================================================
    // Access errors
    // =========================================================================

    /// Caller lacks the access right required for this operation.
    #[error("access denied: {operation} requires {required:?}")]
    Forbidden {
        operation: &'static str,
        required: crate::types::AccessRights,
    },

    // =========================================================================
    // Request shape errors
    // =========================================================================

    /// Request is structurally invalid for the channel it targets.
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    /// Array length exceeds the channel's configured maximum.
    #[error("value length {length} exceeds max_length {max_length}")]
    OutOfBounds { length: usize, max_length: usize },

    /// A zero-length array was written to a scalar channel.
    #[error("empty array written to scalar channel")]
    EmptyScalar,

    // =========================================================================
    // Value errors
    // =========================================================================

    /// A scalar write fell outside the channel's control limits.
    #[error("cannot write {value}: outside control limits [{lo}, {hi}]")]
    CannotExceedLimits { value: f64, lo: f64, hi: f64 },

    /// A conversion between two channel types could not be performed.
    #[error("cannot convert {from:?} to {to:?}: {reason}")]
    BadConversion {
        from: crate::types::NativeBase,
        to: crate::types::NativeBase,
        reason: String,
    },

    // =========================================================================
    // Internal errors
    // =========================================================================

    /// A registered queue or subscriber handle no longer exists.
    #[error("subscriber queue closed")]
    QueueClosed,

    /// An enum table or string channel was configured outside protocol limits.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl ChannelError {
    /// Returns a stable numeric code for the error category, grouped the
    /// way the pipeline's own error taxonomy is grouped in section 7.
    pub fn error_code(&self) -> u16 {
        match self {
            // Access errors: 1xx
            Self::Forbidden { .. } => 100,

            // Request shape errors: 2xx
            Self::BadRequest { .. } => 200,
            Self::OutOfBounds { .. } => 201,
            Self::EmptyScalar => 202,

            // Value errors: 3xx
            Self::CannotExceedLimits { .. } => 300,
            Self::BadConversion { .. } => 301,

            // Internal errors: 9xx
            Self::QueueClosed => 900,
            Self::InvalidConfig { .. } => 901,
        }
    }

    /// Whether retrying the same operation unchanged could plausibly
    /// succeed. Limit violations and bad requests are not recoverable
    /// without changing the request; a closed queue might reopen.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::QueueClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_grouped_by_category() {
        let err = ChannelError::OutOfBounds { length: 5, max_length: 4 };
        assert_eq!(err.error_code(), 201);

        let err = ChannelError::CannotExceedLimits { value: 12.0, lo: 0.0, hi: 10.0 };
        assert_eq!(err.error_code(), 300);
    }

    #[test]
    fn only_queue_closed_is_recoverable() {
        assert!(ChannelError::QueueClosed.is_recoverable());
        assert!(!ChannelError::EmptyScalar.is_recoverable());
    }
}
