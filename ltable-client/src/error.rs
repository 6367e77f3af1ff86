/// Error types for the Logger Table client
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Protocol mismatch: expected {expected}, received {actual}")]
    ProtocolMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Returns a stable error code for this error variant.
    /// These codes are stable and can be used by callers for error classification.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ClientError::OperationFailed(_) => "OPERATION_FAILED",
            ClientError::ProtocolMismatch { .. } => "PROTOCOL_MISMATCH",
        }
    }
}
