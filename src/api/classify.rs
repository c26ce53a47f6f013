// ABOUTME: Response classification for remote API calls.
// ABOUTME: Only 5xx status codes are treated as transient and retryable.

use super::transport::TransportError;
use serde_json::Value;

/// Outcome of one transport invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    /// Transient server-side failure (500..=599).
    ServerError(u16),
    /// Any other status, including a malformed response with a status.
    ClientError(Option<u16>),
    /// Connectivity or serialization failure with no status code.
    TransportFailure,
}

impl Classification {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Classification::ServerError(_))
    }
}

/// Whether a status code marks a retryable server error.
pub fn is_retryable(status: u16) -> bool {
    (500..=599).contains(&status)
}

/// Classify the result of one transport invocation.
pub fn classify(result: &Result<Value, TransportError>) -> Classification {
    match result {
        Ok(_) => Classification::Success,
        Err(err) => classify_error(err),
    }
}

/// Classify a transport error by its status code and shape.
pub fn classify_error(err: &TransportError) -> Classification {
    match err.status() {
        Some(status) if is_retryable(status) => Classification::ServerError(status),
        Some(status) => Classification::ClientError(Some(status)),
        None => match err {
            TransportError::Connection(_) => Classification::TransportFailure,
            _ => Classification::ClientError(None),
        },
    }
}
