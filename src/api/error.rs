// ABOUTME: Terminal error types for remote API calls with SNAFU pattern.
// ABOUTME: Distinguishes exhausted 5xx retries from non-retryable failures.

use snafu::Snafu;

pub const MAX_RETRIES_HEADER: &str = "Max retries exceeded for service error (5XX)\n";

/// Diagnostic line recorded for one 5xx attempt.
pub fn server_error_line(attempt: crate::types::Attempt, status_line: &str) -> String {
    format!(
        "Received 5XX error during attempt {}\n   {}\n",
        attempt, status_line
    )
}

/// Every attempt of a call failed with a 5xx status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MaxRetriesError {
    message: String,
    attempts: usize,
}

impl MaxRetriesError {
    /// Build from the per-attempt diagnostics, in attempt order.
    pub fn new(aggregated: &[String]) -> Self {
        Self {
            message: format!("{}{}", MAX_RETRIES_HEADER, aggregated.join("\n")),
            attempts: aggregated.len(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of 5xx attempts aggregated into the message.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// A non-retryable failure, message kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
    status: Option<u16>,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Terminal outcome of a failed logical call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("{source}"))]
    MaxRetries { source: MaxRetriesError },

    #[snafu(display("{source}"))]
    Command { source: CommandError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Retries exhausted on persistent 5xx responses.
    MaxRetries,
    /// Client error, malformed response, or transport failure.
    Command,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::MaxRetries { .. } => ApiErrorKind::MaxRetries,
            ApiError::Command { .. } => ApiErrorKind::Command,
        }
    }

    /// Plain-text message, identical to what is printed to the user.
    pub fn message(&self) -> &str {
        match self {
            ApiError::MaxRetries { source } => source.message(),
            ApiError::Command { source } => source.message(),
        }
    }

    /// Status of the final failure when it was a non-retryable status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::MaxRetries { .. } => None,
            ApiError::Command { source } => source.status(),
        }
    }
}

impl From<MaxRetriesError> for ApiError {
    fn from(source: MaxRetriesError) -> Self {
        ApiError::MaxRetries { source }
    }
}

impl From<CommandError> for ApiError {
    fn from(source: CommandError) -> Self {
        ApiError::Command { source }
    }
}
