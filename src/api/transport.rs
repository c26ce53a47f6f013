// ABOUTME: Transport capability consumed by the retrying invoker.
// ABOUTME: Defines the structured error descriptor a raw remote call can fail with.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Operation-specific arguments, passed through untouched.
pub type Params = Map<String, Value>;

/// Performs one raw remote call.
///
/// Implementations own all connection state (endpoint, client identity,
/// signing). A single transport is reused for every attempt of every call
/// made through one invoker, so it must tolerate sequential reuse.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Attach the identity marker sent with every outbound call.
    fn set_user_agent(&mut self, user_agent: &str);

    /// Invoke `operation` on `service` once.
    async fn invoke(
        &self,
        service: &str,
        operation: &str,
        params: &Params,
    ) -> Result<Value, TransportError>;
}

/// Structured error returned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
    /// Full error payload as received, kept for debug logging.
    pub raw: Value,
}

impl ServiceError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
            raw: Value::Null,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = raw;
        self
    }

    /// `"<status> <reason>"` line used in retry diagnostics.
    ///
    /// Services usually put the status in the message already
    /// (`"500 Internal Server Error"`); it is only prepended when missing.
    pub fn status_line(&self) -> String {
        match self.status {
            Some(status) if !self.message.starts_with(&status.to_string()) => {
                format!("{} {}", status, self.message)
            }
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Failure of a single transport invocation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Service(ServiceError),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("malformed response: {message}")]
    Malformed {
        status: Option<u16>,
        message: String,
    },
}

impl TransportError {
    /// Status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Service(err) => err.status,
            TransportError::Connection(_) => None,
            TransportError::Malformed { status, .. } => *status,
        }
    }

    /// Plain-text message suitable for showing to a user.
    pub fn message(&self) -> String {
        match self {
            TransportError::Service(err) => err.to_string(),
            other => other.to_string(),
        }
    }

    /// `"<status> <reason>"` line for retry diagnostics.
    pub fn status_line(&self) -> String {
        match self {
            TransportError::Service(err) => err.status_line(),
            other => match other.status() {
                Some(status) => format!("{} {}", status, other),
                None => other.to_string(),
            },
        }
    }

    /// Raw payload for debug logs.
    pub fn raw(&self) -> Value {
        match self {
            TransportError::Service(err) if !err.raw.is_null() => err.raw.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<ServiceError> for TransportError {
    fn from(err: ServiceError) -> Self {
        TransportError::Service(err)
    }
}
