// ABOUTME: Resilient remote API invocation layer.
// ABOUTME: Transport capability, classification, backoff, retrying invoker, and terminal errors.

mod backoff;
mod classify;
mod error;
mod http;
mod invoker;
pub mod operations;
mod transport;

pub use backoff::{Backoff, CappedExponential, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, NoDelay};
pub use classify::{Classification, classify, classify_error, is_retryable};
pub use error::{
    ApiError, ApiErrorKind, CommandError, MAX_RETRIES_HEADER, MaxRetriesError, server_error_line,
};
pub use http::{DEFAULT_TIMEOUT, HttpTransport};
pub use invoker::{Invoker, MAX_ATTEMPTS, USER_AGENT};
pub use transport::{Params, ServiceError, Transport, TransportError};
