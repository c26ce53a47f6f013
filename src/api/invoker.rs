// ABOUTME: Resilient invoker wrapping a Transport with bounded 5xx retries.
// ABOUTME: Aggregates per-attempt diagnostics and surfaces one terminal outcome.

use super::backoff::{Backoff, CappedExponential};
use super::classify::{Classification, classify};
use super::error::{ApiError, CommandError, MaxRetriesError, server_error_line};
use super::transport::{Params, Transport, TransportError};
use crate::types::Attempt;
use serde_json::Value;

/// One initial try plus ten retries.
pub const MAX_ATTEMPTS: u32 = 11;

/// Identity marker attached to every outbound call.
pub const USER_AGENT: &str = concat!("eb-cli/", env!("CARGO_PKG_VERSION"));

/// Issues logical API calls, retrying transient server errors.
///
/// Each call owns its attempt counter and diagnostics buffer, so one invoker
/// can be shared by concurrent callers without their retries interfering.
pub struct Invoker<T, B = CappedExponential> {
    transport: T,
    backoff: B,
    max_attempts: u32,
}

impl<T: Transport, B: Backoff> Invoker<T, B> {
    /// Wrap a transport, tagging it with [`USER_AGENT`].
    pub fn new(mut transport: T, backoff: B) -> Self {
        transport.set_user_agent(USER_AGENT);
        Self {
            transport,
            backoff,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the attempt ceiling. Values below 1 are clamped to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke `operation` on `service`, retrying 5xx failures.
    pub async fn call(
        &self,
        service: &str,
        operation: &str,
        params: &Params,
    ) -> Result<Value, ApiError> {
        let mut attempt = Attempt::FIRST;
        let mut aggregated: Vec<String> = Vec::new();

        loop {
            tracing::debug!(service, operation, attempt = attempt.get(), "invoking API operation");
            let result = self.transport.invoke(service, operation, params).await;

            let err = match (classify(&result), result) {
                (_, Ok(value)) => {
                    tracing::debug!(service, operation, attempt = attempt.get(), "API call succeeded");
                    return Ok(value);
                }
                (classification, Err(err)) => {
                    log_failure(&err, attempt);
                    match classification {
                        Classification::ServerError(_) => err,
                        _ => {
                            tracing::debug!(?classification, "non-retryable error, giving up");
                            return Err(CommandError::new(err.message())
                                .with_status(err.status())
                                .into());
                        }
                    }
                }
            };

            tracing::debug!("Received 5xx error");
            aggregated.push(server_error_line(attempt, &err.status_line()));

            if attempt.get() >= self.max_attempts {
                tracing::debug!(attempts = aggregated.len(), "max retries exceeded");
                return Err(MaxRetriesError::new(&aggregated).into());
            }

            let delay = self.backoff.delay(attempt);
            tracing::debug!(?delay, next_attempt = attempt.next().get(), "retrying after delay");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt = attempt.next();
        }
    }
}

fn log_failure(err: &TransportError, attempt: Attempt) {
    tracing::debug!(attempt = attempt.get(), "{}", err.raw());
    match err.status() {
        Some(status) => tracing::debug!("API call finished, status = {}", status),
        None => tracing::debug!("API call failed without status: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backoff::NoDelay;
    use crate::api::error::ApiErrorKind;
    use crate::api::transport::ServiceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with the given status for the first `failures` calls, then succeeds.
    struct FlakyTransport {
        status: u16,
        failures: u32,
        calls: AtomicU32,
        user_agent: Option<String>,
    }

    impl FlakyTransport {
        fn new(status: u16, failures: u32) -> Self {
            Self {
                status,
                failures,
                calls: AtomicU32::new(0),
                user_agent: None,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FlakyTransport {
        fn set_user_agent(&mut self, user_agent: &str) {
            self.user_agent = Some(user_agent.to_string());
        }

        async fn invoke(&self, _: &str, _: &str, _: &Params) -> Result<Value, TransportError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(ServiceError::new(Some(self.status), format!("{} failure", self.status)).into())
            } else {
                Ok(Value::String("ok".to_string()))
            }
        }
    }

    fn invoker(transport: FlakyTransport) -> Invoker<FlakyTransport, NoDelay> {
        Invoker::new(transport, NoDelay)
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let invoker = invoker(FlakyTransport::new(500, 0));
        let value = invoker.call("svc", "Op", &Params::new()).await.unwrap();
        assert_eq!(value, Value::String("ok".to_string()));
        assert_eq!(invoker.transport().calls(), 1);
    }

    #[tokio::test]
    async fn recovers_after_server_errors() {
        let invoker = invoker(FlakyTransport::new(503, 10));
        assert!(invoker.call("svc", "Op", &Params::new()).await.is_ok());
        assert_eq!(invoker.transport().calls(), 11);
    }

    #[tokio::test]
    async fn gives_up_after_eleven_attempts() {
        let invoker = invoker(FlakyTransport::new(500, u32::MAX));
        let err = invoker.call("svc", "Op", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::MaxRetries);
        assert_eq!(invoker.transport().calls(), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn client_error_is_not_retried() {
        let invoker = invoker(FlakyTransport::new(404, u32::MAX));
        let err = invoker.call("svc", "Op", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Command);
        assert_eq!(err.message(), "404 failure");
        assert_eq!(err.status(), Some(404));
        assert_eq!(invoker.transport().calls(), 1);
    }

    #[tokio::test]
    async fn custom_ceiling_is_respected() {
        let invoker = invoker(FlakyTransport::new(500, u32::MAX)).with_max_attempts(3);
        let err = invoker.call("svc", "Op", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::MaxRetries);
        assert_eq!(invoker.transport().calls(), 3);
    }

    #[test]
    fn ceiling_is_at_least_one() {
        let invoker = invoker(FlakyTransport::new(500, 0)).with_max_attempts(0);
        assert_eq!(invoker.max_attempts(), 1);
    }

    #[test]
    fn user_agent_is_set_at_construction() {
        let invoker = invoker(FlakyTransport::new(500, 0));
        assert_eq!(invoker.transport().user_agent.as_deref(), Some(USER_AGENT));
        assert!(USER_AGENT.starts_with("eb-cli"));
    }
}
