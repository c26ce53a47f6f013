// ABOUTME: Shared helper for building the retrying API client.
// ABOUTME: Eliminates duplication across call, list, and status commands.

use ebcli::api::{CappedExponential, HttpTransport, Invoker};
use ebcli::config::Config;
use ebcli::error::Result;

/// Build an invoker for the configured endpoint and retry policy.
pub fn connect(config: &Config) -> Result<Invoker<HttpTransport, CappedExponential>> {
    let endpoint = config.endpoint();
    tracing::debug!(%endpoint, region = %config.region, "connecting");

    let transport = HttpTransport::new(endpoint, config.timeout)?;
    Ok(Invoker::new(transport, config.retry.backoff()).with_max_attempts(config.retry.max_attempts))
}
