// ABOUTME: HTTP transport speaking JSON to the hosting service endpoint.
// ABOUTME: Maps HTTP status and error bodies onto the structured error descriptor.

use super::transport::{Params, ServiceError, Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends `POST {endpoint}/{service}/{operation}` with the params as JSON.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    user_agent: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            user_agent: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, service: &str, operation: &str) -> String {
        format!("{}/{}/{}", self.endpoint, service, operation)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = Some(user_agent.to_string());
    }

    async fn invoke(
        &self,
        service: &str,
        operation: &str,
        params: &Params,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.post(self.url(service, operation)).json(params);
        if let Some(ref agent) = self.user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| body_read_failure(status, e.to_string()))?;

        if status.is_success() {
            parse_success(status, &body)
        } else {
            Err(parse_failure(status, &body).into())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The status line already arrived, so keep it for classification.
fn body_read_failure(status: StatusCode, message: String) -> TransportError {
    TransportError::Malformed {
        status: Some(status.as_u16()),
        message: format!("failed to read response body: {message}"),
    }
}

fn parse_success(status: StatusCode, body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| TransportError::Malformed {
        status: Some(status.as_u16()),
        message: e.to_string(),
    })
}

fn parse_failure(status: StatusCode, body: &str) -> ServiceError {
    let raw: Value = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
    let envelope = serde_json::from_value::<ErrorEnvelope>(raw.clone()).ok();

    let (code, message) = match envelope {
        Some(ErrorEnvelope { error }) => (error.code, error.message),
        None => (None, None),
    };
    let message = message.unwrap_or_else(|| canonical_line(status));

    let mut err = ServiceError::new(Some(status.as_u16()), message).with_raw(raw);
    if let Some(code) = code {
        err = err.with_code(code);
    }
    err
}

fn canonical_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
