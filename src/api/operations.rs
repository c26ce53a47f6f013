// ABOUTME: Typed helpers for the hosting-service operations the CLI issues.
// ABOUTME: Wraps Invoker::call and deserializes the JSON payloads.

use super::backoff::Backoff;
use super::error::{ApiError, CommandError};
use super::invoker::Invoker;
use super::transport::{Params, Transport};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const SERVICE: &str = "elasticbeanstalk";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationDescription {
    pub application_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentDescription {
    pub environment_name: String,
    pub application_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub version_label: Option<String>,
    #[serde(default, rename = "CNAME")]
    pub cname: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApplicationsResult {
    #[serde(default)]
    applications: Vec<ApplicationDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeEnvironmentsResult {
    #[serde(default)]
    environments: Vec<EnvironmentDescription>,
}

/// List every application visible to the caller.
pub async fn describe_applications<T: Transport, B: Backoff>(
    invoker: &Invoker<T, B>,
) -> Result<Vec<ApplicationDescription>, ApiError> {
    let value = invoker
        .call(SERVICE, "DescribeApplications", &Params::new())
        .await?;
    let result: DescribeApplicationsResult = decode("DescribeApplications", value)?;
    Ok(result.applications)
}

/// List environments, optionally restricted to one application.
pub async fn describe_environments<T: Transport, B: Backoff>(
    invoker: &Invoker<T, B>,
    application: Option<&str>,
) -> Result<Vec<EnvironmentDescription>, ApiError> {
    let mut params = Params::new();
    if let Some(app) = application {
        params.insert(
            "ApplicationName".to_string(),
            Value::String(app.to_string()),
        );
    }
    let value = invoker
        .call(SERVICE, "DescribeEnvironments", &params)
        .await?;
    let result: DescribeEnvironmentsResult = decode("DescribeEnvironments", value)?;
    Ok(result.environments)
}

fn decode<R: DeserializeOwned>(operation: &str, value: Value) -> Result<R, ApiError> {
    // A null body means an empty result set.
    let value = if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    };
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(operation, error = %e, "unexpected response shape");
        CommandError::new(format!("unexpected {operation} response: {e}")).into()
    })
}
