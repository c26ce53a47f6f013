// ABOUTME: Raw API call command implementation.
// ABOUTME: Parses KEY=VALUE or JSON parameters and prints the operation result.

use super::client::connect;
use ebcli::api::Params;
use ebcli::config::Config;
use ebcli::error::{Error, Result};
use ebcli::output::Output;
use serde_json::Value;

pub async fn call(
    config: &Config,
    service: &str,
    operation: &str,
    pairs: &[String],
    json: Option<&str>,
    output: &mut Output,
) -> Result<()> {
    let params = match json {
        Some(json) => parse_json_params(json)?,
        None => parse_pairs(pairs)?,
    };

    let invoker = connect(config)?;
    output.start_timer();
    let value = invoker.call(service, operation, &params).await?;
    output.result(&value);
    Ok(())
}

fn parse_json_params(json: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidParam(format!(
            "--params must be a JSON object, got {other}"
        ))),
    }
}

/// VALUE is taken as JSON when it parses, otherwise as a plain string.
fn parse_pairs(pairs: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::InvalidParam(format!("expected KEY=VALUE, got '{pair}'")))?;
        if key.is_empty() {
            return Err(Error::InvalidParam(format!("empty key in '{pair}'")));
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}
