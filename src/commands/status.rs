// ABOUTME: Status command implementation.
// ABOUTME: Shows status, health, and deployed version of each environment.

use super::client::connect;
use ebcli::api::operations::describe_environments;
use ebcli::config::Config;
use ebcli::error::{Error, Result};
use ebcli::output::Output;
use serde_json::json;

pub async fn status(config: &Config, output: &Output) -> Result<()> {
    let application = config.application.as_deref().ok_or(Error::NoApplication)?;

    output.progress(&format!("Application: {application}"));
    output.progress(&format!("Region: {}", config.region));

    let invoker = connect(config)?;
    let environments = describe_environments(&invoker, Some(application)).await?;

    if environments.is_empty() {
        output.progress("No environments found");
        return Ok(());
    }

    for env in &environments {
        let line = format!(
            "  {}  status={}  health={}  version={}",
            env.environment_name,
            env.status.as_deref().unwrap_or("-"),
            env.health.as_deref().unwrap_or("-"),
            env.version_label.as_deref().unwrap_or("-"),
        );
        output.row(
            &line,
            &json!({
                "environment": env.environment_name,
                "application": env.application_name,
                "status": env.status,
                "health": env.health,
                "version": env.version_label,
                "cname": env.cname,
            }),
        );
    }
    Ok(())
}
