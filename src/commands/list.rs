// ABOUTME: List command implementation.
// ABOUTME: Prints every application with its description.

use super::client::connect;
use ebcli::api::operations::describe_applications;
use ebcli::config::Config;
use ebcli::error::Result;
use ebcli::output::Output;
use serde_json::json;

pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let invoker = connect(config)?;
    let applications = describe_applications(&invoker).await?;

    if applications.is_empty() {
        output.progress("No applications found");
        return Ok(());
    }

    for app in &applications {
        let line = match app.description {
            Some(ref description) => format!("{}  {}", app.application_name, description),
            None => app.application_name.clone(),
        };
        output.row(
            &line,
            &json!({
                "application": app.application_name,
                "description": app.description,
                "versions": app.versions,
            }),
        );
    }
    Ok(())
}
