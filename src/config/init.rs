// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates eb.yml template files.

use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    application: Option<&str>,
    region: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(app) = application {
        if app.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "application name cannot be empty".to_string(),
            ));
        }
        config.application = Some(app.to_string());
    }

    if let Some(r) = region {
        config.region = r.to_string();
    }

    let yaml = generate_template_yaml(&config);
    // Round-trip so a bad flag never produces an unreadable file.
    Config::from_yaml(&yaml)?;
    std::fs::write(&config_path, yaml)?;

    tracing::debug!("wrote {}", config_path.display());
    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"application: {}
region: {}
# endpoint: https://elasticbeanstalk.{}.amazonaws.com
timeout: {}
retry:
  base_delay: {}
  max_delay: {}
  max_attempts: {}
"#,
        config.application.as_deref().unwrap_or("my-app"),
        config.region,
        config.region,
        format_duration(config.timeout),
        format_duration(config.retry.base_delay),
        format_duration(config.retry.max_delay),
        config.retry.max_attempts,
    )
}

fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
