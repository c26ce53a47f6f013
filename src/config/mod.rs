// ABOUTME: Configuration types and parsing for eb.yml.
// ABOUTME: Handles YAML parsing, discovery, and env/flag overrides.

mod init;
mod retry;

pub use init::init_config;
pub use retry::RetryConfig;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "eb.yml";
pub const CONFIG_FILENAME_ALT: &str = "eb.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".elasticbeanstalk/config.yml";

pub const ENV_REGION: &str = "EB_REGION";
pub const ENV_ENDPOINT: &str = "EB_ENDPOINT";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub application: Option<String>,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_timeout() -> Duration {
    crate::api::DEFAULT_TIMEOUT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            application: None,
            region: default_region(),
            endpoint: None,
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

/// Values supplied on the command line; they win over env and file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub application: Option<String>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or defaults when there is none.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("no configuration file in {}, using defaults", dir.display());
                Ok(Config::default())
            }
        }
    }

    fn find(dir: &Path) -> Option<std::path::PathBuf> {
        [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Apply `EB_REGION`/`EB_ENDPOINT`, then command-line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Ok(region) = std::env::var(ENV_REGION) {
            self.region = region;
        }
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }

        if let Some(ref region) = overrides.region {
            self.region = region.clone();
        }
        if let Some(ref endpoint) = overrides.endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        if let Some(ref application) = overrides.application {
            self.application = Some(application.clone());
        }

        self.validate()?;
        Ok(self)
    }

    /// Endpoint to talk to: explicit, or derived from the region.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://elasticbeanstalk.{}.amazonaws.com", self.region))
    }

    fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::InvalidConfig("region cannot be empty".to_string()));
        }
        if let Some(ref endpoint) = self.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(Error::InvalidConfig(format!(
                "endpoint must be an http(s) URL: {endpoint}"
            )));
        }
        self.retry.validate()
    }

    pub fn template() -> Self {
        Config {
            application: Some("my-app".to_string()),
            ..Config::default()
        }
    }
}
