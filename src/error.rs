// ABOUTME: Application-wide error types for ebcli.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::api::ApiError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("no application configured; pass --application or set it in eb.yml")]
    NoApplication,

    /// Terminal API failure; printed verbatim.
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
