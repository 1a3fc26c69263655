//! Error types for journey execution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error(transparent)]
    Common(#[from] storefront_common::Error),

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Journey not found: {0}")]
    JourneyNotFound(String),

    #[error("Timeout after {millis}ms waiting for: {what}")]
    Timeout { what: String, millis: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
