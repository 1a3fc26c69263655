//! Error types shared across the storefront crates

use thiserror::Error;

/// Result type alias using the shared Error
pub type Result<T> = std::result::Result<T, Error>;

/// Shared error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error(
        "Missing credentials: set {user_var} and {password_var} (environment or .env file)"
    )]
    MissingCredentials {
        user_var: &'static str,
        password_var: &'static str,
    },

    #[error("Node.js runtime not found at '{0}'. Install Node.js and make sure it is on PATH")]
    NodeNotFound(String),

    #[error("Playwright is not installed. Run `npm install playwright && npx playwright install` first")]
    PlaywrightNotFound,

    #[error("Operation timeout after {millis}ms: {operation}")]
    Timeout { operation: String, millis: u64 },
}

impl Error {
    /// True for errors caused by a missing runtime dependency rather than by a run
    pub fn is_environment(&self) -> bool {
        matches!(self, Error::NodeNotFound(_) | Error::PlaywrightNotFound)
    }
}
