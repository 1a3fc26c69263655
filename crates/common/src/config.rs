//! Suite configuration
//!
//! Everything a journey or the report converter needs is gathered into one
//! [`SuiteConfig`] built at startup and passed by reference. Credentials are
//! read from the environment exactly once, in [`SuiteConfig::load`]; nothing
//! downstream touches the process environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::runtime::NodeRuntime;

/// Environment variable holding the storefront username
pub const USER_VAR: &str = "SAUCE_USER";

/// Environment variable holding the storefront password
pub const PASSWORD_VAR: &str = "SAUCE_SENHA";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL of the Swag Labs storefront
    pub swag_labs_url: String,

    /// Base URL of the nopCommerce demo store
    pub nop_commerce_url: String,

    /// Bounded waits for every suspension point
    pub timeouts: Timeouts,

    /// Node.js runtime used to drive Playwright
    pub runtime: NodeRuntime,

    /// Launch browsers without a window
    pub headless: bool,

    /// Login credentials; never read from or written to config files
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            swag_labs_url: "https://www.saucedemo.com".to_string(),
            nop_commerce_url: "https://demo.nopcommerce.com".to_string(),
            timeouts: Timeouts::default(),
            runtime: NodeRuntime::default(),
            headless: true,
            credentials: Credentials::default(),
        }
    }
}

impl SuiteConfig {
    /// Build the configuration from an optional TOML file, `.env` and the
    /// process environment.
    ///
    /// `.env` values take precedence over variables already set, so a CI
    /// provided file wins over stale shell state.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match dotenvy::dotenv_override() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::InvalidConfig(format!(".env: {}", e))),
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.credentials.log_presence();
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment-style overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("SAUCE_BASE_URL") {
            self.swag_labs_url = url;
        }
        if let Some(url) = get("NOPCOMMERCE_BASE_URL") {
            self.nop_commerce_url = url;
        }
        if let Some(node) = get("E2E_NODE_BIN") {
            self.runtime.node_bin = node.into();
        }
        if let Some(headed) = get("E2E_HEADED") {
            self.headless = !matches!(headed.as_str(), "1" | "true" | "yes");
        }

        let millis = |key: &str| get(key).and_then(|v| v.parse::<u64>().ok());
        if let Some(ms) = millis("E2E_ACTION_TIMEOUT_MS") {
            self.timeouts.action_ms = ms;
        }
        if let Some(ms) = millis("E2E_NAVIGATION_TIMEOUT_MS") {
            self.timeouts.navigation_ms = ms;
        }
        if let Some(ms) = millis("E2E_NETWORK_IDLE_TIMEOUT_MS") {
            self.timeouts.network_idle_ms = ms;
        }
        if let Some(ms) = millis("E2E_PDF_TIMEOUT_MS") {
            self.timeouts.pdf_ms = ms;
        }

        self.credentials = Credentials {
            user: get(USER_VAR),
            password: get(PASSWORD_VAR),
        };
    }
}

/// Bounded waits, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub launch_ms: u64,
    pub navigation_ms: u64,
    pub network_idle_ms: u64,
    pub action_ms: u64,
    pub evaluate_ms: u64,
    pub pdf_ms: u64,
    pub close_ms: u64,
    /// Upper bound for a whole journey script
    pub journey_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            launch_ms: 30_000,
            navigation_ms: 30_000,
            network_idle_ms: 30_000,
            action_ms: 5_000,
            evaluate_ms: 10_000,
            pdf_ms: 60_000,
            close_ms: 5_000,
            journey_ms: 120_000,
        }
    }
}

impl Timeouts {
    pub fn launch(&self) -> Duration {
        Duration::from_millis(self.launch_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn action(&self) -> Duration {
        Duration::from_millis(self.action_ms)
    }

    pub fn evaluate(&self) -> Duration {
        Duration::from_millis(self.evaluate_ms)
    }

    pub fn pdf(&self) -> Duration {
        Duration::from_millis(self.pdf_ms)
    }

    pub fn close(&self) -> Duration {
        Duration::from_millis(self.close_ms)
    }

    pub fn journey(&self) -> Duration {
        Duration::from_millis(self.journey_ms)
    }
}

/// Storefront login credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
        }
    }

    /// Both values, or `MissingCredentials` naming the variables to set
    pub fn require(&self) -> Result<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) => Ok((user, password)),
            _ => Err(Error::MissingCredentials {
                user_var: USER_VAR,
                password_var: PASSWORD_VAR,
            }),
        }
    }

    pub fn log_presence(&self) {
        let yes_no = |v: &Option<String>| if v.is_some() { "yes" } else { "no" };
        info!(
            "Credentials present? user: {}, password: {}",
            yes_no(&self.user),
            yes_no(&self.password)
        );
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_fill_credentials_and_timeouts() {
        let mut config = SuiteConfig::default();
        config.apply_overrides(lookup(&[
            (USER_VAR, "standard_user"),
            (PASSWORD_VAR, "secret_sauce"),
            ("E2E_ACTION_TIMEOUT_MS", "750"),
            ("SAUCE_BASE_URL", "http://127.0.0.1:3000"),
        ]));

        assert_eq!(config.credentials.require().unwrap(), ("standard_user", "secret_sauce"));
        assert_eq!(config.timeouts.action(), Duration::from_millis(750));
        assert_eq!(config.swag_labs_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_credentials_read_from_ci_secret_names() {
        let mut config = SuiteConfig::default();
        config.apply_overrides(lookup(&[("SAUCE_USER", "standard_user"), ("SAUCE_SENHA", "secret_sauce")]));
        assert_eq!(config.credentials.require().unwrap(), ("standard_user", "secret_sauce"));

        let err = SuiteConfig::default().credentials.require().unwrap_err();
        assert!(err.to_string().contains("SAUCE_SENHA"));
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let mut config = SuiteConfig::default();
        config.apply_overrides(lookup(&[(USER_VAR, "   "), (PASSWORD_VAR, "x")]));

        let err = config.credentials.require().unwrap_err();
        assert!(err.to_string().contains(USER_VAR));
        assert!(err.to_string().contains(PASSWORD_VAR));
    }

    #[test]
    fn test_unparseable_timeout_keeps_default() {
        let mut config = SuiteConfig::default();
        config.apply_overrides(lookup(&[("E2E_PDF_TIMEOUT_MS", "soon")]));
        assert_eq!(config.timeouts.pdf_ms, Timeouts::default().pdf_ms);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("standard_user", "secret_sauce");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("standard_user"));
        assert!(!rendered.contains("secret_sauce"));
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.toml");
        std::fs::write(
            &path,
            r#"
headless = false

[timeouts]
navigation_ms = 1234
"#,
        )
        .unwrap();

        let config = SuiteConfig::from_file(&path).unwrap();
        assert!(!config.headless);
        assert_eq!(config.timeouts.navigation_ms, 1234);
        assert_eq!(config.timeouts.action_ms, Timeouts::default().action_ms);
        assert!(config.credentials.user.is_none());
    }
}
