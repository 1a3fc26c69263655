//! Browser steps composed by page objects

use serde::{Deserialize, Serialize};

/// A single browser action or assertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to an absolute URL
    Navigate {
        url: String,
        #[serde(default)]
        wait_until: LoadState,
    },

    /// Click an element
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Fill an input field
    Fill {
        selector: String,
        value: String,
        /// Keep the value out of logs and result files
        #[serde(default)]
        secret: bool,
    },

    /// Wait for an element to reach a state
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Retrying assertion: element becomes visible
    ExpectVisible { selector: String },

    /// Retrying assertion: element text equals `text`
    ExpectText { selector: String, text: String },

    /// Retrying assertion: page URL equals `url`
    ExpectUrl { url: String },

    /// Log a message (for debugging)
    Log { message: String },
}

fn default_wait_timeout() -> u64 {
    5000 // 5 seconds default
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

/// Navigation completion condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Load,
    DomContentLoaded,
    NetworkIdle,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Load => "load",
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
        }
    }
}

impl TestStep {
    /// Short human-readable label used in logs and results
    pub fn label(&self) -> String {
        match self {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Click { selector, .. } => format!("click:{}", selector),
            TestStep::Fill { selector, value, secret } => {
                if *secret {
                    format!("fill:{}=<redacted>", selector)
                } else {
                    format!("fill:{}={}", selector, value)
                }
            }
            TestStep::Wait { selector, state, .. } => {
                format!("wait:{}:{}", selector, state.as_str())
            }
            TestStep::ExpectVisible { selector } => format!("expect-visible:{}", selector),
            TestStep::ExpectText { selector, .. } => format!("expect-text:{}", selector),
            TestStep::ExpectUrl { url } => format!("expect-url:{}", url),
            TestStep::Log { message } => {
                let end = message
                    .char_indices()
                    .nth(30)
                    .map(|(i, _)| i)
                    .unwrap_or(message.len());
                format!("log:{}", &message[..end])
            }
        }
    }

    /// Copy safe to persist: secret fill values are blanked
    pub fn redacted(&self) -> TestStep {
        match self {
            TestStep::Fill { selector, secret: true, .. } => TestStep::Fill {
                selector: selector.clone(),
                value: "<redacted>".to_string(),
                secret: true,
            },
            other => other.clone(),
        }
    }
}
