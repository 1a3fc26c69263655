//! Journeys: named, suite-labelled step sequences

use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};
use crate::step::{LoadState, TestStep};

/// An ordered user journey recorded by page objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journey {
    /// Unique name for this journey
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Suite label used to group results
    pub suite: String,

    /// Optional enclosing suite label
    #[serde(default)]
    pub parent_suite: Option<String>,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser
    #[serde(default)]
    pub viewport: Viewport,

    /// Steps to execute in order
    #[serde(default)]
    pub steps: Vec<TestStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport { width: 1280, height: 720 }
    }
}

impl Journey {
    pub fn new(name: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            suite: suite.into(),
            parent_suite: None,
            tags: Vec::new(),
            viewport: Viewport::default(),
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parent_suite(mut self, parent: impl Into<String>) -> Self {
        self.parent_suite = Some(parent.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Matches either the suite or the parent suite label
    pub fn in_suite(&self, suite: &str) -> bool {
        self.suite.eq_ignore_ascii_case(suite)
            || self
                .parent_suite
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case(suite))
    }

    pub fn push(&mut self, step: TestStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn navigate(&mut self, url: impl Into<String>) -> &mut Self {
        self.push(TestStep::Navigate {
            url: url.into(),
            wait_until: LoadState::Load,
        })
    }

    pub fn click(&mut self, selector: &str) -> &mut Self {
        self.push(TestStep::Click {
            selector: selector.to_string(),
            timeout_ms: None,
        })
    }

    pub fn fill(&mut self, selector: &str, value: impl Into<String>) -> &mut Self {
        self.push(TestStep::Fill {
            selector: selector.to_string(),
            value: value.into(),
            secret: false,
        })
    }

    pub fn fill_secret(&mut self, selector: &str, value: impl Into<String>) -> &mut Self {
        self.push(TestStep::Fill {
            selector: selector.to_string(),
            value: value.into(),
            secret: true,
        })
    }

    pub fn expect_visible(&mut self, selector: &str) -> &mut Self {
        self.push(TestStep::ExpectVisible {
            selector: selector.to_string(),
        })
    }

    pub fn expect_text(&mut self, selector: &str, text: impl Into<String>) -> &mut Self {
        self.push(TestStep::ExpectText {
            selector: selector.to_string(),
            text: text.into(),
        })
    }

    pub fn expect_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.push(TestStep::ExpectUrl { url: url.into() })
    }

    pub fn log(&mut self, message: impl Into<String>) -> &mut Self {
        self.push(TestStep::Log {
            message: message.into(),
        })
    }

    /// Parse a journey from YAML
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// YAML dump with secret values blanked
    pub fn to_yaml(&self) -> E2eResult<String> {
        let redacted = Journey {
            steps: self.steps.iter().map(TestStep::redacted).collect(),
            ..self.clone()
        };
        Ok(serde_yaml::to_string(&redacted)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_records_steps_in_order() {
        let mut journey = Journey::new("login", "Login").with_tags(["smoke"]);
        journey
            .navigate("https://www.saucedemo.com")
            .fill("#user-name", "standard_user")
            .fill_secret("#password", "secret_sauce")
            .click("#login-button");

        assert_eq!(journey.steps.len(), 4);
        assert!(journey.has_tag("smoke"));
        assert!(matches!(&journey.steps[3], TestStep::Click { selector, .. } if selector == "#login-button"));
    }

    #[test]
    fn test_suite_matching_is_case_insensitive_and_checks_parent() {
        let journey = Journey::new("x", "Compras").with_parent_suite("Checkout");
        assert!(journey.in_suite("compras"));
        assert!(journey.in_suite("CHECKOUT"));
        assert!(!journey.in_suite("login"));
    }

    #[test]
    fn test_yaml_dump_hides_secrets_and_parses_back() {
        let mut journey = Journey::new("login", "Login");
        journey.fill_secret("#password", "secret_sauce");

        let yaml = journey.to_yaml().unwrap();
        assert!(!yaml.contains("secret_sauce"));

        let parsed = Journey::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.name, "login");
        assert_eq!(parsed.viewport, Viewport::default());
    }
}
