//! Playwright browser automation
//!
//! A journey is compiled into one Node script that drives Playwright and
//! reports progress as JSON lines on stdout:
//!
//! ```text
//! {"event":"step","index":0,"ok":true,"duration_ms":412}
//! {"event":"step","index":3,"ok":false,"error":"Timeout 5000ms exceeded","screenshot":"..."}
//! {"event":"done","success":false}
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use storefront_common::{NodeRuntime, SuiteConfig, Timeouts};
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};
use crate::journey::Journey;
use crate::step::TestStep;

/// Playwright browser handle
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
    runtime: NodeRuntime,
    timeouts: Timeouts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Playwright(format!("Unknown browser: {}", other))),
        }
    }
}

/// Result of executing a test step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
}

/// One JSON line printed by a journey script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Step {
        index: usize,
        ok: bool,
        #[serde(default)]
        duration_ms: u64,
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        screenshot: Option<PathBuf>,
    },
    Done {
        success: bool,
    },
}

impl PlaywrightHandle {
    /// Create a handle, verifying Playwright is resolvable first
    pub async fn new(config: PlaywrightConfig, suite: &SuiteConfig) -> E2eResult<Self> {
        suite.runtime.check_playwright(suite.timeouts.launch()).await?;

        if let Some(dir) = &config.failure_screenshot_dir {
            std::fs::create_dir_all(dir)?;
        }

        Ok(Self::unchecked(config, suite))
    }

    /// Create a handle without probing the runtime
    pub fn unchecked(config: PlaywrightConfig, suite: &SuiteConfig) -> Self {
        Self {
            config,
            runtime: suite.runtime.clone(),
            timeouts: suite.timeouts.clone(),
        }
    }

    /// Build the Playwright script for a journey
    pub fn build_script(&self, journey: &Journey) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

const emit = (event) => console.log(JSON.stringify(event));

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless}, timeout: {launch} }});
  let current = -1;
  let page = null;
  const step = async (index, body) => {{
    current = index;
    const started = Date.now();
    await body();
    emit({{ event: 'step', index, ok: true, duration_ms: Date.now() - started }});
  }};

  try {{
    const context = await browser.newContext({{
      viewport: {{ width: {width}, height: {height} }}
    }});
    page = await context.newPage();
    page.setDefaultTimeout({action});
    page.setDefaultNavigationTimeout({navigation});
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            launch = self.timeouts.launch_ms,
            width = journey.viewport.width,
            height = journey.viewport.height,
            action = self.timeouts.action_ms,
            navigation = self.timeouts.navigation_ms,
        ));

        for (i, step) in journey.steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.redacted().label()));
            script.push_str(&format!(
                "    await step({}, async () => {{\n{}\n    }});\n",
                i,
                self.step_to_js(step)
            ));
        }

        let screenshot = match &self.config.failure_screenshot_dir {
            Some(dir) => {
                let path = dir.join(format!("{}.png", journey.name));
                format!(
                    r#"
    if (page) {{
      try {{
        await page.screenshot({{ path: {path}, fullPage: true }});
        failure.screenshot = {path};
      }} catch (_) {{}}
    }}"#,
                    path = js_str(&path.to_string_lossy())
                )
            }
            None => String::new(),
        };

        script.push_str(&format!(
            r#"
    emit({{ event: 'done', success: true }});
  }} catch (error) {{
    const failure = {{ event: 'step', index: current, ok: false, error: String((error && error.message) || error) }};{screenshot}
    emit(failure);
    emit({{ event: 'done', success: false }});
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            screenshot = screenshot
        ));

        script
    }

    /// Convert a step to JavaScript code
    fn step_to_js(&self, step: &TestStep) -> String {
        let action = self.timeouts.action_ms;
        match step {
            TestStep::Navigate { url, wait_until } => format!(
                "      await page.goto({}, {{ waitUntil: {} }});",
                js_str(url),
                js_str(wait_until.as_str())
            ),
            TestStep::Click { selector, timeout_ms } => format!(
                "      await page.locator({}).click({{ timeout: {} }});",
                js_str(selector),
                timeout_ms.unwrap_or(action)
            ),
            TestStep::Fill { selector, value, .. } => format!(
                "      await page.locator({}).fill({});",
                js_str(selector),
                js_str(value)
            ),
            TestStep::Wait { selector, timeout_ms, state } => format!(
                "      await page.waitForSelector({}, {{ state: {}, timeout: {} }});",
                js_str(selector),
                js_str(state.as_str()),
                timeout_ms
            ),
            TestStep::ExpectVisible { selector } => format!(
                "      await expect(page.locator({})).toBeVisible({{ timeout: {} }});",
                js_str(selector),
                action
            ),
            TestStep::ExpectText { selector, text } => format!(
                "      await expect(page.locator({})).toHaveText({}, {{ timeout: {} }});",
                js_str(selector),
                js_str(text),
                action
            ),
            TestStep::ExpectUrl { url } => format!(
                "      await expect(page).toHaveURL({}, {{ timeout: {} }});",
                js_str(url),
                action
            ),
            TestStep::Log { message } => {
                format!("      console.error('[JOURNEY] ' + {});", js_str(message))
            }
        }
    }

    /// Execute a script under Node, bounded by the journey timeout
    pub async fn run_script(&self, script: &str) -> E2eResult<ScriptOutput> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("journey.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let mut cmd = self.runtime.command();
        cmd.arg(&script_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let limit = self.timeouts.journey();
        let output = match tokio::time::timeout(limit, cmd.output()).await {
            Ok(output) => output?,
            Err(_) => {
                return Err(E2eError::Timeout {
                    what: "journey script".to_string(),
                    millis: self.timeouts.journey_ms,
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in stderr.lines().filter(|l| l.starts_with("[JOURNEY]")) {
            debug!("{}", line);
        }

        Ok(ScriptOutput {
            events: parse_events(&stdout),
            success: output.status.success(),
            stderr,
        })
    }

    /// Run a journey, stopping at its first failing step
    pub async fn run_journey(&self, journey: &Journey) -> E2eResult<Vec<StepResult>> {
        let script = self.build_script(journey);
        let output = self.run_script(&script).await?;
        output.into_step_results(journey)
    }
}

/// Captured script run
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    pub events: Vec<ScriptEvent>,
    pub success: bool,
    pub stderr: String,
}

impl ScriptOutput {
    /// Pair step events with the journey's steps.
    ///
    /// A script that died before reporting any outcome (missing module,
    /// browser launch failure) is an error rather than a failed step.
    pub fn into_step_results(self, journey: &Journey) -> E2eResult<Vec<StepResult>> {
        let done = self.events.iter().find_map(|e| match e {
            ScriptEvent::Done { success } => Some(*success),
            _ => None,
        });
        if done.is_none() {
            return Err(E2eError::Playwright(format!(
                "Script exited without a result:\nstderr: {}",
                self.stderr.trim()
            )));
        }

        let mut results = Vec::new();
        for event in self.events {
            let ScriptEvent::Step { index, ok, duration_ms, error, screenshot } = event else {
                continue;
            };
            let step_name = journey
                .steps
                .get(index)
                .map(|s| s.label())
                .unwrap_or_else(|| "setup".to_string());
            results.push(StepResult {
                success: ok,
                step_name,
                duration_ms,
                error,
                screenshot_path: screenshot,
            });
            if !ok {
                break;
            }
        }

        if done == Some(false) && results.iter().all(|r| r.success) {
            results.push(StepResult {
                success: false,
                step_name: "teardown".to_string(),
                duration_ms: 0,
                error: Some(self.stderr.trim().to_string()),
                screenshot_path: None,
            });
        }

        Ok(results)
    }
}

fn parse_events(stdout: &str) -> Vec<ScriptEvent> {
    let mut events = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<ScriptEvent>(line) {
            Ok(event) => events.push(event),
            Err(_) => warn!("Ignoring non-event output: {}", line),
        }
    }
    events
}

/// Quote a string as a JavaScript literal
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub headless: bool,
    /// Where to save a full-page screenshot when a journey fails
    pub failure_screenshot_dir: Option<PathBuf>,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            failure_screenshot_dir: Some(PathBuf::from("test-results/screenshots")),
        }
    }
}
