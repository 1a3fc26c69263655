//! Test runner: builds scenario journeys, executes them and records results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use storefront_common::SuiteConfig;
use tracing::{debug, error, info};

use crate::error::{E2eError, E2eResult};
use crate::journey::Journey;
use crate::playwright::{PlaywrightConfig, PlaywrightHandle, StepResult};
use crate::scenarios::{self, Scenario};

/// Result of running a single journey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub suite: String,
    pub parent_suite: Option<String>,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
}

/// Result of running a selection of journeys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Which scenarios to run
#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    All,
    Suite(String),
    Named(String),
}

impl Selection {
    fn matches(&self, scenario: &Scenario) -> bool {
        match self {
            Selection::All => true,
            Selection::Suite(suite) => scenario.suite.eq_ignore_ascii_case(suite),
            Selection::Named(name) => scenario.name == name,
        }
    }
}

/// Main journey runner
pub struct TestRunner {
    suite: SuiteConfig,
    playwright: PlaywrightHandle,
    output_dir: PathBuf,
}

impl TestRunner {
    /// Create a runner; fails if Node or Playwright are unavailable
    pub async fn new(config: RunnerConfig) -> E2eResult<Self> {
        let playwright = PlaywrightHandle::new(config.playwright, &config.suite).await?;
        Ok(Self {
            suite: config.suite,
            playwright,
            output_dir: config.output_dir,
        })
    }

    /// Scenarios picked by `selection`, in catalog order
    pub fn select(selection: &Selection) -> E2eResult<Vec<Scenario>> {
        let picked: Vec<Scenario> = scenarios::all()
            .into_iter()
            .filter(|s| selection.matches(s))
            .collect();

        match (selection, picked.is_empty()) {
            (Selection::Named(name), true) => Err(E2eError::JourneyNotFound(name.clone())),
            (Selection::Suite(suite), true) => Err(E2eError::JourneyNotFound(format!("suite {}", suite))),
            _ => Ok(picked),
        }
    }

    /// Run the selected scenarios
    pub async fn run(&self, selection: &Selection) -> E2eResult<TestSuiteResult> {
        let picked = Self::select(selection)?;
        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();

        info!("Running {} journey(s)...", picked.len());

        for scenario in &picked {
            let result = match scenario.build(&self.suite) {
                Ok(journey) => self.run_journey(&journey).await,
                Err(e) => TestResult {
                    name: scenario.name.to_string(),
                    suite: scenario.suite.to_string(),
                    parent_suite: None,
                    success: false,
                    duration_ms: 0,
                    steps: vec![],
                    error: Some(e.to_string()),
                },
            };

            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!("✗ {} - {}", result.name, result.error.as_deref().unwrap_or("unknown error"));
            }
            results.push(result);
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("Journey results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        Ok(TestSuiteResult {
            started_at,
            total: results.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run one journey; execution errors become a failed result
    pub async fn run_journey(&self, journey: &Journey) -> TestResult {
        let start = Instant::now();
        debug!("Running journey: {}", journey.name);

        let (steps, error) = match self.playwright.run_journey(journey).await {
            Ok(steps) => {
                let error = steps.iter().find(|s| !s.success).map(|s| {
                    format!(
                        "{} - {}",
                        s.step_name,
                        s.error.as_deref().unwrap_or("step failed")
                    )
                });
                (steps, error)
            }
            Err(e) => (vec![], Some(e.to_string())),
        };

        TestResult {
            name: journey.name.clone(),
            suite: journey.suite.clone(),
            parent_suite: journey.parent_suite.clone(),
            success: error.is_none(),
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            error,
        }
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        write_results(&self.output_dir, results)
    }
}

/// Write `test-results.json` under `output_dir`
pub fn write_results(output_dir: &std::path::Path, results: &TestSuiteResult) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join("test-results.json");
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)?;

    info!("Results written to: {}", path.display());
    Ok(path)
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub suite: SuiteConfig,
    pub playwright: PlaywrightConfig,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            suite: SuiteConfig::default(),
            playwright: PlaywrightConfig::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}
