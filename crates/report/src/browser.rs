//! Headless browser seam
//!
//! The converter only needs a handful of browser capabilities. They are
//! expressed as traits so the Playwright driver and in-memory test browsers
//! are interchangeable.

use async_trait::async_trait;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::error::{ReportError, ReportResult};
use crate::sanitize::{SanitizeRules, SanitizeStats};

/// Navigation completion condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    NetworkIdle,
}

impl WaitUntil {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitUntil::NetworkIdle => "networkidle",
        }
    }
}

/// Output page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaperFormat {
    #[default]
    A4,
}

impl PaperFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperFormat::A4 => "A4",
        }
    }
}

/// Starts browser sessions
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Check the runtime is usable without starting anything
    async fn preflight(&self) -> ReportResult<()>;

    /// Start an isolated headless browser
    async fn launch(&self) -> ReportResult<Box<dyn BrowserSession>>;
}

/// One exclusively owned browser process
#[async_trait]
pub trait BrowserSession: Send {
    async fn open_page(&mut self) -> ReportResult<()>;

    async fn goto(&mut self, url: &str, wait_until: WaitUntil, timeout: Duration) -> ReportResult<()>;

    /// Evaluate a JavaScript expression in the page and return its JSON value
    async fn evaluate(&mut self, expression: &str) -> ReportResult<serde_json::Value>;

    /// Strip content per `rules`
    async fn sanitize(&mut self, rules: &SanitizeRules) -> ReportResult<SanitizeStats> {
        let value = self.evaluate(&rules.script()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Serialized DOM of the current page
    async fn content(&mut self) -> ReportResult<String>;

    async fn pdf(&mut self, path: &Path, format: PaperFormat) -> ReportResult<()>;

    /// Terminate the browser. Safe to call more than once.
    async fn close(&mut self) -> ReportResult<()>;
}

/// Await `fut` for at most `limit`, mapping expiry to `ReportError::Timeout`
pub async fn bounded<T, F>(operation: &str, limit: Duration, fut: F) -> ReportResult<T>
where
    F: Future<Output = ReportResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ReportError::Timeout {
            operation: operation.to_string(),
            millis: limit.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_maps_expiry_to_timeout() {
        let err = bounded("goto", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ReportError>(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ReportError::Timeout { ref operation, millis: 10 } if operation == "goto"));
    }

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let value = bounded("evaluate", Duration::from_secs(1), async { Ok::<_, ReportError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
