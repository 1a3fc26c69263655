//! Report-to-PDF conversion
//!
//! locate → launch → load (network idle) → sanitize → emit → close.
//!
//! The browser is closed on every path once launched. The PDF is rendered
//! into a hidden staging file next to the target and renamed into place only
//! after the browser reports success, so a failed run never leaves a new
//! `report.pdf` behind.

use std::path::{Path, PathBuf};
use storefront_common::Timeouts;
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::{bounded, BrowserSession, Launcher, PaperFormat, WaitUntil};
use crate::error::{ReportError, ReportResult};
use crate::locate::{locate, ReportLocation, DEFAULT_REPORT_DIR};
use crate::sanitize::{self, SanitizeRules, SanitizeStats};

/// Converter inputs
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Working directory the report path is relative to
    pub root: PathBuf,

    /// Report directory, relative to `root`
    pub report_dir: PathBuf,

    /// Output file; relative paths are resolved against the report directory
    pub output: PathBuf,

    /// Also write the sanitized DOM here (for inspection)
    pub dom_snapshot: Option<PathBuf>,

    pub rules: SanitizeRules,
    pub format: PaperFormat,
    pub timeouts: Timeouts,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            output: PathBuf::from("report.pdf"),
            dom_snapshot: None,
            rules: SanitizeRules::default(),
            format: PaperFormat::A4,
            timeouts: Timeouts::default(),
        }
    }
}

/// Terminal state of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No report to convert
    Skipped { expected: PathBuf },

    /// PDF written
    Generated { pdf: PathBuf, removed: SanitizeStats },
}

pub struct ReportConverter<L> {
    config: ConverterConfig,
    launcher: L,
}

impl<L: Launcher> ReportConverter<L> {
    pub fn new(config: ConverterConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Run the whole pipeline once
    pub async fn convert(&self) -> ReportResult<Outcome> {
        let (dir, index) = match locate(&self.config.root, &self.config.report_dir) {
            ReportLocation::Absent { expected } => {
                info!("Playwright HTML report not found at {}", expected.display());
                info!("Skipping PDF generation.");
                return Ok(Outcome::Skipped { expected });
            }
            ReportLocation::Present { dir, index } => (dir, index),
        };

        bounded("runtime check", self.config.timeouts.launch(), self.launcher.preflight()).await?;

        let url = file_url(&index)?;
        let output = dir.join(&self.config.output);

        let mut session = bounded("launch", self.config.timeouts.launch(), self.launcher.launch()).await?;
        let rendered = self.render(session.as_mut(), &url, &output).await;
        let closed = bounded("close", self.config.timeouts.close(), session.close()).await;

        let removed = rendered?;
        if let Err(e) = closed {
            // the artifact is complete; the driver process is killed on drop
            warn!("Browser did not close cleanly: {}", e);
        }

        info!("PDF report generated at {}", output.display());
        Ok(Outcome::Generated { pdf: output, removed })
    }

    async fn render(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        output: &Path,
    ) -> ReportResult<SanitizeStats> {
        let timeouts = &self.config.timeouts;

        bounded("open page", timeouts.launch(), session.open_page()).await?;

        debug!("Loading {}", url);
        let idle = timeouts.network_idle();
        bounded("load report", idle, session.goto(url, WaitUntil::NetworkIdle, idle)).await?;

        let removed = bounded("sanitize", timeouts.evaluate(), session.sanitize(&self.config.rules)).await?;
        info!(
            "Removed {} script(s) and {} external stylesheet(s)",
            removed.scripts, removed.stylesheets
        );

        if let Some(snapshot) = &self.config.dom_snapshot {
            let html = bounded("capture DOM", timeouts.evaluate(), session.content()).await?;
            let remaining = sanitize::inspect(&sanitize::parse_html(&html));
            if !remaining.is_clean() {
                return Err(ReportError::NotSanitized {
                    scripts: remaining.scripts,
                    stylesheets: remaining.stylesheets,
                });
            }
            write_parented(snapshot, html.as_bytes())?;
            debug!("Sanitized DOM written to {}", snapshot.display());
        }

        let parent = output
            .parent()
            .ok_or_else(|| ReportError::InvalidPath(output.display().to_string()))?;
        std::fs::create_dir_all(parent)?;

        // removed automatically if anything below fails
        let staging = tempfile::Builder::new()
            .prefix(".report-")
            .suffix(".pdf.partial")
            .tempfile_in(parent)?;

        bounded("render PDF", timeouts.pdf(), session.pdf(staging.path(), self.config.format)).await?;

        let size = std::fs::metadata(staging.path())?.len();
        if size == 0 {
            return Err(ReportError::browser("render PDF", "browser produced an empty PDF"));
        }

        staging.persist(output).map_err(|e| ReportError::Io(e.error))?;
        Ok(removed)
    }
}

fn file_url(path: &Path) -> ReportResult<String> {
    let absolute = std::fs::canonicalize(path)?;
    Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|_| ReportError::InvalidPath(absolute.display().to_string()))
}

fn write_parented(path: &Path, contents: &[u8]) -> ReportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("my report.html");
        std::fs::write(&index, "<html></html>").unwrap();

        let url = file_url(&index).unwrap();
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("my%20report.html"));
    }

    #[test]
    fn test_file_url_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(file_url(&dir.path().join("nope.html")), Err(ReportError::Io(_))));
    }
}
