//! Storefront Report
//!
//! Turns the HTML report left behind by a Playwright run into a static PDF.
//!
//! ```text
//! playwright-report/index.html
//!        │ locate
//!        ▼
//!   Launcher::launch ──► BrowserSession
//!        │ goto (network idle)
//!        │ sanitize (scripts, external stylesheets)
//!        │ pdf (A4, staged)
//!        ▼
//! playwright-report/report.pdf
//! ```
//!
//! A missing report is not an error. A missing Node.js or Playwright
//! installation is, and is detected before anything is written.

pub mod browser;
pub mod converter;
pub mod driver;
pub mod error;
pub mod locate;
pub mod sanitize;

pub use browser::{bounded, BrowserSession, Launcher, PaperFormat, WaitUntil};
pub use converter::{ConverterConfig, Outcome, ReportConverter};
pub use driver::PlaywrightLauncher;
pub use error::{ReportError, ReportResult};
pub use locate::{locate, ReportLocation, DEFAULT_REPORT_DIR, INDEX_FILE};
pub use sanitize::{SanitizeRules, SanitizeStats};
