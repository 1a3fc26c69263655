//! report-pdf - render the Playwright HTML report to PDF
//!
//! Exit status is 0 when the PDF was written or there was no report to
//! convert, 1 on any failure.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_common::{NodeRuntime, Timeouts};
use storefront_report::{
    ConverterConfig, Outcome, PlaywrightLauncher, ReportConverter, SanitizeRules, DEFAULT_REPORT_DIR,
};
use tracing::{debug, error};

/// Convert playwright-report/index.html into a sanitized A4 PDF
#[derive(Parser, Debug)]
#[command(name = "report-pdf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project directory holding the report and node_modules
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Report directory, relative to --root
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    report_dir: PathBuf,

    /// Output file, relative to the report directory
    #[arg(short, long, default_value = "report.pdf")]
    output: PathBuf,

    /// Also write the sanitized HTML to this file
    #[arg(long)]
    dom_snapshot: Option<PathBuf>,

    /// Node.js executable
    #[arg(long, env = "E2E_NODE_BIN", default_value = "node")]
    node: PathBuf,

    /// Network-idle wait, in milliseconds
    #[arg(long, env = "E2E_NETWORK_IDLE_TIMEOUT_MS")]
    network_idle_timeout_ms: Option<u64>,

    /// PDF rendering limit, in milliseconds
    #[arg(long, env = "E2E_PDF_TIMEOUT_MS")]
    pdf_timeout_ms: Option<u64>,

    /// Keep Chromium's sandbox enabled
    #[arg(long)]
    chromium_sandbox: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn timeouts(&self) -> Timeouts {
        let mut timeouts = Timeouts::default();
        if let Some(ms) = self.network_idle_timeout_ms {
            timeouts.network_idle_ms = ms;
        }
        if let Some(ms) = self.pdf_timeout_ms {
            timeouts.pdf_ms = ms;
        }
        timeouts
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    storefront_common::logging::init(args.verbose);
    debug!("{:?}", args);

    let timeouts = args.timeouts();
    let runtime = NodeRuntime::new(&args.node, &args.root);
    let launcher = PlaywrightLauncher::new(runtime, timeouts.clone())
        .with_chromium_sandbox(args.chromium_sandbox);

    let config = ConverterConfig {
        root: args.root,
        report_dir: args.report_dir,
        output: args.output,
        dom_snapshot: args.dom_snapshot,
        rules: SanitizeRules::default(),
        timeouts,
        ..Default::default()
    };

    match ReportConverter::new(config, launcher).convert().await {
        Ok(Outcome::Skipped { .. }) | Ok(Outcome::Generated { .. }) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_environment() {
                error!("{}", e);
            } else {
                error!("Error while generating PDF report: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
