//! Live journey harness
//!
//! Builds every selected journey and, with `--live` (or `E2E_LIVE=1`), runs
//! them against the real storefronts through Playwright.
//! Run with: cargo test --package storefront-e2e --test e2e -- --live

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use storefront_common::SuiteConfig;
use storefront_e2e::playwright::{Browser, PlaywrightConfig, PlaywrightHandle};
use storefront_e2e::runner::{self, RunnerConfig, Selection, TestRunner};
use storefront_e2e::E2eResult;

#[derive(Parser, Debug)]
#[command(name = "storefront-e2e")]
#[command(about = "Page-object journeys against the sample storefronts")]
#[command(ignore_errors = true)]
struct Args {
    /// Run journeys against the live sites (default: build and print only)
    #[arg(long, env = "E2E_LIVE")]
    live: bool,

    /// Run only journeys in this suite
    #[arg(short, long)]
    suite: Option<String>,

    /// Run only the journey with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Print built journeys as YAML
    #[arg(long)]
    dump: bool,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut suite = SuiteConfig::load(args.config.as_deref())?;
    if args.headed {
        suite.headless = false;
    }

    let selection = match (args.name, args.suite) {
        (Some(name), _) => Selection::Named(name),
        (None, Some(suite)) => Selection::Suite(suite),
        (None, None) => Selection::All,
    };

    let playwright = PlaywrightConfig {
        browser: args.browser.parse::<Browser>()?,
        headless: suite.headless,
        failure_screenshot_dir: Some(args.output.join("screenshots")),
    };

    if !args.live {
        return dry_run(&suite, &playwright, &selection, args.dump);
    }

    let runner = TestRunner::new(RunnerConfig {
        suite,
        playwright,
        output_dir: args.output.clone(),
    })
    .await?;

    let results = runner.run(&selection).await?;
    runner::write_results(&args.output, &results)?;
    Ok(results.all_passed())
}

/// Build every selected journey and compile its script without a browser
fn dry_run(
    suite: &SuiteConfig,
    playwright: &PlaywrightConfig,
    selection: &Selection,
    dump: bool,
) -> E2eResult<bool> {
    let handle = PlaywrightHandle::unchecked(playwright.clone(), suite);
    for scenario in TestRunner::select(selection)? {
        match scenario.build(suite) {
            Ok(journey) => {
                let script = handle.build_script(&journey);
                println!(
                    "{} [{}]: {} steps, {} bytes of script",
                    journey.name,
                    journey.suite,
                    journey.steps.len(),
                    script.len()
                );
                if dump {
                    println!("{}", journey.to_yaml()?);
                }
            }
            Err(e) => println!("{} [{}]: skipped ({})", scenario.name, scenario.suite, e),
        }
    }
    println!("Dry run only; pass --live or set E2E_LIVE=1 to drive a browser.");
    Ok(true)
}
