//! Storefront E2E journeys
//!
//! Page objects record user actions into journeys; the runner compiles each
//! journey into a Playwright script, runs it under Node and collects
//! per-step results.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  scenarios::all() -> [Scenario]                              │
//! │    └── build(&SuiteConfig) -> Journey                        │
//! │          └── HomePage / ProductsPage / CartPage /            │
//! │              CheckoutPage / DesktopsPage record TestSteps    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                  │
//! │    ├── PlaywrightHandle::build_script(journey) -> JS         │
//! │    ├── run_script() -> JSON step events                      │
//! │    └── write_results() -> test-results.json                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod journey;
pub mod pages;
pub mod playwright;
pub mod runner;
pub mod scenarios;
pub mod step;

pub use error::{E2eError, E2eResult};
pub use journey::Journey;
pub use runner::{RunnerConfig, Selection, TestRunner};
pub use step::TestStep;
