//! Storefront Common Library
//!
//! Configuration, runtime detection, errors and logging shared by the
//! journey runner and the report converter.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{Credentials, SuiteConfig, Timeouts, PASSWORD_VAR, USER_VAR};
pub use error::{Error, Result};
pub use runtime::NodeRuntime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
