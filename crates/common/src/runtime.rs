//! Node.js / Playwright runtime detection

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{Error, Result};

/// Where to find `node` and the project holding `node_modules/playwright`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeRuntime {
    /// Node.js executable
    pub node_bin: PathBuf,

    /// Project directory; scripts run here and resolve modules from its `node_modules`
    pub working_dir: PathBuf,
}

impl Default for NodeRuntime {
    fn default() -> Self {
        Self {
            node_bin: PathBuf::from("node"),
            working_dir: PathBuf::from("."),
        }
    }
}

impl NodeRuntime {
    pub fn new(node_bin: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            node_bin: node_bin.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Check that node runs and can resolve the `playwright` package.
    ///
    /// The probe is killed if it does not finish within `limit`.
    pub async fn check_playwright(&self, limit: Duration) -> Result<()> {
        let mut cmd = TokioCommand::new(&self.node_bin);
        cmd.args(["-e", "require.resolve('playwright')"])
            .current_dir(&self.working_dir)
            .env("NODE_PATH", self.node_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let status = match tokio::time::timeout(limit, cmd.status()).await {
            Ok(status) => status,
            Err(_) => {
                return Err(Error::Timeout {
                    operation: "Playwright availability check".to_string(),
                    millis: limit.as_millis() as u64,
                })
            }
        };

        match status {
            Ok(status) if status.success() => {
                debug!("Playwright resolved via {}", self.node_bin.display());
                Ok(())
            }
            Ok(_) => Err(Error::PlaywrightNotFound),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::NodeNotFound(self.node_bin.display().to_string()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// A `node` command rooted at the working directory.
    ///
    /// Scripts are usually written to a temp dir, so `NODE_PATH` points module
    /// resolution back at the project's `node_modules`. The child is killed if
    /// the handle is dropped.
    pub fn command(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.node_bin);
        cmd.current_dir(&self.working_dir)
            .env("NODE_PATH", self.node_path())
            .kill_on_drop(true);
        cmd
    }

    fn node_path(&self) -> OsString {
        let modules = self.working_dir.join("node_modules");
        match std::env::var_os("NODE_PATH") {
            Some(existing) if !existing.is_empty() => {
                let mut paths = vec![modules];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths).unwrap_or_else(|_| existing)
            }
            _ => modules.into_os_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_missing_node_is_environment_error() {
        let runtime = NodeRuntime::new("/nonexistent/bin/node-missing", ".");
        let err = runtime.check_playwright(LIMIT).await.unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(_)));
        assert!(err.is_environment());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_resolver_reports_playwright_missing() {
        // `false` exits non-zero for any arguments
        let runtime = NodeRuntime::new("false", ".");
        let err = runtime.check_playwright(LIMIT).await.unwrap_err();
        assert!(matches!(err, Error::PlaywrightNotFound));
        assert!(err.to_string().contains("npx playwright install"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_wedged_node_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("node");
        std::fs::write(&node, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&node, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runtime = NodeRuntime::new(&node, dir.path());
        let started = std::time::Instant::now();
        let err = runtime
            .check_playwright(Duration::from_millis(200))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { millis: 200, .. }), "{:?}", err);
        assert!(!err.is_environment());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_node_path_includes_project_modules() {
        let runtime = NodeRuntime::new("node", "/srv/project");
        let path = runtime.node_path();
        let first = std::env::split_paths(&path).next().unwrap();
        assert_eq!(first, PathBuf::from("/srv/project/node_modules"));
    }
}
