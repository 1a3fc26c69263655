//! Playwright-backed browser over a Node line protocol
//!
//! `assets/driver.js` is written to a temp dir and started with the
//! configured Node runtime. Each [`DriverSession`] owns exactly one driver
//! process, which owns one Chromium instance.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use storefront_common::{NodeRuntime, Timeouts};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tracing::{debug, info, warn};

use crate::browser::{bounded, BrowserSession, Launcher, PaperFormat, WaitUntil};
use crate::error::{ReportError, ReportResult};

const DRIVER_JS: &str = include_str!("../assets/driver.js");

/// Extra wait on top of a timeout already enforced by Playwright itself
const REPLY_GRACE: Duration = Duration::from_secs(2);

/// Launches Chromium through the Node driver
#[derive(Debug, Clone)]
pub struct PlaywrightLauncher {
    runtime: NodeRuntime,
    timeouts: Timeouts,
    /// Keep Chromium's own sandbox; CI containers usually need it off
    chromium_sandbox: bool,
}

impl PlaywrightLauncher {
    pub fn new(runtime: NodeRuntime, timeouts: Timeouts) -> Self {
        Self {
            runtime,
            timeouts,
            chromium_sandbox: false,
        }
    }

    pub fn with_chromium_sandbox(mut self, enabled: bool) -> Self {
        self.chromium_sandbox = enabled;
        self
    }

    fn launch_args(&self) -> Vec<&'static str> {
        if self.chromium_sandbox {
            vec![]
        } else {
            vec!["--no-sandbox"]
        }
    }
}

#[async_trait]
impl Launcher for PlaywrightLauncher {
    async fn preflight(&self) -> ReportResult<()> {
        self.runtime.check_playwright(self.timeouts.launch()).await?;
        Ok(())
    }

    async fn launch(&self) -> ReportResult<Box<dyn BrowserSession>> {
        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_JS)?;

        let mut cmd = self.runtime.command();
        cmd.arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            ReportError::browser(
                "launch",
                format!("failed to spawn {}: {}", self.runtime.node_bin.display(), e),
            )
        })?;
        debug!("Driver started (pid: {:?})", child.id());

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReportError::Protocol("driver stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ReportError::Protocol("driver stdout unavailable".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("[driver] {}", line);
                }
            });
        }

        let mut session = DriverSession {
            child,
            stdin,
            replies: BufReader::new(stdout).lines(),
            next_id: 1,
            timeouts: self.timeouts.clone(),
            closed: false,
            _script_dir: script_dir,
        };

        let launch_ms = self.timeouts.launch_ms;
        let launched = session
            .request(
                "launch",
                json!({ "headless": true, "args": self.launch_args(), "timeout": launch_ms }),
                self.timeouts.launch() + REPLY_GRACE,
            )
            .await;

        if let Err(e) = launched {
            let _ = session.close().await;
            return Err(e);
        }

        info!("Headless Chromium launched");
        Ok(Box::new(session))
    }
}

#[derive(Debug, Deserialize)]
struct Reply {
    id: Option<u64>,
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

/// One driver process and its browser
pub struct DriverSession {
    child: Child,
    stdin: ChildStdin,
    replies: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    timeouts: Timeouts,
    closed: bool,
    _script_dir: tempfile::TempDir,
}

impl DriverSession {
    /// Send one request and wait for its reply.
    ///
    /// Replies to earlier, abandoned requests are skipped by id.
    async fn request(&mut self, op: &str, params: Value, limit: Duration) -> ReportResult<Value> {
        if self.closed {
            return Err(ReportError::Protocol(format!("{} after close", op)));
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut message = match params {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        message.insert("id".to_string(), json!(id));
        message.insert("op".to_string(), json!(op));

        let mut line = serde_json::to_string(&Value::Object(message))?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.flush().await?;

        let reply = bounded(op, limit, self.read_reply(id)).await?;
        if reply.ok {
            Ok(reply.value)
        } else {
            Err(ReportError::browser(
                op,
                reply.error.unwrap_or_else(|| "unknown driver error".to_string()),
            ))
        }
    }

    async fn read_reply(&mut self, id: u64) -> ReportResult<Reply> {
        loop {
            let Some(line) = self.replies.next_line().await? else {
                return Err(ReportError::Protocol("driver exited unexpectedly".to_string()));
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let reply: Reply = serde_json::from_str(line)
                .map_err(|e| ReportError::Protocol(format!("bad reply '{}': {}", line, e)))?;
            match reply.id {
                Some(reply_id) if reply_id == id => return Ok(reply),
                Some(stale) => debug!("Skipping stale reply {}", stale),
                None => {
                    return Err(ReportError::Protocol(
                        reply.error.unwrap_or_else(|| "reply without id".to_string()),
                    ))
                }
            }
        }
    }

    /// SIGTERM, short grace period, then SIGKILL
    async fn terminate(&mut self) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = self.child.id() {
                let grace = Duration::from_millis(500);
                if kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_ok()
                    && tokio::time::timeout(grace, self.child.wait()).await.is_ok()
                {
                    return;
                }
            }
        }

        let _ = self.child.kill().await;
    }
}

#[async_trait]
impl BrowserSession for DriverSession {
    async fn open_page(&mut self) -> ReportResult<()> {
        self.request("new_page", json!({}), self.timeouts.launch()).await?;
        Ok(())
    }

    async fn goto(&mut self, url: &str, wait_until: WaitUntil, timeout: Duration) -> ReportResult<()> {
        let params = json!({
            "url": url,
            "wait_until": wait_until.as_str(),
            "timeout": timeout.as_millis() as u64,
        });
        self.request("goto", params, timeout + REPLY_GRACE).await?;
        Ok(())
    }

    async fn evaluate(&mut self, expression: &str) -> ReportResult<Value> {
        let limit = self.timeouts.evaluate();
        self.request("evaluate", json!({ "expression": expression }), limit).await
    }

    async fn content(&mut self) -> ReportResult<String> {
        let limit = self.timeouts.evaluate();
        let value = self.request("content", json!({}), limit).await?;
        match value {
            Value::String(html) => Ok(html),
            other => Err(ReportError::Protocol(format!("content returned {}", other))),
        }
    }

    async fn pdf(&mut self, path: &Path, format: PaperFormat) -> ReportResult<()> {
        let params = json!({
            "path": path.to_string_lossy(),
            "format": format.as_str(),
        });
        let limit = self.timeouts.pdf();
        self.request("pdf", params, limit).await?;
        Ok(())
    }

    async fn close(&mut self) -> ReportResult<()> {
        if self.closed {
            return Ok(());
        }

        let limit = self.timeouts.close();
        let result = self.request("close", json!({}), limit).await;
        self.closed = true;

        match tokio::time::timeout(limit, self.child.wait()).await {
            Ok(Ok(status)) => debug!("Driver exited with {}", status),
            _ => {
                warn!("Driver did not exit after close; terminating");
                self.terminate().await;
            }
        }

        result.map(|_| ())
    }
}

impl Drop for DriverSession {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.child.start_kill();
        }
    }
}
