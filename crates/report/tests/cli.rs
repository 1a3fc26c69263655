use assert_cmd::Command;
use predicates::str::contains;
use std::path::Path;

fn cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("report-pdf").unwrap();
    cmd.arg("--root")
        .arg(root)
        .env_remove("RUST_LOG")
        .env_remove("E2E_NODE_BIN")
        .env_remove("E2E_NETWORK_IDLE_TIMEOUT_MS")
        .env_remove("E2E_PDF_TIMEOUT_MS");
    cmd
}

fn with_report(root: &Path) {
    let dir = root.join("playwright-report");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html><body><script>x()</script></body></html>").unwrap();
}

#[test]
fn no_report_is_a_noop() {
    let root = tempfile::tempdir().unwrap();

    cmd(root.path())
        .assert()
        .success()
        .stderr(contains("Playwright HTML report not found"))
        .stderr(contains("Skipping PDF generation"));

    assert!(!root.path().join("playwright-report").exists());
}

#[test]
fn missing_node_exits_1_without_writing() {
    let root = tempfile::tempdir().unwrap();
    with_report(root.path());

    cmd(root.path())
        .args(["--node", "/nonexistent/bin/node", "--output", "out/report.pdf"])
        .assert()
        .code(1)
        .stderr(contains("Node.js"));

    assert!(!root.path().join("playwright-report/out").exists());
    assert!(!root.path().join("playwright-report/report.pdf").exists());
}

#[cfg(unix)]
#[test]
fn missing_playwright_exits_1_with_install_hint() {
    let root = tempfile::tempdir().unwrap();
    with_report(root.path());

    // `false` behaves like a node that cannot resolve the package
    cmd(root.path())
        .args(["--node", "false"])
        .assert()
        .code(1)
        .stderr(contains("npx playwright install"));

    assert!(!root.path().join("playwright-report/report.pdf").exists());
}

#[test]
fn node_bin_from_environment() {
    let root = tempfile::tempdir().unwrap();
    with_report(root.path());

    cmd(root.path())
        .env("E2E_NODE_BIN", "/nonexistent/bin/node")
        .assert()
        .code(1)
        .stderr(contains("/nonexistent/bin/node"));
}
