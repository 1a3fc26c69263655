//! Report bundle lookup

use std::path::{Path, PathBuf};

/// Default report directory, relative to the working directory
pub const DEFAULT_REPORT_DIR: &str = "playwright-report";

/// Entry file inside the report directory
pub const INDEX_FILE: &str = "index.html";

/// Whether a generated report is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLocation {
    /// No entry file; nothing to convert
    Absent { expected: PathBuf },

    /// Entry file found
    Present { dir: PathBuf, index: PathBuf },
}

/// Look for `<root>/<report_dir>/index.html`
pub fn locate(root: &Path, report_dir: &Path) -> ReportLocation {
    let dir = root.join(report_dir);
    let index = dir.join(INDEX_FILE);

    if index.is_file() {
        ReportLocation::Present { dir, index }
    } else {
        ReportLocation::Absent { expected: index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_when_missing() {
        let root = tempfile::tempdir().unwrap();
        let location = locate(root.path(), Path::new(DEFAULT_REPORT_DIR));
        assert_eq!(
            location,
            ReportLocation::Absent {
                expected: root.path().join("playwright-report/index.html")
            }
        );
    }

    #[test]
    fn test_directory_named_index_is_absent() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("playwright-report/index.html")).unwrap();
        let location = locate(root.path(), Path::new(DEFAULT_REPORT_DIR));
        assert!(matches!(location, ReportLocation::Absent { .. }));
    }

    #[test]
    fn test_present() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("playwright-report");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html></html>").unwrap();

        match locate(root.path(), Path::new(DEFAULT_REPORT_DIR)) {
            ReportLocation::Present { dir: found, index } => {
                assert_eq!(found, dir);
                assert_eq!(index, dir.join("index.html"));
            }
            other => panic!("expected present, got {:?}", other),
        }
    }
}
