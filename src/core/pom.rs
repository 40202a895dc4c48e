//! Maven manifest field extraction.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::RunError;

/// Packaging kind that produces no artifact and is therefore rejected.
pub const FORBIDDEN_PACKAGING: &str = "pom";

static PACKAGING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<packaging>\s*([^<\s]+)\s*</packaging>").unwrap());

/// Extract the `<packaging>` value from a pom file, if declared.
///
/// A pom with no explicit `<packaging>` element defaults to `jar` on the
/// Maven side; callers see `None` and treat it as allowed.
pub fn packaging(path: &Path) -> Result<Option<String>, RunError> {
    let raw = std::fs::read_to_string(path).map_err(|e| RunError::DescriptorInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !raw.contains("<project") {
        return Err(RunError::DescriptorInvalid {
            path: path.to_path_buf(),
            reason: "not a Maven manifest (missing <project> root element)".to_string(),
        });
    }

    Ok(PACKAGING_RE.captures(&raw).map(|c| c[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_pom(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("pom.xml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_extracts_packaging() {
        let tmp = TempDir::new().unwrap();
        let pom = write_pom(&tmp, "<project>\n  <packaging> war </packaging>\n</project>");
        assert_eq!(packaging(&pom).unwrap().as_deref(), Some("war"));
    }

    #[test]
    fn test_absent_packaging_is_none() {
        let tmp = TempDir::new().unwrap();
        let pom = write_pom(&tmp, "<project>\n  <artifactId>demo</artifactId>\n</project>");
        assert_eq!(packaging(&pom).unwrap(), None);
    }

    #[test]
    fn test_non_manifest_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let pom = write_pom(&tmp, "this is not xml at all");
        assert!(matches!(
            packaging(&pom).unwrap_err(),
            RunError::DescriptorInvalid { .. }
        ));
    }

    #[test]
    fn test_unreadable_file_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.xml");
        assert!(matches!(
            packaging(&missing).unwrap_err(),
            RunError::DescriptorInvalid { .. }
        ));
    }
}
