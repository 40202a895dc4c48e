//! Pre-flight descriptor validation.
//!
//! Validation is read-only and fail-fast: projects are checked in discovery
//! order and the first violation aborts the whole run, naming the offending
//! project and rule.

use std::path::{Path, PathBuf};

use crate::core::descriptor::{ProjectDescriptor, BASELINE_POM, CANDIDATE_POM, DESCRIPTOR_FILE};
use crate::core::errors::RunError;
use crate::core::pom::{self, FORBIDDEN_PACKAGING};

/// Validate every project, stopping at the first violation.
pub fn validate(projects: &[PathBuf]) -> Result<(), RunError> {
    for project in projects {
        validate_project(project)?;
        tracing::debug!("validated {}", project.display());
    }
    Ok(())
}

fn validate_project(project: &Path) -> Result<(), RunError> {
    // Both pom variants must exist before anything else is looked at.
    let baseline = project.join(BASELINE_POM);
    let candidate = project.join(CANDIDATE_POM);
    for path in [&baseline, &candidate] {
        if !path.is_file() {
            return Err(RunError::PrerequisiteFileMissing {
                project: project.to_path_buf(),
                path: path.clone(),
            });
        }
    }

    // Descriptor exists, parses, and points at a real build root.
    let descriptor = ProjectDescriptor::load(project)?;
    let root = descriptor.resolved_root(project);
    if !root.is_dir() {
        return Err(RunError::DescriptorInvalid {
            path: project.join(DESCRIPTOR_FILE),
            reason: format!("root_path `{}` is not a directory", descriptor.root_path),
        });
    }

    let target = descriptor.target_descriptor(project);
    if !target.is_file() {
        return Err(RunError::PrerequisiteFileMissing {
            project: project.to_path_buf(),
            path: target,
        });
    }

    // Neither variant may declare the aggregator-only packaging.
    for manifest in [&baseline, &candidate] {
        if let Some(packaging) = pom::packaging(manifest)? {
            if packaging == FORBIDDEN_PACKAGING {
                return Err(RunError::PackagingDisallowed {
                    project: project.to_path_buf(),
                    manifest: manifest.clone(),
                    packaging,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_project(root: &Path, name: &str, packaging: &str) -> PathBuf {
        let project = root.join(name);
        let repo = project.join("repo");
        std::fs::create_dir_all(&repo).unwrap();

        let pom = format!("<project><packaging>{packaging}</packaging></project>");
        std::fs::write(project.join(BASELINE_POM), &pom).unwrap();
        std::fs::write(project.join(CANDIDATE_POM), &pom).unwrap();
        std::fs::write(repo.join("pom.xml"), &pom).unwrap();
        std::fs::write(
            project.join(DESCRIPTOR_FILE),
            r#"{"root_path": "repo", "target_descriptor_relpath": "pom.xml", "toolchain_version": "11"}"#,
        )
        .unwrap();

        project
    }

    #[test]
    fn test_valid_fleet_passes() {
        let tmp = TempDir::new().unwrap();
        let a = make_project(tmp.path(), "a", "jar");
        let b = make_project(tmp.path(), "b", "war");

        assert!(validate(&[a, b]).is_ok());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let a = make_project(tmp.path(), "a", "jar");
        let projects = vec![a];

        assert!(validate(&projects).is_ok());
        assert!(validate(&projects).is_ok());
    }

    #[test]
    fn test_missing_variant_file() {
        let tmp = TempDir::new().unwrap();
        let a = make_project(tmp.path(), "a", "jar");
        std::fs::remove_file(a.join(CANDIDATE_POM)).unwrap();

        let err = validate(&[a.clone()]).unwrap_err();
        match err {
            RunError::PrerequisiteFileMissing { project, path } => {
                assert_eq!(project, a);
                assert_eq!(path, a.join(CANDIDATE_POM));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_root_path_is_descriptor_invalid() {
        let tmp = TempDir::new().unwrap();
        let a = make_project(tmp.path(), "a", "jar");
        std::fs::write(
            a.join(DESCRIPTOR_FILE),
            r#"{"root_path": "nowhere", "target_descriptor_relpath": "pom.xml", "toolchain_version": "11"}"#,
        )
        .unwrap();

        assert!(matches!(
            validate(&[a]).unwrap_err(),
            RunError::DescriptorInvalid { .. }
        ));
    }

    #[test]
    fn test_forbidden_packaging_names_first_offender() {
        let tmp = TempDir::new().unwrap();
        let q = make_project(tmp.path(), "q", "jar");
        std::fs::write(
            q.join(CANDIDATE_POM),
            "<project><packaging>pom</packaging></project>",
        )
        .unwrap();
        // A later project with the same violation must never be reached.
        let z = make_project(tmp.path(), "z", "pom");

        let err = validate(&[q.clone(), z]).unwrap_err();
        match err {
            RunError::PackagingDisallowed {
                project,
                manifest,
                packaging,
            } => {
                assert_eq!(project, q);
                assert_eq!(manifest, q.join(CANDIDATE_POM));
                assert_eq!(packaging, "pom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
