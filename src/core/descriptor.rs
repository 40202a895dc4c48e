//! Per-project build descriptor (`project.json`) parsing and resolution.
//!
//! Every project directory carries three fixed-name files: the descriptor
//! itself and the two pom variants. The descriptor points at the build root
//! and at the manifest file the worker overwrites before each build.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::RunError;
use crate::core::toolchain::Jdk;

/// Descriptor file name at each project directory root.
pub const DESCRIPTOR_FILE: &str = "project.json";

/// Known-good manifest variant, copied onto the target before each build.
pub const BASELINE_POM: &str = "pom.baseline.xml";

/// Manifest variant representing the change under test.
pub const CANDIDATE_POM: &str = "pom.candidate.xml";

/// Raw `project.json` contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Build root, relative to the project directory.
    pub root_path: String,

    /// Manifest to overwrite before building, relative to the resolved root.
    pub target_descriptor_relpath: String,

    /// Declared JDK version, one of the supported set.
    pub toolchain_version: String,
}

impl ProjectDescriptor {
    /// Load and parse `project.json` from a project directory.
    pub fn load(project: &Path) -> Result<Self, RunError> {
        let path = project.join(DESCRIPTOR_FILE);
        if !path.is_file() {
            return Err(RunError::PrerequisiteFileMissing {
                project: project.to_path_buf(),
                path,
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| RunError::DescriptorInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| RunError::DescriptorInvalid {
            path,
            reason: e.to_string(),
        })
    }

    /// Parse the declared toolchain version.
    pub fn toolchain(&self, project: &Path) -> Result<Jdk, RunError> {
        self.toolchain_version
            .parse()
            .map_err(|_| RunError::UnknownToolchainVersion {
                project: project.to_path_buf(),
                version: self.toolchain_version.clone(),
            })
    }

    /// Resolve the build root against the project directory.
    pub fn resolved_root(&self, project: &Path) -> PathBuf {
        project.join(&self.root_path)
    }

    /// Resolve the target descriptor file under the resolved root.
    pub fn target_descriptor(&self, project: &Path) -> PathBuf {
        self.resolved_root(project).join(&self.target_descriptor_relpath)
    }
}
