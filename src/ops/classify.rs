//! Grouping projects by declared toolchain.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::descriptor::ProjectDescriptor;
use crate::core::errors::RunError;
use crate::core::toolchain::Jdk;

/// Projects partitioned by JDK version.
///
/// Every supported version is present as a key even when its group is
/// empty, so the switch-and-dispatch loop is total over the enum.
#[derive(Debug)]
pub struct ToolchainGroups {
    groups: BTreeMap<Jdk, Vec<PathBuf>>,
}

impl ToolchainGroups {
    /// Create the partition with all supported versions empty.
    pub fn new() -> Self {
        let groups = Jdk::ALL.iter().map(|jdk| (*jdk, Vec::new())).collect();
        ToolchainGroups { groups }
    }

    /// Append a project to its version's group.
    pub fn insert(&mut self, jdk: Jdk, project: PathBuf) {
        self.groups
            .get_mut(&jdk)
            .expect("all supported versions are pre-seeded")
            .push(project);
    }

    /// Projects in one version's group.
    pub fn get(&self, jdk: Jdk) -> &[PathBuf] {
        self.groups.get(&jdk).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate groups in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (Jdk, &[PathBuf])> + '_ {
        Jdk::ALL.iter().map(move |jdk| (*jdk, self.get(*jdk)))
    }

    /// Total project count across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no project was classified at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToolchainGroups {
    fn default() -> Self {
        ToolchainGroups::new()
    }
}

/// Partition the discovered projects by declared JDK version.
///
/// Runs before any build starts; an unparseable descriptor or an
/// unsupported version aborts the whole run here.
pub fn classify(projects: &[PathBuf]) -> Result<ToolchainGroups, RunError> {
    let mut groups = ToolchainGroups::new();

    for project in projects {
        let descriptor = ProjectDescriptor::load(project)?;
        let jdk = descriptor.toolchain(project)?;
        groups.insert(jdk, project.clone());
    }

    Ok(groups)
}
