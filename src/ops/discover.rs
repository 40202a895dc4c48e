//! Candidate project discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory names never treated as projects.
pub const DENYLIST: [&str; 5] = [".git", ".github", ".idea", ".vscode", "target"];

/// List the immediate subdirectories of `root`, denylist-filtered and
/// sorted by name so discovery order is stable across runs.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let mut projects = Vec::new();

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read directory: {}", root.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if DENYLIST.contains(&name.as_ref()) {
            continue;
        }
        projects.push(entry.path());
    }

    projects.sort();
    Ok(projects)
}
