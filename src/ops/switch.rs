//! Global JDK activation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::toolchain::Jdk;
use crate::util::process::ProcessBuilder;

/// Activate `jdk` machine-wide by running `<program> global <name>`.
///
/// This is a hard barrier: the selection is visible to every subprocess on
/// the machine, so callers must not start any worker for the new group
/// until this returns, and must never have two groups' workers active at
/// once.
pub fn activate(jdk: Jdk, program: &Path) -> Result<()> {
    tracing::info!("activating JDK {}", jdk);

    ProcessBuilder::new(program)
        .arg("global")
        .arg(jdk.jenv_name())
        .exec_and_check()
        .with_context(|| format!("failed to activate JDK {}", jdk))?;

    Ok(())
}

/// Locate the switch executable, honoring the `JENV` environment override.
pub fn locate() -> PathBuf {
    std::env::var_os("JENV")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("jenv"))
}
