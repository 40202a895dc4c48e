//! Group-by-group build dispatch and the per-project build worker.
//!
//! Groups run strictly one after another: the JDK switch for a group must
//! complete before any of its workers start, and the pool drains completely
//! before the next group's switch runs. Within a group, workers share
//! nothing but the ledger.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::descriptor::{ProjectDescriptor, BASELINE_POM, CANDIDATE_POM};
use crate::core::errors::RunError;
use crate::core::ledger::{ProjectStatus, ResultLedger};
use crate::core::toolchain::Jdk;
use crate::ops::classify::ToolchainGroups;
use crate::ops::switch;
use crate::util::process::ProcessBuilder;

/// Substring that marks a successful build in the captured output.
///
/// Classification deliberately ignores the exit status; Maven prints this
/// banner exactly when the reactor succeeded.
pub const SUCCESS_MARKER: &str = "BUILD SUCCESS";

/// Default bounded-pool width.
pub const DEFAULT_JOBS: usize = 20;

/// Options for a dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Build tool executable.
    pub program: PathBuf,

    /// Arguments passed to the build tool.
    pub args: Vec<String>,

    /// Toolchain switch executable.
    pub switcher: PathBuf,

    /// Worker pool width.
    pub jobs: usize,
}

impl DispatchOptions {
    /// Standard Maven invocation with the given executable.
    pub fn maven(program: PathBuf) -> Self {
        DispatchOptions {
            program,
            args: vec!["-B".into(), "clean".into(), "package".into()],
            switcher: switch::locate(),
            jobs: DEFAULT_JOBS,
        }
    }
}

/// Build every group in toolchain order, switching JDKs between groups.
pub fn dispatch(
    groups: &ToolchainGroups,
    ledger: &ResultLedger,
    opts: &DispatchOptions,
) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.jobs)
        .build()
        .context("failed to build worker pool")?;

    for (jdk, projects) in groups.iter() {
        if projects.is_empty() {
            tracing::debug!("no projects declare JDK {}", jdk);
            continue;
        }
        switch::activate(jdk, &opts.switcher)?;
        run_group(jdk, projects, &pool, ledger, opts);
    }

    Ok(())
}

/// Run one toolchain group through the bounded pool, waiting for every
/// project in it to finish.
pub fn run_group(
    jdk: Jdk,
    projects: &[PathBuf],
    pool: &rayon::ThreadPool,
    ledger: &ResultLedger,
    opts: &DispatchOptions,
) {
    tracing::info!("building {} project(s) with JDK {}", projects.len(), jdk);

    let pb = ProgressBar::new(projects.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pool.install(|| {
        projects.par_iter().for_each(|project| {
            build_one(project, ledger, opts);
            pb.inc(1);
        });
    });

    pb.finish_and_clear();
}

/// Build a single project and record its outcome.
///
/// Failures are isolated: every early exit records `Failed` and returns,
/// leaving sibling workers untouched.
fn build_one(project: &Path, ledger: &ResultLedger, opts: &DispatchOptions) {
    let status = match try_build(project, opts) {
        Ok(true) => ProjectStatus::Success,
        Ok(false) => {
            tracing::error!("build failed for `{}`", project.display());
            ProjectStatus::Failed
        }
        Err(err) => {
            tracing::error!("build failed for `{}`: {}", project.display(), err);
            ProjectStatus::Failed
        }
    };

    if let Err(err) = ledger.record(project, status) {
        tracing::error!("failed to record outcome for `{}`: {}", project.display(), err);
    }
}

/// Worker body: reset the target manifest, invoke the build tool, classify
/// the captured output.
fn try_build(project: &Path, opts: &DispatchOptions) -> Result<bool, RunError> {
    let descriptor = ProjectDescriptor::load(project)?;

    let baseline = project.join(BASELINE_POM);
    let candidate = project.join(CANDIDATE_POM);
    let root = descriptor.resolved_root(project);
    let target = descriptor.target_descriptor(project);

    // Re-check: time may have passed since the pre-flight validation.
    for path in [&baseline, &candidate, &target] {
        if !path.is_file() {
            return Err(RunError::PrerequisiteFileMissing {
                project: project.to_path_buf(),
                path: path.clone(),
            });
        }
    }

    // Known pre-build state: the baseline variant replaces whatever the
    // target currently holds.
    std::fs::copy(&baseline, &target).map_err(|e| RunError::BuildCommandFailed {
        project: project.to_path_buf(),
        reason: format!("failed to reset {}: {}", target.display(), e),
    })?;

    let output = ProcessBuilder::new(&opts.program)
        .args(&opts.args)
        .cwd(&root)
        .exec_combined()
        .map_err(|e| RunError::BuildCommandFailed {
            project: project.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    tracing::debug!(
        "`{}` exited with {:?} for {}",
        opts.program.display(),
        output.status.code(),
        project.display()
    );

    Ok(output.text.contains(SUCCESS_MARKER))
}
