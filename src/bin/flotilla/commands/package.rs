//! `flotilla package` command

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::cli::PackageArgs;
use flotilla::core::ledger::{ProjectStatus, ResultLedger, FAILURE_REPORT_FILE, LEDGER_FILE};
use flotilla::ops::classify::classify;
use flotilla::ops::discover::discover;
use flotilla::ops::dispatch::{dispatch, DispatchOptions};
use flotilla::util::process::find_maven;

pub fn execute(args: PackageArgs) -> Result<()> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve fleet root: {}", root.display()))?;

    let projects = discover(&root)?;
    if projects.is_empty() {
        bail!("no projects found under {}", root.display());
    }

    // Classification is strictly up-front: an unsupported toolchain version
    // aborts here, before the ledger is initialized or any build starts.
    let groups = classify(&projects)?;

    let maven = match args.maven {
        Some(path) => path,
        None => find_maven()
            .ok_or_else(|| anyhow!("could not find `mvn` on PATH (set --maven or MAVEN)"))?,
    };

    let ledger = ResultLedger::initialize(root.join(LEDGER_FILE), &projects)?;

    let mut opts = DispatchOptions::maven(maven);
    opts.jobs = args.jobs;

    dispatch(&groups, &ledger, &opts)?;

    ledger.write_failure_report(&root.join(FAILURE_REPORT_FILE))?;

    let snapshot = ledger.snapshot()?;
    let succeeded = snapshot
        .values()
        .filter(|s| **s == ProjectStatus::Success)
        .count();
    let failed = snapshot
        .values()
        .filter(|s| **s == ProjectStatus::Failed)
        .count();

    eprintln!(
        "    Finished {} project(s): {} succeeded, {} failed",
        projects.len(),
        succeeded,
        failed
    );

    Ok(())
}
