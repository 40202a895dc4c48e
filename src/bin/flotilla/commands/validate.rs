//! `flotilla validate` command

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ValidateArgs;
use flotilla::ops::discover::discover;
use flotilla::ops::validate::validate;

pub fn execute(args: ValidateArgs) -> Result<()> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve fleet root: {}", root.display()))?;

    let projects = discover(&root)?;
    validate(&projects)?;

    println!("all {} project(s) passed validation", projects.len());
    Ok(())
}
