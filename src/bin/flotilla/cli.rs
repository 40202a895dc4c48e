//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use flotilla::ops::dispatch::DEFAULT_JOBS;

/// Flotilla - a batch build orchestrator for fleets of Maven projects
#[derive(Parser)]
#[command(name = "flotilla")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every project, one toolchain group at a time
    Package(PackageArgs),

    /// Check every project's descriptors without building anything
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct PackageArgs {
    /// Fleet root containing the project directories (defaults to `.`)
    pub root: Option<PathBuf>,

    /// Number of parallel workers per group
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JOBS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub jobs: usize,

    /// Maven executable (defaults to `mvn` on PATH)
    #[arg(long, env = "MAVEN")]
    pub maven: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Fleet root containing the project directories (defaults to `.`)
    pub root: Option<PathBuf>,
}
