//! Run-level error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while validating, classifying, building, or recording a
/// fleet run.
///
/// Validation and classification errors abort the whole run; per-project
/// build errors are caught by the worker and recorded as `Failed` instead
/// of propagating.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing prerequisite file for `{project}`: {path}")]
    PrerequisiteFileMissing { project: PathBuf, path: PathBuf },

    #[error("invalid descriptor at `{path}`: {reason}")]
    DescriptorInvalid { path: PathBuf, reason: String },

    #[error("packaging `{packaging}` is disallowed for `{project}` (declared in {manifest})")]
    PackagingDisallowed {
        project: PathBuf,
        manifest: PathBuf,
        packaging: String,
    },

    #[error("unknown toolchain version `{version}` declared by `{project}`")]
    UnknownToolchainVersion { project: PathBuf, version: String },

    #[error("build command failed for `{project}`: {reason}")]
    BuildCommandFailed { project: PathBuf, reason: String },

    #[error("ledger I/O failure at `{path}`: {reason}")]
    LedgerIo { path: PathBuf, reason: String },
}
